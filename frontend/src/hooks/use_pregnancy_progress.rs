use chrono::NaiveDate;
use shared::{PregnancyTimeline, WeekContent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::content::{ContentService, RequestSequencer, RequestTicket};
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::pregnancy::{
    calculate_pregnancy_progress, trimester_info, DevelopmentInsight, RecommendationTable,
    SizeComparison, TrimesterInfo, WeekContentTable,
};

/// Where the timeline comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressSource {
    StartDate(NaiveDate),
    WeekDay { week: u32, day: u32 },
}

impl ProgressSource {
    pub fn timeline(&self, today: Option<NaiveDate>) -> PregnancyTimeline {
        match self {
            ProgressSource::StartDate(start) => {
                PregnancyTimeline::from_start_date(*start, today.unwrap_or(*start))
            }
            ProgressSource::WeekDay { week, day } => PregnancyTimeline::from_week_day(*week, *day),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct PregnancyProgressState {
    pub timeline: PregnancyTimeline,
    pub trimester_info: &'static TrimesterInfo,
    pub size_comparison: SizeComparison,
    pub progress_percent: f64,
    pub insights: Vec<DevelopmentInsight>,
    pub recommendations: Vec<String>,
    /// Content for the displayed week, if any has arrived
    pub week_content: Option<WeekContent>,
    pub loading: bool,
}

impl PregnancyProgressState {
    /// Derive every display value from a timeline and the known content
    pub fn derive(
        timeline: PregnancyTimeline,
        table: &WeekContentTable,
        recommendations: &RecommendationTable,
        loading: bool,
    ) -> Self {
        let week = timeline.current_week;
        Self {
            timeline,
            trimester_info: trimester_info(timeline.trimester),
            size_comparison: table.size_comparison(week),
            progress_percent: calculate_pregnancy_progress(timeline.days_completed),
            insights: table.development_insights(week),
            recommendations: recommendations.for_week(week),
            week_content: table.get(week).cloned(),
            loading,
        }
    }
}

/// Store `response` as the displayed content if `ticket` is still the latest
/// request. Returns whether it was applied; a stale response leaves
/// `displayed` untouched.
pub fn accept_response(
    sequencer: &RequestSequencer,
    ticket: RequestTicket,
    displayed: &RefCell<Option<WeekContent>>,
    response: Option<WeekContent>,
) -> bool {
    if !sequencer.is_current(ticket) {
        return false;
    }
    *displayed.borrow_mut() = response;
    true
}

#[derive(Clone, PartialEq)]
pub struct UsePregnancyProgressActions {
    pub fetch_week: Callback<u32>,
    pub fetch_week_range: Callback<(u32, u32)>,
}

pub struct UsePregnancyProgressResult {
    pub state: PregnancyProgressState,
    pub actions: UsePregnancyProgressActions,
}

#[hook]
pub fn use_pregnancy_progress(
    content: &ContentService<ApiClient>,
    source: ProgressSource,
) -> UsePregnancyProgressResult {
    let loading = use_state(|| false);
    let force_update = use_force_update();
    let sequencer = use_memo((), |_| RequestSequencer::default());
    let recommendations = use_memo((), |_| RecommendationTable::builtin());
    let logger = use_memo((), |_| Logger::new("pregnancy-progress"));
    // Latest content accepted for display; stale responses never land here
    let displayed: Rc<RefCell<Option<WeekContent>>> = use_mut_ref(|| None);

    let timeline = source.timeline(date_utils::today());
    let week = timeline.current_week;

    let fetch_week = {
        let content = content.clone();
        let loading = loading.clone();
        let force_update = force_update.clone();
        let sequencer = sequencer.clone();
        let logger = logger.clone();
        let displayed = displayed.clone();

        use_callback((), move |week: u32, _| {
            let content = content.clone();
            let loading = loading.clone();
            let force_update = force_update.clone();
            let sequencer = sequencer.clone();
            let logger = logger.clone();
            let displayed = displayed.clone();
            let ticket = sequencer.issue();

            spawn_local(async move {
                loading.set(true);
                let result = content.fetch_week_data(week).await;
                loading.set(content.is_loading());

                if accept_response(&sequencer, ticket, &displayed, result) {
                    force_update.force_update();
                } else {
                    logger.debug(&format!("Discarding stale response for week {}", week));
                }
            });
        })
    };

    let fetch_week_range = {
        let content = content.clone();
        let loading = loading.clone();
        let force_update = force_update.clone();

        use_callback((), move |(from, to): (u32, u32), _| {
            let content = content.clone();
            let loading = loading.clone();
            let force_update = force_update.clone();

            spawn_local(async move {
                loading.set(true);
                content.fetch_week_range(from, to).await;
                loading.set(content.is_loading());
                force_update.force_update();
            });
        })
    };

    {
        let fetch_week = fetch_week.clone();
        use_effect_with(week, move |week| {
            fetch_week.emit(*week);
            || ()
        });
    }

    let mut table = WeekContentTable::builtin();
    for entry in content.cached_weeks() {
        table.insert(entry);
    }
    // Only content accepted for the current week is shown as the week's entry
    if let Some(entry) = displayed.borrow().as_ref().filter(|e| e.week == week) {
        table.insert(entry.clone());
    }

    let state = PregnancyProgressState::derive(timeline, &table, &recommendations, *loading);
    let actions = UsePregnancyProgressActions {
        fetch_week,
        fetch_week_range,
    };

    UsePregnancyProgressResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_source_timeline_from_start_date() {
        let source = ProgressSource::StartDate(date("2025-01-01"));
        let timeline = source.timeline(Some(date("2025-05-21")));
        // 140 days -> week 21, day 0
        assert_eq!(timeline.current_week, 21);
        assert_eq!(timeline.trimester, 2);
    }

    #[test]
    fn test_source_timeline_without_clock_starts_at_week_one() {
        let source = ProgressSource::StartDate(date("2025-01-01"));
        assert_eq!(source.timeline(None).current_week, 1);
    }

    fn week(week: u32) -> WeekContent {
        WeekContent {
            week,
            size_label: format!("size {}", week),
            icon: "🍋".to_string(),
            milestones: Vec::new(),
            development_focus: Vec::new(),
        }
    }

    #[test]
    fn test_late_response_does_not_replace_newer_week() {
        let sequencer = RequestSequencer::default();
        let displayed = RefCell::new(None);

        let week_eight = sequencer.issue();
        let week_nine = sequencer.issue();

        assert!(accept_response(&sequencer, week_nine, &displayed, Some(week(9))));
        assert!(!accept_response(&sequencer, week_eight, &displayed, Some(week(8))));
        assert_eq!(displayed.borrow().as_ref().map(|c| c.week), Some(9));
    }

    #[test]
    fn test_current_response_applies_even_when_empty() {
        let sequencer = RequestSequencer::default();
        let displayed = RefCell::new(Some(week(8)));

        let ticket = sequencer.issue();
        assert!(accept_response(&sequencer, ticket, &displayed, None));
        assert!(displayed.borrow().is_none());
    }

    #[test]
    fn test_derive_state() {
        let timeline = PregnancyTimeline::from_week_day(20, 0);
        let state = PregnancyProgressState::derive(
            timeline,
            &WeekContentTable::builtin(),
            &RecommendationTable::builtin(),
            false,
        );

        assert_eq!(state.trimester_info.trimester, 2);
        assert_eq!(state.size_comparison.label, "a banana");
        assert_eq!(state.progress_percent, 133.0 / 280.0 * 100.0);
        assert_eq!(state.insights[0].title, "Baby can hear your voice");
        assert_eq!(state.recommendations[0], "Schedule your anatomy scan");
        assert_eq!(state.week_content.map(|c| c.week), Some(20));
    }

    #[test]
    fn test_derive_state_for_week_without_content() {
        let timeline = PregnancyTimeline::from_week_day(13, 2);
        let state = PregnancyProgressState::derive(
            timeline,
            &WeekContentTable::builtin(),
            &RecommendationTable::builtin(),
            true,
        );

        assert_eq!(state.size_comparison.label, "Growing beautifully");
        assert!(state.insights.is_empty());
        assert!(state.week_content.is_none());
        // nearest anchor to 13 is 12
        assert_eq!(state.recommendations[0], "Ask about first trimester screening");
        assert!(state.loading);
    }
}
