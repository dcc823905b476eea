use shared::{PregnancyTimeline, WeekContent, MAX_PREGNANCY_WEEK};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::scroll_reveal::ScrollReveal;
use crate::services::api::ApiClient;
use crate::services::content::ContentService;
use crate::services::pregnancy::trimester_info;

#[derive(Properties, PartialEq)]
pub struct WeekTimelineProps {
    pub content: ContentService<ApiClient>,
    pub current_week: u32,
}

/// Scrollable list of every week with content, highlighting the current one
#[function_component(WeekTimeline)]
pub fn week_timeline(props: &WeekTimelineProps) -> Html {
    let weeks = use_state(|| props.content.cached_weeks());
    let loading = use_state(|| false);

    {
        let content = props.content.clone();
        let weeks = weeks.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                loading.set(true);
                let fetched = content.fetch_week_range(1, MAX_PREGNANCY_WEEK).await;
                if !fetched.is_empty() {
                    weeks.set(fetched);
                }
                loading.set(content.is_loading());
            });
            || ()
        });
    }

    let render_week = |entry: &WeekContent| {
        let trimester = trimester_info(PregnancyTimeline::trimester_for_week(entry.week));
        let is_current = entry.week == props.current_week;
        html! {
            <ScrollReveal class={classes!("timeline-week", is_current.then_some("current"))}>
                <span class="timeline-week-number" style={format!("color: {};", trimester.colors.accent)}>
                    {format!("Week {}", entry.week)}
                </span>
                <span class="timeline-week-size">{format!("{} {}", entry.icon, entry.size_label)}</span>
            </ScrollReveal>
        }
    };

    html! {
        <section class="week-timeline">
            if *loading && weeks.is_empty() {
                <p class="loading-indicator">{"Loading weeks..."}</p>
            } else if weeks.is_empty() {
                <p class="timeline-empty">{"We couldn't load the week-by-week guide right now."}</p>
            } else {
                { for weeks.iter().map(render_week) }
            }
        </section>
    }
}
