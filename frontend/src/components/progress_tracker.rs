use shared::{PregnancyTimeline, MAX_PREGNANCY_WEEK};
use yew::prelude::*;

use crate::components::scroll_reveal::ScrollReveal;
use crate::hooks::use_celebrations::use_celebrations;
use crate::hooks::use_pregnancy_progress::{use_pregnancy_progress, ProgressSource};
use crate::services::api::ApiClient;
use crate::services::content::ContentService;
use crate::services::animation_presets::EmotionalContext;
use crate::services::date_utils::{format_date_for_display, format_week_day};

const PREFETCH_WEEKS: u32 = 4;

#[derive(Properties, PartialEq)]
pub struct ProgressTrackerProps {
    pub content: ContentService<ApiClient>,
    pub source: ProgressSource,
}

#[function_component(ProgressTracker)]
pub fn progress_tracker(props: &ProgressTrackerProps) -> Html {
    let progress = use_pregnancy_progress(&props.content, props.source.clone());
    let celebrations = use_celebrations();
    let card_ref = use_node_ref();
    let state = progress.state;

    // Prefetch the next few weeks so the timeline is ready when opened
    {
        let fetch_week_range = progress.actions.fetch_week_range.clone();
        use_effect_with(state.timeline.current_week, move |week| {
            if *week < MAX_PREGNANCY_WEEK {
                fetch_week_range.emit((*week + 1, (*week + PREFETCH_WEEKS).min(MAX_PREGNANCY_WEEK)));
            }
            || ()
        });
    }

    let on_celebrate = {
        let celebrations = celebrations.clone();
        let card_ref = card_ref.clone();
        Callback::from(move |_: MouseEvent| {
            celebrations.celebrate_milestone(card_ref.cast::<web_sys::Element>());
        })
    };

    let trimester = state.trimester_info;
    let bar_style = format!("width: {:.1}%; background-color: {};", state.progress_percent, trimester.colors.accent);
    let card_style = format!("background-color: {};", trimester.colors.secondary);
    let caption = if state.timeline.is_overdue() {
        "Any day now! 💕".to_string()
    } else {
        format!(
            "{:.0}% of the way there · {} days to go",
            state.progress_percent,
            state.timeline.days_remaining()
        )
    };
    let due_date = match &props.source {
        ProgressSource::StartDate(start) => Some(format_date_for_display(PregnancyTimeline::due_date(*start))),
        ProgressSource::WeekDay { .. } => None,
    };

    html! {
        <section class="progress-tracker" ref={card_ref} style={card_style}>
            <header class="progress-header">
                <h2>{format_week_day(state.timeline.current_week, state.timeline.current_day)}</h2>
                <span class="trimester-badge" style={format!("color: {};", trimester.colors.accent)}>
                    {trimester.name}
                </span>
                if state.loading {
                    <span class="loading-indicator">{"Loading..."}</span>
                }
            </header>

            <div class="progress-bar" role="progressbar" aria-valuemin="0" aria-valuemax="100"
                aria-valuenow={format!("{:.0}", state.progress_percent)}>
                <div class="progress-bar-fill" style={bar_style}></div>
            </div>
            <p class="progress-caption">{caption}</p>
            if let Some(due_date) = due_date {
                <p class="due-date">{format!("Due {}", due_date)}</p>
            }

            <ScrollReveal class={classes!("size-comparison")} mood={EmotionalContext::Joyful}>
                <span class="size-icon">{state.size_comparison.icon.clone()}</span>
                <span class="size-label">{format!("Baby is about the size of {}", state.size_comparison.label)}</span>
            </ScrollReveal>

            <ScrollReveal class={classes!("trimester-card")} mood={EmotionalContext::Calm}>
                <h3>{trimester.name}</h3>
                <p>{trimester.description}</p>
                <ul class="trimester-symptoms">
                    { for trimester.symptoms.iter().map(|s| html! { <li>{*s}</li> }) }
                </ul>
            </ScrollReveal>

            if !state.insights.is_empty() {
                <ScrollReveal class={classes!("insights")} mood={EmotionalContext::Gentle} delay_ms={200u32}>
                    <h3>{"This week"}</h3>
                    <ul>
                        { for state.insights.iter().map(|insight| html! {
                            <li class={classes!("insight", insight.category.as_str(), insight.priority.as_str())}>
                                {insight.title.clone()}
                            </li>
                        }) }
                    </ul>
                </ScrollReveal>
            }

            <ScrollReveal class={classes!("recommendations")} mood={EmotionalContext::Supportive} delay_ms={300u32}>
                <h3>{"Recommendations"}</h3>
                <ul>
                    { for state.recommendations.iter().map(|r| html! { <li>{r.clone()}</li> }) }
                </ul>
            </ScrollReveal>

            <button type="button" class="celebrate-button" onclick={on_celebrate}>
                {"Celebrate this week 🎉"}
            </button>
        </section>
    }
}
