mod components;
mod config;
mod hooks;
mod services;

use shared::{InvitationDetails, UserProfile};
use yew::prelude::*;

use components::header::Header;
use components::invitation_accept::InvitationAccept;
use components::progress_tracker::ProgressTracker;
use components::tabs::{TabPanel, TabTrigger, Tabs};
use components::week_timeline::WeekTimeline;
use config::AppConfig;
use hooks::use_pregnancy_progress::ProgressSource;
use services::api::ApiClient;
use services::celebration::CelebrationEffects;
use services::content::ContentService;
use services::date_utils;
use services::logging::Logger;
use services::scroll_animator::WebScrollAnimator;

const TAB_PROGRESS: &str = "progress";
const TAB_TIMELINE: &str = "timeline";

/// Percent-decoded value of `name` in a `?a=b&c=d` query string
fn query_param(search: &str, name: &str) -> Option<String> {
    web_sys::UrlSearchParams::new_with_str(search)
        .ok()?
        .get(name)
        .filter(|value| !value.is_empty())
}

fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn progress_source(start: Option<&str>, week: Option<&str>) -> ProgressSource {
    if let Some(start) = start.and_then(date_utils::parse_date_string) {
        return ProgressSource::StartDate(start);
    }
    let week = week.and_then(|w| w.trim().parse().ok()).unwrap_or(1);
    ProgressSource::WeekDay { week, day: 0 }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_env());
    let logger = use_memo((), |_| Logger::new("app"));
    let api_client = {
        let base_url = config.api_base_url.clone();
        use_memo((), move |_| ApiClient::with_base_url(base_url))
    };
    let content = {
        let api_client = (*api_client).clone();
        let logger = logger.for_component("content");
        use_memo((), move |_| ContentService::new(api_client, logger))
    };
    let celebrations = {
        let logger = logger.for_component("celebration");
        use_memo((), move |_| CelebrationEffects::new(logger))
    };
    let scroll_animator = {
        let scroll_config = config.scroll.clone();
        use_memo((), move |_| WebScrollAnimator::new(&scroll_config))
    };

    let search = use_memo((), |_| location_search());
    let invite_token = query_param(&search, "invite");
    let source = progress_source(
        query_param(&search, "start").as_deref(),
        query_param(&search, "week").as_deref(),
    );
    let current_week = source.timeline(date_utils::today()).current_week;

    let selected_tab = use_state(|| AttrValue::from(TAB_PROGRESS));
    let on_select_tab = {
        let selected_tab = selected_tab.clone();
        Callback::from(move |value: AttrValue| selected_tab.set(value))
    };

    let members = use_state(Vec::<UserProfile>::new);
    let on_invitation_accepted = {
        let members = members.clone();
        let logger = logger.clone();
        Callback::from(move |details: InvitationDetails| {
            logger.info(&format!("Invitation to {} accepted", details.family_name));
            let mut next = (*members).clone();
            next.push(details.inviter);
            members.set(next);
        })
    };

    // Effects without an explicit container land in <main>. The intersection
    // observer and any live effects are torn down on unmount.
    let main_ref = use_node_ref();
    {
        let scroll_animator = scroll_animator.clone();
        let celebrations = celebrations.clone();
        let main_ref = main_ref.clone();
        use_effect_with((), move |_| {
            celebrations.set_default_container(main_ref.cast::<web_sys::Element>());
            move || {
                celebrations.set_default_container(None);
                scroll_animator.disconnect();
                celebrations.clear();
            }
        });
    }

    let selected = (*selected_tab).clone();

    html! {
        <ContextProvider<CelebrationEffects> context={(*celebrations).clone()}>
            <ContextProvider<WebScrollAnimator> context={(*scroll_animator).clone()}>
                <Header members={(*members).clone()} />
                <main class="container" ref={main_ref}>
                    if let Some(token) = invite_token {
                        <InvitationAccept
                            api_client={(*api_client).clone()}
                            token={AttrValue::from(token)}
                            on_accepted={on_invitation_accepted}
                        />
                    }
                    <Tabs>
                        <TabTrigger value={TAB_PROGRESS} selected={selected.clone()} on_select={on_select_tab.clone()}>
                            {"This week"}
                        </TabTrigger>
                        <TabTrigger value={TAB_TIMELINE} selected={selected.clone()} on_select={on_select_tab}>
                            {"Week by week"}
                        </TabTrigger>
                    </Tabs>
                    <TabPanel value={TAB_PROGRESS} selected={selected.clone()}>
                        <ProgressTracker content={(*content).clone()} source={source} />
                    </TabPanel>
                    <TabPanel value={TAB_TIMELINE} selected={selected}>
                        <WeekTimeline content={(*content).clone()} {current_week} />
                    </TabPanel>
                </main>
            </ContextProvider<WebScrollAnimator>>
        </ContextProvider<CelebrationEffects>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_source_from_query_values() {
        assert_eq!(
            progress_source(Some("2025-03-01"), None),
            ProgressSource::StartDate(date_utils::parse_date_string("2025-03-01").unwrap())
        );
        assert_eq!(progress_source(None, Some("14")), ProgressSource::WeekDay { week: 14, day: 0 });
        assert_eq!(progress_source(Some("garbage"), None), ProgressSource::WeekDay { week: 1, day: 0 });
        assert_eq!(progress_source(None, None), ProgressSource::WeekDay { week: 1, day: 0 });
    }
}
