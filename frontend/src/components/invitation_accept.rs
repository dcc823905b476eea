use shared::InvitationDetails;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::avatar::Avatar;
use crate::hooks::use_celebrations::use_celebrations;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct InvitationAcceptProps {
    pub api_client: ApiClient,
    pub token: AttrValue,
    #[prop_or_default]
    pub on_accepted: Callback<InvitationDetails>,
}

#[derive(Clone, PartialEq)]
enum InvitationStatus {
    Loading,
    Ready(InvitationDetails),
    Accepting(InvitationDetails),
    Accepted { family_name: String },
    Failed(&'static str),
}

#[function_component(InvitationAccept)]
pub fn invitation_accept(props: &InvitationAcceptProps) -> Html {
    let status = use_state(|| InvitationStatus::Loading);
    let celebrations = use_celebrations();
    let logger = use_memo((), |_| Logger::new("invitation-accept"));

    // Load invitation details whenever the token changes
    {
        let api_client = props.api_client.clone();
        let status = status.clone();
        let logger = logger.clone();

        use_effect_with(props.token.clone(), move |token| {
            let token = token.to_string();
            status.set(InvitationStatus::Loading);
            spawn_local(async move {
                match api_client.get_invitation(&token).await {
                    Ok(details) => status.set(InvitationStatus::Ready(details)),
                    Err(e) => {
                        logger.warn(&format!("Failed to load invitation: {}", e));
                        status.set(InvitationStatus::Failed(e.user_message()));
                    }
                }
            });
            || ()
        });
    }

    let on_accept = {
        let api_client = props.api_client.clone();
        let token = props.token.clone();
        let status = status.clone();
        let celebrations = celebrations.clone();
        let on_accepted = props.on_accepted.clone();
        let logger = logger.clone();

        Callback::from(move |_: MouseEvent| {
            let InvitationStatus::Ready(details) = (*status).clone() else {
                return;
            };
            let api_client = api_client.clone();
            let token = token.to_string();
            let status = status.clone();
            let celebrations = celebrations.clone();
            let on_accepted = on_accepted.clone();
            let logger = logger.clone();

            status.set(InvitationStatus::Accepting(details.clone()));
            spawn_local(async move {
                match api_client.accept_invitation(&token).await {
                    Ok(response) => {
                        logger.info(&format!("Joined family {}", response.family_id));
                        status.set(InvitationStatus::Accepted {
                            family_name: details.family_name.clone(),
                        });
                        celebrations.celebrate_milestone(None);
                        on_accepted.emit(details);
                    }
                    Err(e) => {
                        logger.warn(&format!("Failed to accept invitation: {}", e));
                        status.set(InvitationStatus::Failed(e.user_message()));
                    }
                }
            });
        })
    };

    let body = match &*status {
        InvitationStatus::Loading => html! {
            <p class="invitation-loading">{"Loading your invitation..."}</p>
        },
        InvitationStatus::Ready(details) | InvitationStatus::Accepting(details) => {
            let accepting = matches!(&*status, InvitationStatus::Accepting(_));
            let inviter_name = details
                .inviter
                .display_name
                .clone()
                .or_else(|| details.inviter.first_name.clone())
                .unwrap_or_else(|| "Someone special".to_string());
            html! {
                <>
                    <Avatar user={details.inviter.clone()} size={56} />
                    <h2>{format!("{} invited you to join {}", inviter_name, details.family_name)}</h2>
                    <p class="invitation-role">{format!("You'll join as: {}", details.role)}</p>
                    <button type="button" class="accept-button" disabled={accepting} onclick={on_accept}>
                        {if accepting { "Joining..." } else { "Accept invitation" }}
                    </button>
                </>
            }
        }
        InvitationStatus::Accepted { family_name } => html! {
            <p class="invitation-success">{format!("Welcome to {}! 💕", family_name)}</p>
        },
        InvitationStatus::Failed(message) => html! {
            <p class="invitation-error" role="alert">{*message}</p>
        },
    };

    html! {
        <section class="invitation-accept">
            {body}
        </section>
    }
}
