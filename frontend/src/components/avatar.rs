use shared::UserProfile;
use yew::prelude::*;

use crate::services::avatar::{color_for, initials_for};

#[derive(Properties, PartialEq)]
pub struct AvatarProps {
    pub user: UserProfile,
    #[prop_or(40)]
    pub size: u32,
}

#[function_component(Avatar)]
pub fn avatar(props: &AvatarProps) -> Html {
    let color = color_for(props.user.id.as_deref());
    let initials = initials_for(&props.user);
    let style = format!(
        "background-color: {}; width: {size}px; height: {size}px; font-size: {}px;",
        color,
        props.size * 2 / 5,
        size = props.size
    );
    let title = props
        .user
        .display_name
        .clone()
        .or_else(|| props.user.first_name.clone())
        .unwrap_or_default();

    html! {
        <div class="avatar" {style} {title} aria-hidden="true">
            <span class="avatar-initials">{initials}</span>
        </div>
    }
}
