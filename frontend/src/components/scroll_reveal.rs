use yew::prelude::*;

use crate::hooks::use_scroll_animation::use_scroll_animation;
use crate::services::animation_presets::{preset_for, EmotionalContext};

/// Wraps children in a block that animates in the first time it scrolls into view.
///
/// Explicit `animation`/`delay_ms`/`duration_ms` win over the preset picked by `mood`.
#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    pub children: Children,
    #[prop_or_default]
    pub mood: Option<EmotionalContext>,
    #[prop_or_default]
    pub animation: Option<AttrValue>,
    #[prop_or_default]
    pub delay_ms: Option<u32>,
    #[prop_or_default]
    pub duration_ms: Option<u32>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    let node = use_node_ref();
    use_scroll_animation(node.clone());

    let preset = props.mood.map(preset_for);
    let animation = props
        .animation
        .clone()
        .or_else(|| preset.map(|p| AttrValue::from(p.animation)));
    let delay_ms = props.delay_ms.or(preset.map(|p| p.delay_ms));
    let duration_ms = props.duration_ms.or(preset.map(|p| p.duration_ms));
    let style = preset.map(|p| format!("animation-timing-function: {};", p.easing));

    html! {
        <div
            ref={node}
            class={classes!("scroll-reveal", props.class.clone())}
            {style}
            data-animation={animation}
            data-animation-delay={delay_ms.map(|d| d.to_string())}
            data-animation-duration={duration_ms.map(|d| d.to_string())}
        >
            { for props.children.iter() }
        </div>
    }
}
