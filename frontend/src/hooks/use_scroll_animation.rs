use web_sys::HtmlElement;
use yew::prelude::*;

use crate::services::scroll_animator::WebScrollAnimator;

/// Register the referenced element with the app's scroll animator while the
/// component is mounted. Does nothing without an animator in context.
#[hook]
pub fn use_scroll_animation(node: NodeRef) {
    let animator = use_context::<WebScrollAnimator>();

    use_effect_with(node, move |node| {
        let element = node.cast::<HtmlElement>();
        if let (Some(animator), Some(element)) = (&animator, &element) {
            animator.observe(element);
        }

        move || {
            if let (Some(animator), Some(element)) = (animator, element) {
                animator.unobserve(&element);
            }
        }
    });
}
