use yew::prelude::*;

use crate::services::celebration::CelebrationEffects;
use crate::services::logging::Logger;

/// The app-wide celebration effects, or a private instance when rendered
/// outside the provider
#[hook]
pub fn use_celebrations() -> CelebrationEffects {
    let from_context = use_context::<CelebrationEffects>();
    let fallback = use_memo((), |_| CelebrationEffects::new(Logger::new("celebration")));

    from_context.unwrap_or_else(|| (*fallback).clone())
}
