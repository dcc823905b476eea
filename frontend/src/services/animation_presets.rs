/// Emotional tone an animation is meant to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionalContext {
    Gentle,
    Joyful,
    Calm,
    Supportive,
    Celebratory,
    Attention,
}

impl EmotionalContext {
    pub const ALL: [EmotionalContext; 6] = [
        EmotionalContext::Gentle,
        EmotionalContext::Joyful,
        EmotionalContext::Calm,
        EmotionalContext::Supportive,
        EmotionalContext::Celebratory,
        EmotionalContext::Attention,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPreset {
    /// CSS animation name, applied as an `animate-{name}` class
    pub animation: &'static str,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: &'static str,
}

pub const EASE_OUT_SOFT: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";
pub const EASE_BOUNCE: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";
pub const EASE_IN_OUT: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// Entrance animation used when an element carries no animation metadata
pub const DEFAULT_ENTRANCE: AnimationPreset = AnimationPreset {
    animation: "fade-in-up",
    duration_ms: 600,
    delay_ms: 0,
    easing: EASE_OUT_SOFT,
};

pub fn preset_for(context: EmotionalContext) -> AnimationPreset {
    match context {
        EmotionalContext::Gentle => AnimationPreset {
            animation: "fade-in",
            duration_ms: 800,
            delay_ms: 0,
            easing: EASE_OUT_SOFT,
        },
        EmotionalContext::Joyful => AnimationPreset {
            animation: "bounce-in",
            duration_ms: 600,
            delay_ms: 0,
            easing: EASE_BOUNCE,
        },
        EmotionalContext::Calm => AnimationPreset {
            animation: "fade-in-up",
            duration_ms: 1000,
            delay_ms: 100,
            easing: EASE_IN_OUT,
        },
        EmotionalContext::Supportive => AnimationPreset {
            animation: "slide-in-left",
            duration_ms: 700,
            delay_ms: 50,
            easing: EASE_OUT_SOFT,
        },
        EmotionalContext::Celebratory => AnimationPreset {
            animation: "scale-in",
            duration_ms: 500,
            delay_ms: 0,
            easing: EASE_BOUNCE,
        },
        EmotionalContext::Attention => AnimationPreset {
            animation: "pulse",
            duration_ms: 400,
            delay_ms: 0,
            easing: EASE_IN_OUT,
        },
    }
}
