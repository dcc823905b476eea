pub mod use_celebrations;
pub mod use_pregnancy_progress;
pub mod use_scroll_animation;
