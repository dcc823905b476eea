pub mod animation_presets;
pub mod api;
pub mod avatar;
pub mod celebration;
pub mod content;
pub mod date_utils;
pub mod logging;
pub mod pregnancy;
pub mod scroll_animator;
