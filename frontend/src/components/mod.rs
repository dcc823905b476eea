pub mod avatar;
pub mod header;
pub mod invitation_accept;
pub mod progress_tracker;
pub mod scroll_reveal;
pub mod tabs;
pub mod week_timeline;
