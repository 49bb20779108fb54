// TUI widget modules for each dashboard panel.

pub mod competition;
pub mod input_panel;
pub mod niche;
pub mod quit_confirm;
pub mod ranking;
pub mod sources;
pub mod status_bar;
pub mod trending;
