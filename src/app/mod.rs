mod app;
mod config;
mod gui_pages;
mod gui_panels;
mod theme;

pub use app::MakerApp;
pub use config::{MakerConfig, load_cfg};
pub use theme::apply_monster_maker_theme;
