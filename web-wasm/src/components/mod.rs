//! UIコンポーネント

pub mod filters;
pub mod header;
pub mod loading;
pub mod modal;
pub mod pagination;
pub mod progress_bar;
pub mod project_card;
pub mod score_badge;
pub mod search_settings;
pub mod snapshot_selector;
pub mod theme_switcher;
