//! 画面

pub mod home;
pub mod not_found;
pub mod project;
pub mod report;
pub mod search;
pub mod stats;
