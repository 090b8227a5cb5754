//! CLOMonitor CLI
//!
//! プロジェクト健全性カタログのAPIを端末から使うためのクライアント

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod prefs;
pub mod render;
