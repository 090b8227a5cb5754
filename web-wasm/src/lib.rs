//! CLOMonitor Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod download;
mod format;
pub mod logging;
mod router;
mod state;
pub mod storage;
pub mod theme;
mod views;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
