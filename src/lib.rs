#![recursion_limit = "512"]
// lib.rs - Root module for the shop_admin application
//
// The web_app module holds the whole application; this file only adds the
// WASM hydration entry used by cargo-leptos.

pub mod web_app;

cfg_if::cfg_if! {
    if #[cfg(feature = "hydrate")] {
        use wasm_bindgen::prelude::wasm_bindgen;

        /// WASM entry point: take over the server-rendered page.
        #[wasm_bindgen]
        pub fn hydrate() {
            console_error_panic_hook::set_once();
            leptos::mount::hydrate_body(crate::web_app::App);
        }
    }
}
