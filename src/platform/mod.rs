//! Platform abstraction layer
//!
//! Handles browser/native differences for logging and panic reporting.
//! Storage differences live in `persistence`.

/// Install the logger for this platform (env_logger natively, console on the web)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
