/// Installs the process-wide logger
///
/// Logs go to stderr. Level is Debug in development builds and Info in
/// production builds; `RUST_LOG` overrides both.
///
/// Calling it more than once is harmless, so tests can call it freely.
pub fn init() {
    let default_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
