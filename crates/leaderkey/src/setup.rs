use crate::config::{self, ConfigStore, JsonFileStore};
use crate::last_command::CommandTracker;
use crate::Error;
use leaderkey_keyboard::KeyMap;
use log::info;
use std::sync::Arc;

/// Long-lived state shared by the menu, the launcher and the settings window.
pub struct AppState<S> {
    pub config: S,
    pub keymap: Arc<KeyMap>,
    pub last_command: Arc<CommandTracker>,
}

/// Build the application state from an already opened config store.
pub fn setup_app<S: ConfigStore>(config_store: S) -> Result<AppState<S>, Error> {
    info!("Leader Key v{}", env!("CARGO_PKG_VERSION"));

    let keymap = config::load_keymap(&config_store)?;
    info!("Keymap ready with {} entries", keymap.len());

    Ok(AppState {
        config: config_store,
        keymap: Arc::new(keymap),
        last_command: Arc::new(CommandTracker::new()),
    })
}

/// Start logging and build the application state from the config file in the
/// platform config directory.
pub fn setup_default() -> Result<AppState<JsonFileStore>, Error> {
    crate::log::init();

    let store = JsonFileStore::open_default()?;
    info!("Using config file {}", store.path().display());
    setup_app(store)
}
