use derive_more::{Display, From};

#[derive(Debug, Display, From)]
pub enum Error {
    #[from]
    Config(crate::config::ConfigError),

    #[from]
    Keymap(leaderkey_keyboard::KeymapError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Keymap(e) => Some(e),
        }
    }
}
