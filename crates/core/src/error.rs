use thiserror::Error;

/// Errors raised while preparing a scan.
///
/// Nothing inside a scan itself is fatal; these only surface from setup
/// steps such as reading the configuration document.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
        }
    }
}
