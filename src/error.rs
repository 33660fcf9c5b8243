use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The drawing surface could not be acquired; nothing can be rendered
    #[error("drawing surface unavailable: {0}")]
    Surface(#[source] io::Error),
    #[error("invalid arguments: {0}")]
    Args(#[from] getopts::Fail),
    #[error("invalid value {value:?} for option --{name}")]
    InvalidOption { name: &'static str, value: String },
    #[error("--{0} cannot be combined with --{1}")]
    Conflict(&'static str, &'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn invalid_option<S: Into<String>>(name: &'static str, value: S) -> Self {
        Self::InvalidOption {
            name,
            value: value.into(),
        }
    }
}
