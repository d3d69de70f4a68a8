use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] Arc<std::io::Error>),
    #[error("dependency file is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid config file: {0}")]
    Config(Arc<toml_edit::de::Error>),
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<toml_edit::de::Error> for Error {
    #[inline]
    fn from(err: toml_edit::de::Error) -> Self {
        Self::Config(Arc::new(err))
    }
}
