use super::signal::{ErrorKind, Signal};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Invalid target submenu: {0}")]
    InvalidTarget(String),

    #[error("No context registered to handle {0}")]
    NoContext(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    InputRead(String),
}

impl MenuError {
    /// The signal-level category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::InvalidTarget(_) => ErrorKind::InvalidTarget,
            MenuError::NoContext(_) => ErrorKind::NoContext,
            MenuError::Layout(_) => ErrorKind::Layout,
            MenuError::Storage(_) | MenuError::Io(_) | MenuError::Yaml(_) => ErrorKind::Storage,
            MenuError::InputRead(_) => ErrorKind::InputRead,
        }
    }

    /// Convert into an `Error` signal raised by `origin`
    pub fn into_signal(self, origin: &str) -> Signal {
        Signal::error(origin, self.kind(), self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_storage_errors() {
        let err: MenuError = std::io::Error::other("disk full").into();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_into_signal_keeps_origin_and_kind() {
        let signal = MenuError::InvalidTarget("nowhere".to_string()).into_signal("main");
        match signal {
            Signal::Error {
                origin,
                kind,
                message,
                trace,
            } => {
                assert_eq!(origin, "main");
                assert_eq!(kind, ErrorKind::InvalidTarget);
                assert!(message.contains("nowhere"));
                assert!(trace.is_none());
            }
            other => panic!("expected error signal, got {:?}", other),
        }
    }
}
