use serde_yaml::Mapping;
use std::fmt;

/// Key/value data carried by `Ok` and `Do` signals, merged into persisted state
pub type Payload = Mapping;

/// Category of an `Error` signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Navigation request to an unknown submenu id
    InvalidTarget,
    /// `Ok`/`Do` signal with no registered handler
    NoContext,
    /// Panel could not be laid out with the given style and size
    Layout,
    /// State persistence failed
    Storage,
    /// Malformed or unknown selection
    InputRead,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidTarget => "InvalidTargetError",
            ErrorKind::NoContext => "NoContextError",
            ErrorKind::Layout => "LayoutError",
            ErrorKind::Storage => "StorageError",
            ErrorKind::InputRead => "InputReadError",
        };
        f.write_str(name)
    }
}

/// Events flowing between submenus, the menu and the application
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Application-level acknowledgement, optionally carrying state to persist
    Ok(Option<Payload>),
    /// Request to run the action registered under `signature`
    Do {
        signature: String,
        payload: Option<Payload>,
    },
    /// Navigate to the submenu with the given uid
    SwitchSubmenu(String),
    /// Navigate back one step in the history
    ReturnToPrevious,
    /// Navigate to the root submenu
    ReturnToMain,
    /// Stop the menu and persist state
    Quit,
    /// Hand control to the abort handler
    Abort(String),
    /// Something went wrong; shown on the error panel
    Error {
        origin: String,
        kind: ErrorKind,
        message: String,
        trace: Option<String>,
    },
}

impl Signal {
    pub fn ok() -> Self {
        Signal::Ok(None)
    }

    pub fn ok_with(payload: Payload) -> Self {
        Signal::Ok(Some(payload))
    }

    /// `Do` signal for an option, signature `"<submenu>.<option>"`
    pub fn action(submenu: &str, option: &str) -> Self {
        Signal::Do {
            signature: signature(submenu, option),
            payload: None,
        }
    }

    pub fn switch_to(target: impl Into<String>) -> Self {
        Signal::SwitchSubmenu(target.into())
    }

    pub fn error(origin: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Signal::Error {
            origin: origin.into(),
            kind,
            message: message.into(),
            trace: None,
        }
    }

    /// Attach a trace to an `Error` signal; other variants are returned unchanged
    pub fn with_trace(self, trace: impl Into<String>) -> Self {
        match self {
            Signal::Error {
                origin,
                kind,
                message,
                ..
            } => Signal::Error {
                origin,
                kind,
                message,
                trace: Some(trace.into()),
            },
            other => other,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Signal::Error { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Signal::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Payload of an `Ok` or `Do` signal
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Signal::Ok(payload) | Signal::Do { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

/// Routing key of an action: `"<submenu>.<option>"`
pub fn signature(submenu: &str, option: &str) -> String {
    format!("{}.{}", submenu, option)
}
