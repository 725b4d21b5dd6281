// Submenus, signals and the navigation engine

pub mod engine;
pub mod error;
pub mod error_panel;
pub mod signal;
pub mod submenu;

pub use engine::{AbortHandler, Menu, MenuState};
pub use error::{MenuError, Result};
pub use error_panel::ErrorPanel;
pub use signal::{ErrorKind, Payload, Signal};
pub use submenu::{MenuOption, OptionTarget, Submenu};
