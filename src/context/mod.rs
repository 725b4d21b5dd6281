// Routing of application actions to user callbacks

mod executors;

pub use executors::{Callback, Executors};

use crate::menu::Signal;

/// Receives every `Ok`/`Do` signal the menu cannot handle itself
pub trait Context {
    /// Handle `signal`, optionally answering with another signal.
    /// An `Ok` answer carrying a payload is merged into persisted state.
    fn dispatch(&mut self, signal: &Signal) -> Option<Signal>;
}
