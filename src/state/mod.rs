// Persisted application state

mod store;

pub use store::YamlState;

use crate::menu::{Payload, Result};

/// Application state that outlives a run
pub trait StateStore {
    /// Merge `payload` into the current state
    fn update(&mut self, payload: &Payload);

    /// Write the state to its backing storage
    fn save(&mut self) -> Result<()>;
}
