use super::Context;
use crate::menu::signal::{signature, ErrorKind, Signal};
use log::debug;
use std::collections::HashMap;

/// Application callback run when its option is chosen
pub type Callback = Box<dyn FnMut(&Signal) -> Option<Signal>>;

/// Registry of callbacks keyed by action signature (`"<submenu>.<option>"`)
#[derive(Default)]
pub struct Executors {
    callbacks: HashMap<String, Callback>,
}

impl Executors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for option `option` of submenu `submenu`.
    /// A later registration for the same option replaces the earlier one.
    pub fn add<F>(&mut self, submenu: &str, option: &str, callback: F)
    where
        F: FnMut(&Signal) -> Option<Signal> + 'static,
    {
        self.callbacks
            .insert(signature(submenu, option), Box::new(callback));
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.callbacks.contains_key(signature)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl Context for Executors {
    fn dispatch(&mut self, signal: &Signal) -> Option<Signal> {
        match signal {
            Signal::Do { signature, .. } => match self.callbacks.get_mut(signature) {
                Some(callback) => {
                    debug!("Running executor {}", signature);
                    callback(signal)
                }
                None => Some(Signal::error(
                    "executors",
                    ErrorKind::NoContext,
                    format!("No executor registered for {}", signature),
                )),
            },
            // acknowledgements go straight back so their payload is persisted
            Signal::Ok(_) => Some(signal.clone()),
            _ => None,
        }
    }
}
