mod config;

pub use config::{Config, Settings, MIN_FRAME_PERIOD};
