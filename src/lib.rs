pub mod config;
pub mod context;
pub mod layout;
pub mod menu;
pub mod state;
pub mod ui;
