// Terminal I/O, background watchers and the render loop

pub mod app;
pub mod input;
pub mod terminal;
pub mod watcher;

pub use app::Application;
pub use input::InputWatcher;
pub use watcher::TerminalWatcher;
