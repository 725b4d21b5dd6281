use crate::config::MIN_FRAME_PERIOD;
use crate::layout::Dimensions;
use log::debug;
use std::io;
use std::time::Duration;
use tokio::sync::watch;

/// Current terminal size as reported by crossterm
pub fn terminal_size() -> io::Result<Dimensions> {
    let (columns, lines) = crossterm::terminal::size()?;
    Ok(Dimensions::new(lines as usize, columns as usize))
}

/// Samples the terminal size in the background and keeps only the latest change
pub struct TerminalWatcher {
    receiver: watch::Receiver<Dimensions>,
}

impl TerminalWatcher {
    /// Spawn a task sampling `source` every `period`.
    ///
    /// A failed sample counts as "no change". Periods shorter than
    /// `MIN_FRAME_PERIOD` are raised to it. The task ends once the watcher is
    /// dropped.
    pub fn start<F>(mut source: F, period: Duration) -> Self
    where
        F: FnMut() -> io::Result<Dimensions> + Send + 'static,
    {
        let initial = source().unwrap_or_default();
        let (sender, receiver) = watch::channel(initial);
        let period = period.max(MIN_FRAME_PERIOD);

        tokio::spawn(async move {
            let mut last = initial;
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if sender.is_closed() {
                    break;
                }
                match source() {
                    Ok(size) if size != last => {
                        debug!("Terminal resized to {}x{}", size.columns, size.lines);
                        last = size;
                        // overwrites a size the loop has not picked up yet
                        sender.send_replace(size);
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Terminal size unavailable: {}", e),
                }
            }
        });

        Self { receiver }
    }

    /// Start sampling the real terminal
    pub fn spawn(period: Duration) -> Self {
        Self::start(terminal_size, period)
    }

    /// A size that never changes; no task is spawned
    pub fn fixed(size: Dimensions) -> Self {
        let (_, receiver) = watch::channel(size);
        Self { receiver }
    }

    /// Most recently observed size
    pub fn current(&self) -> Dimensions {
        *self.receiver.borrow()
    }

    /// The latest size if it changed since the previous poll. Never blocks.
    pub fn poll(&mut self) -> Option<Dimensions> {
        match self.receiver.has_changed() {
            Ok(true) => Some(*self.receiver.borrow_and_update()),
            _ => None,
        }
    }
}
