use log::{debug, warn};
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::thread;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;

/// Reads selections in the background, but only while the input window is open.
///
/// The window is a shared readiness flag: the reader waits for it before
/// starting each read and hands every line over through a one-slot queue. A
/// line arriving while the slot is still full is dropped.
///
/// Closing the window does not cancel a read that is already in progress.
/// Such a read still completes after the window closes and its line is picked
/// up by a later poll, possibly after the screen has been redrawn. Stdin reads
/// cannot be interrupted portably, so this race is accepted.
pub struct InputWatcher {
    ready: watch::Sender<bool>,
    lines: mpsc::Receiver<String>,
}

impl InputWatcher {
    /// Spawn a task reading lines from `reader`. The task ends at end of input
    /// or once the watcher is dropped.
    pub fn start<R>(mut reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (ready, mut gate) = watch::channel(false);
        let (sender, lines) = mpsc::channel(1);

        tokio::spawn(async move {
            loop {
                let opened = gate.wait_for(|ready| *ready).await.map(|_| ()).is_ok();
                if !opened {
                    break;
                }

                let mut line = String::new();
                let read = reader.read_line(&mut line).await;
                if !deliver(&sender, read, line) {
                    break;
                }
            }
        });

        Self { ready, lines }
    }

    /// Read lines from a blocking `reader` on a dedicated thread.
    ///
    /// The thread is detached: a read that never returns does not hold up
    /// runtime shutdown and simply ends with the process. Must be called from
    /// within a tokio runtime.
    pub fn start_blocking<R>(mut reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (ready, mut gate) = watch::channel(false);
        let (sender, lines) = mpsc::channel(1);
        let runtime = Handle::current();

        thread::spawn(move || {
            loop {
                if runtime.block_on(gate.wait_for(|ready| *ready)).is_err() {
                    break;
                }

                let mut line = String::new();
                let read = reader.read_line(&mut line);
                if !deliver(&sender, read, line) {
                    break;
                }
            }
        });

        Self { ready, lines }
    }

    /// Read selections from standard input
    pub fn spawn() -> Self {
        Self::start_blocking(BufReader::new(io::stdin()))
    }

    /// Let the reader start a read
    pub fn open(&self) {
        self.ready.send_replace(true);
    }

    /// Stop the reader from starting new reads
    pub fn close(&self) {
        self.ready.send_replace(false);
    }

    pub fn is_open(&self) -> bool {
        *self.ready.borrow()
    }

    /// Next delivered line, if any. Never blocks.
    pub fn poll(&mut self) -> Option<String> {
        self.lines.try_recv().ok()
    }
}

/// Hand one read over to the loop. Returns false once reading should stop.
fn deliver(sender: &mpsc::Sender<String>, read: io::Result<usize>, line: String) -> bool {
    match read {
        Ok(0) => {
            debug!("Input closed");
            false
        }
        Ok(_) => match sender.try_send(line.trim_end().to_string()) {
            Ok(()) => true,
            Err(TrySendError::Full(line)) => {
                debug!("Dropping input {:?}, previous one not consumed", line);
                true
            }
            Err(TrySendError::Closed(_)) => false,
        },
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            warn!("Discarding unreadable input: {}", e);
            true
        }
        Err(e) => {
            warn!("Input read failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    /// Blocks every read until the paired sender is dropped
    struct Stalled(std_mpsc::Receiver<()>);

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    async fn poll_within(watcher: &mut InputWatcher, millis: u64) -> Option<String> {
        for _ in 0..millis {
            if let Some(line) = watcher.poll() {
                return Some(line);
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_closed_window_reads_nothing() {
        let mut watcher = InputWatcher::start(&b"3\n"[..]);
        assert!(!watcher.is_open());
        assert_eq!(poll_within(&mut watcher, 20).await, None);
    }

    #[tokio::test]
    async fn test_open_window_delivers_trimmed_line() {
        let mut watcher = InputWatcher::start(&b"3\r\n"[..]);
        watcher.open();
        assert_eq!(poll_within(&mut watcher, 500).await, Some("3".to_string()));
    }

    #[tokio::test]
    async fn test_line_waits_for_window() {
        let mut watcher = InputWatcher::start(&b"7\n"[..]);
        assert_eq!(poll_within(&mut watcher, 10).await, None);

        watcher.open();
        assert_eq!(poll_within(&mut watcher, 500).await, Some("7".to_string()));
        watcher.close();
        assert!(!watcher.is_open());
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let mut watcher = InputWatcher::start(&b""[..]);
        watcher.open();
        assert_eq!(poll_within(&mut watcher, 20).await, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_blocking_reader_delivers_line() {
        let mut watcher = InputWatcher::start_blocking(&b"4\n"[..]);
        assert_eq!(poll_within(&mut watcher, 10).await, None);

        watcher.open();
        assert_eq!(poll_within(&mut watcher, 500).await, Some("4".to_string()));
    }

    #[test]
    fn test_pending_read_does_not_block_shutdown() {
        let (_stall_guard, stall) = std_mpsc::channel::<()>();
        let (finished, done) = std_mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let watcher = InputWatcher::start_blocking(BufReader::new(Stalled(stall)));
                watcher.open();
                tokio::time::sleep(Duration::from_millis(50)).await;
                watcher.close();
            });
            drop(runtime);
            let _ = finished.send(());
        });

        assert!(done.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
