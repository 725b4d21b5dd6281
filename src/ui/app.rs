use super::input::InputWatcher;
use super::terminal;
use super::watcher::TerminalWatcher;
use crate::config::Settings;
use crate::layout::Dimensions;
use crate::menu::{Menu, MenuError, Signal};
use anyhow::Result;
use log::{error, info, warn};
use std::io::Write;
use std::time::Duration;

/// Foreground render loop driving a `Menu`
pub struct Application {
    menu: Menu,
    input_window: Duration,
    needs_initial_render: bool,
    needs_redraw: bool,
}

impl Application {
    pub fn new(menu: Menu, settings: &Settings) -> Self {
        Self {
            menu,
            input_window: settings.input_window(),
            needs_initial_render: true,
            needs_redraw: false,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Check if the application should keep running
    pub fn is_running(&self) -> bool {
        self.menu.is_running()
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_initial_render || self.needs_redraw
    }

    /// Adopt a new terminal size and schedule a redraw
    pub fn handle_resize(&mut self, size: Dimensions) {
        info!("Screen size changed to {}x{}", size.columns, size.lines);
        self.menu.update_screen_size(size.lines, size.columns);
        self.needs_redraw = true;
    }

    /// Interpret one line typed by the user
    pub fn handle_input(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let selection = line
            .parse::<u32>()
            .map_err(|_| MenuError::InputRead(format!("{:?} is not an option number", line)))
            .and_then(|index| self.menu.select(index));

        match selection {
            Ok(signal) => self.handle_signal(signal),
            Err(e) => {
                // discard and prompt again
                warn!("{}", e);
                self.needs_redraw = true;
            }
        }
    }

    pub fn handle_signal(&mut self, signal: Signal) {
        self.menu.handle_signal(signal);
        if self.menu.needs_redraw() {
            self.needs_redraw = true;
        }
    }

    /// Draw the current frame if anything changed since the last one
    pub fn redraw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !self.needs_redraw() {
            return Ok(());
        }
        self.needs_initial_render = false;
        self.needs_redraw = false;

        match self.menu.render() {
            Ok(frame) => terminal::draw(out, &frame)?,
            Err(e) => {
                // shown once the next size change or selection redraws
                error!("Rendering {} failed: {}", self.menu.current().uid(), e);
                let origin = self.menu.current().uid().to_string();
                self.menu.handle_signal(e.into_signal(&origin));
            }
        }
        Ok(())
    }

    /// Run until the menu stops, then save state.
    ///
    /// Each iteration picks up a pending resize, redraws if needed, keeps the
    /// input window open for a moment and applies any line that arrived. A
    /// resize seen together with a line is redrawn before the line applies.
    /// Ctrl-C is handled like a `Quit` selection.
    pub async fn run<W: Write>(
        &mut self,
        out: &mut W,
        mut screen: TerminalWatcher,
        mut input: InputWatcher,
    ) -> Result<()> {
        self.menu
            .update_screen_size(screen.current().lines, screen.current().columns);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while self.is_running() {
            if let Some(size) = screen.poll() {
                input.close();
                self.handle_resize(size);
            }

            self.redraw(out)?;

            input.open();
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    self.handle_signal(Signal::Quit);
                }
                _ = tokio::time::sleep(self.input_window) => {}
            }
            input.close();

            if let Some(line) = input.poll() {
                // a resize that arrived with the line is shown before it applies
                if let Some(size) = screen.poll() {
                    self.handle_resize(size);
                    self.redraw(out)?;
                }
                self.handle_input(&line);
            }
        }

        if let Some(error) = self.menu.persist() {
            warn!("Shutting down with {:?}", error.error_kind());
        }
        Ok(())
    }

    /// Error still waiting to be shown once the loop has stopped, laid out as
    /// a panel for the main screen. Falls back to one plain line when the
    /// panel cannot be laid out.
    pub fn shutdown_report(&mut self) -> Option<String> {
        let pending = self.menu.error_panel().pending().cloned()?;
        match self.menu.take_error_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!("Rendering the shutdown report failed: {}", e);
                match pending {
                    Signal::Error { kind, message, .. } => Some(format!("{}: {}", kind, message)),
                    _ => None,
                }
            }
        }
    }
}
