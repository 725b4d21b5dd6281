use super::error::Result;
use super::signal::Signal;
use crate::layout::{render_panel, Alignment, Dimensions, PanelStyle};

/// Panel displaying the most recent error signal until it has been rendered once
#[derive(Debug, Clone)]
pub struct ErrorPanel {
    style: PanelStyle,
    pending: Option<Signal>,
}

impl ErrorPanel {
    pub fn new(style: PanelStyle) -> Self {
        Self {
            style,
            pending: None,
        }
    }

    /// Queue `error` for display. Non-error signals are ignored.
    pub fn show(&mut self, error: Signal) {
        if error.is_error() {
            self.pending = Some(error);
        }
    }

    pub fn pending(&self) -> Option<&Signal> {
        self.pending.as_ref()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Render the pending error without consuming it
    pub fn render(&self, dimensions: Dimensions) -> Result<Option<String>> {
        let Some(Signal::Error {
            origin,
            kind,
            message,
            trace,
        }) = &self.pending
        else {
            return Ok(None);
        };

        let mut texts = vec![format!("{} in {}", kind, origin), message.clone()];
        if let Some(trace) = trace {
            texts.push(trace.clone());
        }
        render_panel(&texts, dimensions, &self.style).map(Some)
    }
}

impl Default for ErrorPanel {
    fn default() -> Self {
        Self::new(PanelStyle::default().with_alignment(Alignment::Center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::signal::ErrorKind;

    #[test]
    fn test_nothing_to_render_by_default() {
        let panel = ErrorPanel::default();
        assert_eq!(panel.render(Dimensions::default()).unwrap(), None);
    }

    #[test]
    fn test_show_ignores_non_errors() {
        let mut panel = ErrorPanel::default();
        panel.show(Signal::Quit);
        assert!(panel.pending().is_none());
    }

    #[test]
    fn test_render_includes_kind_origin_and_message() {
        let mut panel = ErrorPanel::default();
        panel.show(Signal::error("main", ErrorKind::InvalidTarget, "no such submenu"));
        let out = panel.render(Dimensions::default()).unwrap().unwrap();
        assert!(out.contains("InvalidTargetError in main"));
        assert!(out.contains("no such submenu"));
    }

    #[test]
    fn test_clear() {
        let mut panel = ErrorPanel::default();
        panel.show(Signal::error("main", ErrorKind::Storage, "disk full"));
        panel.clear();
        assert!(panel.pending().is_none());
    }
}
