// Panel styles and the box layout algorithm

pub mod renderer;
pub mod style;

pub use renderer::{interior_width, panel_width, render_panel, stack_panels, wrap_text};
pub use style::{Alignment, BorderGlyphs, Padding, PanelStyle, STANDARD_WIDTH};

/// Terminal size as `(lines, columns)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub lines: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(lines: usize, columns: usize) -> Self {
        Self { lines, columns }
    }
}

impl Default for Dimensions {
    /// Classic 24x80 console, used until the first sample arrives
    fn default() -> Self {
        Self::new(24, 80)
    }
}
