use serde::{Deserialize, Serialize};

/// Width panels aim for when the terminal is wide enough
pub const STANDARD_WIDTH: usize = 80;

/// Blank space between the border and the text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Padding {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Padding {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same padding on every side
    pub fn uniform(size: usize) -> Self {
        Self::new(size, size, size, size)
    }
}

/// Glyphs used to draw a panel border
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_horizontal: char,
    pub bottom_horizontal: char,
    pub left_vertical: char,
    pub right_vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    /// Joins a seam to the left edge
    pub tee_left: char,
    /// Joins a seam to the right edge
    pub tee_right: char,
}

impl BorderGlyphs {
    /// Light box-drawing border
    pub fn light() -> Self {
        Self {
            top_horizontal: '─',
            bottom_horizontal: '─',
            left_vertical: '│',
            right_vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            tee_left: '├',
            tee_right: '┤',
        }
    }

    /// A single glyph for every position
    pub fn uniform(glyph: char) -> Self {
        Self {
            top_horizontal: glyph,
            bottom_horizontal: glyph,
            left_vertical: glyph,
            right_vertical: glyph,
            top_left: glyph,
            top_right: glyph,
            bottom_left: glyph,
            bottom_right: glyph,
            tee_left: glyph,
            tee_right: glyph,
        }
    }
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::light()
    }
}

/// Horizontal placement of text inside a panel
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything the renderer needs to know about a panel besides its text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelStyle {
    pub padding: Padding,
    pub border: BorderGlyphs,
    pub alignment: Alignment,
    pub standard_width: usize,
}

impl PanelStyle {
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: BorderGlyphs) -> Self {
        self.border = border;
        self
    }

    pub fn with_standard_width(mut self, width: usize) -> Self {
        self.standard_width = width;
        self
    }
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            padding: Padding::new(0, 0, 1, 1),
            border: BorderGlyphs::default(),
            alignment: Alignment::default(),
            standard_width: STANDARD_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_from_yaml() {
        let alignment: Alignment = serde_yaml::from_str("center").unwrap();
        assert_eq!(alignment, Alignment::Center);
    }

    #[test]
    fn test_partial_style_uses_defaults() {
        let style: PanelStyle = serde_yaml::from_str("standard_width: 60\n").unwrap();
        assert_eq!(style.standard_width, 60);
        assert_eq!(style.border, BorderGlyphs::light());
        assert_eq!(style.alignment, Alignment::Left);
    }

    #[test]
    fn test_uniform_glyphs() {
        let glyphs = BorderGlyphs::uniform('#');
        assert_eq!(glyphs.top_left, '#');
        assert_eq!(glyphs.tee_right, '#');
    }
}
