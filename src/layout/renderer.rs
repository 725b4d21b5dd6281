use super::style::{Alignment, BorderGlyphs, PanelStyle};
use super::Dimensions;
use crate::menu::error::{MenuError, Result};
use unicode_width::UnicodeWidthStr;

/// Columns taken by the left and right border glyphs
const BORDER_COLUMNS: usize = 2;

/// Width of the whole panel, borders included
pub fn panel_width(style: &PanelStyle, dimensions: Dimensions) -> usize {
    style.standard_width.min(dimensions.columns)
}

/// Width available for text once borders and horizontal padding are removed.
/// Returns 0 when the panel is too narrow to hold any text.
pub fn interior_width(style: &PanelStyle, dimensions: Dimensions) -> usize {
    panel_width(style, dimensions)
        .saturating_sub(style.padding.left + style.padding.right + BORDER_COLUMNS)
}

fn wrap_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
}

/// Split `text` into lines no wider than `width`.
///
/// Lines that already fit are kept verbatim; longer ones are wrapped greedily
/// at spaces and words wider than `width` are broken.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| {
            if line.width() <= width {
                vec![line.to_string()]
            } else {
                textwrap::wrap(line, wrap_options(width))
                    .into_iter()
                    .map(|wrapped| wrapped.into_owned())
                    .collect()
            }
        })
        .collect()
}

/// Lay out `texts` as one bordered panel.
pub fn render_panel<S: AsRef<str>>(
    texts: &[S],
    dimensions: Dimensions,
    style: &PanelStyle,
) -> Result<String> {
    let width = panel_width(style, dimensions);
    let interior = interior_width(style, dimensions);
    if interior == 0 {
        return Err(MenuError::Layout(format!(
            "panel width {} leaves no room for text (padding {}+{})",
            width, style.padding.left, style.padding.right
        )));
    }

    let border = &style.border;
    let mut rows = Vec::new();
    rows.push(border_row(
        border.top_left,
        border.top_horizontal,
        border.top_right,
        width,
    ));

    for _ in 0..style.padding.top {
        rows.push(content_row("", interior, style)?);
    }

    for text in texts {
        for line in wrap_text(text.as_ref(), interior) {
            rows.push(content_row(&line, interior, style)?);
        }
    }

    for _ in 0..style.padding.bottom {
        rows.push(content_row("", interior, style)?);
    }

    rows.push(border_row(
        border.bottom_left,
        border.bottom_horizontal,
        border.bottom_right,
        width,
    ));

    Ok(rows.join("\n"))
}

/// Join panels vertically so that neighbours share one seam row instead of
/// two stacked borders.
pub fn stack_panels<S: AsRef<str>>(panels: &[S], border: &BorderGlyphs) -> String {
    let mut rows: Vec<String> = Vec::new();

    for panel in panels {
        let mut lines = panel.as_ref().lines();
        if rows.is_empty() {
            rows.extend(lines.map(String::from));
            continue;
        }

        let Some(top) = lines.next() else {
            continue;
        };
        rows.pop();
        rows.push(border_row(
            border.tee_left,
            border.top_horizontal,
            border.tee_right,
            top.chars().count(),
        ));
        rows.extend(lines.map(String::from));
    }

    rows.join("\n")
}

fn border_row(left: char, fill: char, right: char, width: usize) -> String {
    let mut row = String::with_capacity(width * fill.len_utf8());
    row.push(left);
    row.extend(std::iter::repeat_n(fill, width.saturating_sub(BORDER_COLUMNS)));
    row.push(right);
    row
}

fn content_row(text: &str, interior: usize, style: &PanelStyle) -> Result<String> {
    let text_width = text.width();
    if text_width > interior {
        return Err(MenuError::Layout(format!(
            "line of width {} does not fit interior width {}",
            text_width, interior
        )));
    }

    let slack = interior - text_width;
    let (left_margin, right_margin) = match style.alignment {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        // odd-length text gets one extra space on the right
        Alignment::Center => (slack / 2, slack / 2 + text_width % 2),
    };

    let padding = &style.padding;
    let mut row = String::new();
    row.push(style.border.left_vertical);
    row.push_str(&" ".repeat(padding.left + left_margin));
    row.push_str(text);
    row.push_str(&" ".repeat(right_margin + padding.right));
    row.push(style.border.right_vertical);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::Padding;

    fn style(width: usize, alignment: Alignment) -> PanelStyle {
        PanelStyle::default()
            .with_standard_width(width)
            .with_padding(Padding::new(0, 0, 1, 1))
            .with_border(BorderGlyphs::uniform('#'))
            .with_alignment(alignment)
    }

    fn screen(columns: usize) -> Dimensions {
        Dimensions::new(24, columns)
    }

    #[test]
    fn test_left_aligned_panel() {
        let out = render_panel(&["hi"], screen(80), &style(8, Alignment::Left)).unwrap();
        assert_eq!(out, "########\n# hi   #\n########");
    }

    #[test]
    fn test_right_aligned_panel() {
        let out = render_panel(&["hi"], screen(80), &style(8, Alignment::Right)).unwrap();
        assert_eq!(out, "########\n#   hi #\n########");
    }

    #[test]
    fn test_center_odd_text_extra_space_right() {
        // interior 4, text 3: left 0, right 1
        let out = render_panel(&["abc"], screen(80), &style(8, Alignment::Center)).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "# abc  #");

        // interior 10, text 5: left 2, right 3
        let out = render_panel(&["abcde"], screen(80), &style(14, Alignment::Center)).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "#   abcde    #");
    }

    #[test]
    fn test_center_odd_interior() {
        // interior 5: "abc" gets 1 left and 2 right, "ab" gets 1 on each side
        let out = render_panel(&["abc", "ab"], screen(80), &style(9, Alignment::Center)).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "#  abc   #");
        assert_eq!(lines[2], "#  ab  #");
    }

    #[test]
    fn test_center_even_text_even_margins() {
        let out = render_panel(&["ab"], screen(80), &style(8, Alignment::Center)).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "#  ab  #");
    }

    #[test]
    fn test_panel_width_bounded_by_screen() {
        let out = render_panel(&["x"], screen(20), &style(80, Alignment::Left)).unwrap();
        for line in out.lines() {
            assert_eq!(line.chars().count(), 20);
        }
    }

    #[test]
    fn test_vertical_padding_rows() {
        let style = style(8, Alignment::Left).with_padding(Padding::new(1, 2, 1, 1));
        let out = render_panel(&["hi"], screen(80), &style).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "#      #");
        assert_eq!(lines[2], "# hi   #");
        assert_eq!(lines[3], "#      #");
        assert_eq!(lines[4], "#      #");
    }

    #[test]
    fn test_light_border_corners() {
        let style = PanelStyle::default().with_standard_width(6);
        let out = render_panel(&["ok"], screen(80), &style).unwrap();
        assert_eq!(out, "┌────┐\n│ ok │\n└────┘");
    }

    #[test]
    fn test_wrap_is_greedy_and_bounded() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        for line in &lines {
            assert!(line.width() <= 10);
        }
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap_text("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_keeps_short_text_verbatim() {
        assert_eq!(wrap_text("  indented", 20), vec!["  indented"]);
        assert_eq!(wrap_text("", 20), vec![""]);
    }

    #[test]
    fn test_every_row_has_panel_width() {
        let text = "a fairly long sentence that will need to be wrapped across rows";
        let out = render_panel(&[text], screen(80), &style(20, Alignment::Center)).unwrap();
        assert!(out.lines().count() > 3);
        for line in out.lines() {
            assert_eq!(line.chars().count(), 20);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let style = style(30, Alignment::Center);
        let texts = ["Title", "some content that wraps around the panel"];
        let first = render_panel(&texts, screen(80), &style).unwrap();
        let second = render_panel(&texts, screen(80), &style).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_narrow_is_layout_error() {
        let style = style(80, Alignment::Left).with_padding(Padding::new(0, 0, 3, 3));
        let err = render_panel(&["x"], screen(8), &style).unwrap_err();
        assert!(matches!(err, MenuError::Layout(_)));
    }

    #[test]
    fn test_stack_panels_share_seam() {
        let style = style(6, Alignment::Left);
        let top = render_panel(&["a"], screen(80), &style).unwrap();
        let bottom = render_panel(&["b"], screen(80), &style).unwrap();
        let glyphs = BorderGlyphs::light();
        let out = stack_panels(&[top, bottom], &glyphs);
        assert_eq!(out, "######\n# a  #\n├────┤\n# b  #\n######");
    }

    #[test]
    fn test_stack_skips_empty_panels() {
        let glyphs = BorderGlyphs::light();
        let out = stack_panels(&["", "###\n# #\n###"], &glyphs);
        assert_eq!(out, "###\n# #\n###");
    }
}
