use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Text shown below the panels while waiting for a selection
pub const PROMPT: &str = "Make a selection: ";

/// Switch to the alternate screen. Line input stays in cooked mode.
pub fn init() -> Result<()> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Return to the main screen
pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Clear the screen, print `frame` from the top-left corner, then the prompt
pub fn draw<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in frame.lines() {
        write!(out, "{}\r\n", line)?;
    }
    write!(out, "{}", PROMPT)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_writes_frame_and_prompt() {
        let mut out = Vec::new();
        draw(&mut out, "###\n# #\n###").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("###\r\n# #\r\n###\r\n"));
        assert!(text.ends_with(PROMPT));
    }
}
