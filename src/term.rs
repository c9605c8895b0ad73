use crate::{TermInt, Coords};
use crate::render::Canvas;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{ensure, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Owns the terminal while a game runs: raw mode, the alternate screen and a
/// copy of what is currently on the playfield.
pub struct TermManager {
    stdout: Stdout,
    screen: Canvas,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(field: Coords) -> Result<Self> {
        let (cols, rows) = terminal::size().context("Error reading terminal size")?;
        ensure!(
            cols >= field.0 && rows >= field.1,
            "terminal is {}x{}, the playfield needs at least {}x{}",
            cols, rows, field.0, field.1
        );

        Ok(TermManager { stdout: stdout(), screen: Canvas::blank(field.0, field.1), current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking).context("Error showing cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(ev);
            }
        }
    }

    /// Next pending key press, if any. Never waits.
    pub fn poll_key(&self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0)).context("Error polling events")? {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    /// Writes only the characters that changed since the last frame.
    pub fn draw(&mut self, frame: &Canvas) -> Result<()> {
        ensure!(frame.size() == self.screen.size(), "frame size doesn't match the playfield");

        let changes: Vec<(Coords, char)> = frame.diff(&self.screen)
            .filter(|(pos, _)| !self.covered_by_message(*pos))
            .collect();

        for (pos, ch) in changes {
            queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
                .context("Error drawing frame")?;
        }

        self.screen = frame.clone();
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let (width, height) = self.screen.size();
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (width / 2, height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let (width, height) = self.screen.size();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = if x < width && y < height { self.screen.get((x, y)) } else { ' ' };
                self.print_at_no_save((x, y), ch)?;
            }
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        let (width, height) = self.screen.size();
        self.screen = Canvas::blank(width, height);
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Messages float above the playfield; the screen buffer keeps what's
        // underneath so it can be put back
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
            .context("Error printing message")
    }

    fn covered_by_message(&self, pos: Coords) -> bool {
        match &self.current_msg {
            Some(msg) => msg.covers(pos),
            None => false,
        }
    }
}

impl Message {
    fn covers(&self, pos: Coords) -> bool {
        let (x0, y0) = self.top_left;
        (x0..x0 + self.width).contains(&pos.0) && (y0..y0 + self.height).contains(&pos.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_covers_its_box() {
        let msg = Message { top_left: (4, 2), width: 3, height: 2 };
        assert!(msg.covers((4, 2)));
        assert!(msg.covers((6, 3)));
        assert!(!msg.covers((7, 3)));
        assert!(!msg.covers((5, 4)));
        assert!(!msg.covers((3, 2)));
    }
}
