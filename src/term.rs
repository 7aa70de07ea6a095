use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::game::{GameSummary, Outcome};
use crate::input::{Command, InputSource};
use crate::render::{Cell, Frame, Renderer};

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

/// Owns the terminal while a game is on screen. The board is drawn from the
/// top-left corner, status lines right below it.
pub struct TermManager {
    stdout: Stdout,
    board_size: TermCoords,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), board_size: (0, 0) }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.board_size.0 / 2, self.board_size.1 / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(" ".repeat(msg_width as usize)))?;
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: TermCoords, ch: char, color: Option<Color>) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;
        match color {
            Some(color) => queue!(self.stdout, style::SetForegroundColor(color), style::Print(ch), style::ResetColor),
            None => queue!(self.stdout, style::Print(ch)),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_color(cell: &Cell) -> Option<Color> {
    match cell {
        Cell::Head(_) => Some(Color::Blue),
        Cell::Body => Some(Color::Green),
        Cell::Food => Some(Color::Red),
        Cell::Empty | Cell::Wall => None,
    }
}

/// Keyboard side of the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermInput;

impl TermInput {
    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    /// Takes at most one pending event off the queue without waiting.
    pub fn poll_key(&self) -> io::Result<Option<KeyEvent>> {
        if !poll(Duration::ZERO)? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) => Ok(Some(ev)),
            _ => Ok(None),
        }
    }
}

impl InputSource for TermInput {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        Ok(self.poll_key()?.and_then(Command::from_key_event))
    }
}

impl Renderer for TermManager {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.board_size = (frame.width() as TermInt, frame.height() as TermInt);

        for (y, row) in frame.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.print_at((x as TermInt, y as TermInt), cell.glyph(), cell_color(cell))?;
            }
        }

        for (i, line) in frame.status.iter().enumerate() {
            let y = self.board_size.1 + i as TermInt;
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                style::Print(line),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
        }

        // Wipe whatever the previous frame left below, e.g. the pause notice
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.board_size.1 + frame.status.len() as TermInt),
            terminal::Clear(ClearType::FromCursorDown)
        )?;

        self.flush()
    }

    fn show_summary(&mut self, summary: &GameSummary) -> io::Result<()> {
        let title = match summary.outcome {
            Outcome::Won => "You won!",
            _ => "GAME OVER",
        };
        let score = format!("Final Score: {}", summary.score);
        let high_score = if summary.new_high_score {
            format!("New High Score: {}", summary.high_score)
        } else {
            format!("High Score: {}", summary.high_score)
        };

        self.show_message(&[title, &score, &high_score, "", "Press any key to exit"])
    }
}
