use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use trophy_snake::geometry::{Cell, Direction::*};
use trophy_snake::screen::{Key, Screen, TermInt};

type Coords = (TermInt, TermInt);

/// crossterm-backed screen. Keeps a copy of everything drawn so message
/// boxes can be taken down without redrawing the game.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Takes over the terminal: alternate screen, raw mode, hidden cursor.
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        let mut term = TermManager { width, height, stdout: stdout(), screen, current_msg: None, active: false };

        execute!(term.stdout, EnterAlternateScreen)?;
        term.active = true;
        terminal::enable_raw_mode()?;
        execute!(term.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;

        Ok(term)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        self.print_at_no_save(pos, ch)?;
        if let Some(slot) = self.index(pos) {
            self.screen[slot] = ch;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        // Messages go through here so the saved buffer can restore what they covered
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

impl Screen for TermManager {
    fn size(&self) -> (TermInt, TermInt) {
        (self.height, self.width)
    }

    fn draw_glyph(&mut self, cell: Cell, glyph: char) -> io::Result<()> {
        match to_coords(cell) {
            Some(pos) => self.print_at(pos, glyph),
            None => Ok(()),
        }
    }

    fn draw_status(&mut self, row: TermInt, text: &str) -> io::Result<()> {
        let mut chars = text.chars();
        for x in 0..self.width {
            let ch = chars.next().unwrap_or(' ');
            self.print_at((x, row), ch)?;
        }
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.hide_message()?;

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Blank lines above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    fn hide_message(&mut self) -> io::Result<()> {
        let Some(msg) = self.current_msg.take() else {
            return Ok(());
        };

        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(slot) = self.index(pos) {
                    let ch = self.screen[slot];
                    self.print_at_no_save(pos, ch)?;
                }
            }
        }

        self.flush()
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(Some(map_key(&ev)));
                }
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(map_key(&ev));
                }
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.restore()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn to_coords(cell: Cell) -> Option<Coords> {
    let x = TermInt::try_from(cell.col).ok()?;
    let y = TermInt::try_from(cell.row).ok()?;
    Some((x, y))
}

fn map_key(ev: &KeyEvent) -> Key {
    if is_ctrl_c(ev) {
        return Key::Interrupt;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Key::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Key::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Key::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Key::Turn(Right),
        _ => Key::Other,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
