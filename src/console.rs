use crate::stats::{Recorder, SimpleRecord};
use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    execute, queue, style, terminal,
};
use lifegrid::{
    CellSize, Coord, Dims, Error, GameOfLife, RunState, Result, runner::Renderer,
};
use std::{
    io::{self, Write},
    time::Duration,
};

pub enum ConsoleCommand {
    Exit,
    Key(char),
    Click { x: u16, y: u16 },
    Handled,
}

/// The terminal as a drawing surface
///
/// Creating it takes over the terminal (raw mode, alternate screen, mouse
/// capture); dropping it hands the terminal back.
pub struct ConsoleRender {
    stats: SimpleRecord,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> Result<Self> {
        // without a usable terminal there is nothing to draw on
        terminal::size().map_err(Error::Surface)?;
        terminal::enable_raw_mode().map_err(Error::Surface)?;
        let render = Self {
            stats: SimpleRecord::new(0),
            report: String::new(),
        };
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )
        .map_err(Error::Surface)?;
        Ok(render)
    }

    /// The surface size left for cells once the footer row is reserved
    pub fn surface_size() -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size().map_err(Error::Surface)?;
        Ok((cols, rows.saturating_sub(1)))
    }

    fn draw(&mut self, game: &GameOfLife, cell_size: CellSize, state: RunState) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let body_rows = rows.saturating_sub(1);
        let visible: Dims = cell_size.fit(cols, body_rows);
        let block = "█".repeat(usize::from(cell_size.width()));

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in game.window(Coord::zero(), visible).iter() {
            let x = cell.col as u16 * cell_size.width();
            let y = cell.row as u16 * cell_size.height();
            for dy in 0..cell_size.height() {
                queue!(stdout, cursor::MoveTo(x, y + dy), style::Print(&block))?;
            }
        }

        // write footer
        let state = match state {
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, body_rows),
            style::Print(format!("[{state}] {}", self.report))
        )?;
        stdout.flush()
    }
}

impl Renderer for ConsoleRender {
    fn render(&mut self, game: &GameOfLife, cell_size: CellSize, state: RunState) -> Result<()> {
        self.stats.record(game.generation(), game.alive_count());
        if self.stats.has_report() {
            self.report = self.stats.report();
        }
        Ok(self.draw(game, cell_size, state)?)
    }
}

impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // nothing left to report to if the terminal refuses to be restored
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Keeps a click only if it lands on the cell area of a `surface` sized
/// `(columns, rows)`, not on the footer below it
pub fn body_click(x: u16, y: u16, surface: (u16, u16)) -> Option<(u16, u16)> {
    (x < surface.0 && y < surface.1).then_some((x, y))
}

/// Waits up to `timeout` for one input event
///
/// [`None`] timeout blocks until an event arrives.
pub fn poll_events(timeout: Option<Duration>) -> io::Result<Option<ConsoleCommand>> {
    // make sure event is present for us to take
    if let Some(timeout) = timeout {
        if !event::poll(timeout)? {
            return Ok(None);
        }
    }

    let cmd = match event::read()? {
        event::Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        })
        | event::Event::Key(KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        }) => ConsoleCommand::Exit,
        event::Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            kind: KeyEventKind::Press,
            ..
        }) => ConsoleCommand::Key(c),
        event::Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => ConsoleCommand::Click { x: column, y: row },
        _ => ConsoleCommand::Handled,
    };
    Ok(Some(cmd))
}
