//! Crossterm rendering of [`CellView`]s.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{Point, Role};
use pathviz_driver::{CellView, Visualizer};

/// Glyph and colours for a cell, most specific state first.
fn look(view: &CellView) -> (char, Color, Color) {
    match view.role {
        Role::Start => return ('S', Color::Black, Color::Green),
        Role::Finish => return ('F', Color::Black, Color::Red),
        Role::Bomb => return ('B', Color::White, Color::Magenta),
        Role::None => {}
    }
    if view.wall {
        ('#', Color::Grey, Color::DarkGrey)
    } else if view.path {
        ('*', Color::Black, Color::Yellow)
    } else if view.visited {
        (if view.weight { '~' } else { ' ' }, Color::Black, Color::Cyan)
    } else if view.weight {
        ('~', Color::Yellow, Color::Reset)
    } else {
        ('.', Color::DarkGrey, Color::Reset)
    }
}

/// Terminal column and row of a cell; each cell is two columns wide.
fn screen_pos(view: &CellView) -> (u16, u16) {
    ((view.pos.col * 2) as u16, view.pos.row as u16)
}

fn queue_cell(out: &mut impl Write, view: &CellView) -> io::Result<()> {
    let (ch, fg, bg) = look(view);
    let (x, y) = screen_pos(view);
    queue!(
        out,
        cursor::MoveTo(x, y),
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(ch),
        Print(' '),
        ResetColor
    )
}

/// Clear the screen and draw every cell.
pub fn draw_all(out: &mut impl Write, viz: &Visualizer) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All))?;
    for view in viz.cells() {
        queue_cell(out, &view)?;
    }
    out.flush()
}

/// Redraw a single cell.
pub fn draw_cell(out: &mut impl Write, viz: &Visualizer, pos: Point) -> io::Result<()> {
    if let Some(view) = viz.cell(pos) {
        queue_cell(out, &view)?;
    }
    out.flush()
}

/// Print the grid as plain lines, without cursor movement.
pub fn print_plain(out: &mut impl Write, viz: &Visualizer) -> io::Result<()> {
    let cols = viz.grid().cols();
    for view in viz.cells() {
        let (ch, fg, bg) = look(&view);
        queue!(
            out,
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(ch),
            Print(' '),
            ResetColor
        )?;
        if view.pos.col == cols - 1 {
            queue!(out, Print('\n'))?;
        }
    }
    out.flush()
}
