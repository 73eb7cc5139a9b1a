use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::{Span, Spans};
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

use crate::face::Face;

/// Display is used by the runner to put a face on the screen. It should
/// abstract the implementation details, so a variety of kinds of screen would
/// work.
pub trait Display {
    /// draw one screenful
    fn draw(&mut self, face: &Face) -> Result<(), io::Error>;
}

/// rows in every glyph
const GLYPH_HEIGHT: usize = 5;
/// each font pixel becomes this many terminal cells across, to make up for
/// cells being taller than they are wide
const PIXEL_WIDTH: usize = 2;
/// blank font pixels between glyphs
const GLYPH_SPACING: usize = 1;

// store useful metadata about the digits being drawn
struct Resolution(usize, usize);

impl Resolution {
    /// cells needed to draw `text` in the block font
    fn of(text: &str) -> Self {
        let pixels: usize = text.chars().map(|c| glyph(c).0 + GLYPH_SPACING).sum();
        Resolution(
            pixels.saturating_sub(GLYPH_SPACING) * PIXEL_WIDTH,
            GLYPH_HEIGHT,
        )
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.0.saturating_sub(1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * self.1.saturating_sub(1) as f64, 0.0]
    }

    /// the bordered box the digits sit in, centred in `area`
    fn frame_in(&self, area: Rect) -> Rect {
        let w = (self.0 + 2) as u16;
        let h = (self.1 + 2) as u16;
        let x = area.x + area.width.saturating_sub(w) / 2;
        let y = area.y + area.height.saturating_sub(h) / 2;
        Rect::new(x, y, w, h).intersection(area)
    }
}

/// look up a character in the block font; anything unknown draws as a space
fn glyph(c: char) -> (usize, [u8; GLYPH_HEIGHT]) {
    GLYPHS
        .iter()
        .find(|(g, _, _)| *g == c)
        .map(|(_, w, rows)| (*w, *rows))
        .unwrap_or((3, [0; GLYPH_HEIGHT]))
}

/// expand `text` into the coordinates of its lit cells, suitable for
/// rendering on a canvas: x grows rightwards from 0, y downwards from 0 to
/// -(GLYPH_HEIGHT - 1)
fn glyph_points(text: &str) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut origin = 0;
    for c in text.chars() {
        let (width, rows) = glyph(c);
        for (y, row) in rows.iter().enumerate() {
            for col in 0..width {
                if (*row >> (width - 1 - col)) & 1 == 1 {
                    let x = (origin + col) * PIXEL_WIDTH;
                    for dx in 0..PIXEL_WIDTH {
                        points.push(((x + dx) as f64, -1.0 * y as f64));
                    }
                }
            }
        }
        origin += width + GLYPH_SPACING;
    }
    points
}

/// digital watch face in a terminal, rendered using TUI and Crossterm
pub struct TermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    help: String,
}

impl TermDisplay {
    /// takes over the terminal until dropped. `help` is shown under the
    /// status bar
    pub fn new(help: String) -> Result<TermDisplay, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(TermDisplay { terminal, help })
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

impl Display for TermDisplay {
    fn draw(&mut self, face: &Face) -> Result<(), io::Error> {
        let resolution = Resolution::of(&face.digits);
        let points = glyph_points(&face.digits);
        let (fg, bg) = if face.lit {
            (Color::Black, Color::Cyan)
        } else {
            (Color::White, Color::Black)
        };
        let help = self.help.as_str();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length((GLYPH_HEIGHT + 4) as u16),
                        Constraint::Length(1),
                        Constraint::Length(3),
                        Constraint::Min(1),
                    ]
                    .as_ref(),
                )
                .split(f.size());

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("DUMBWATCH")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(bg)),
                )
                .background_color(bg)
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &points,
                        color: fg,
                    });
                });
            f.render_widget(canvas, resolution.frame_in(chunks[0]));

            let date = Paragraph::new(face.date.clone().unwrap_or_default())
                .alignment(Alignment::Center);
            f.render_widget(date, chunks[1]);

            let status = Paragraph::new(Spans::from(vec![
                Span::styled(
                    format!("Mode: {}", face.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::raw(face.status_line()),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(status, chunks[2]);

            let controls = Paragraph::new(help)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(controls, chunks[3]);
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers what it was asked to
/// draw
pub struct DummyDisplay {
    pub faces: Vec<Face>,
}

impl DummyDisplay {
    pub fn new() -> DummyDisplay {
        DummyDisplay { faces: Vec::new() }
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, face: &Face) -> Result<(), io::Error> {
        self.faces.push(face.clone());
        Ok(())
    }
}


/// a 3x5 block font for the watch digits, one byte per row, leftmost pixel
/// in the highest used bit
#[rustfmt::skip]
const GLYPHS: [(char, usize, [u8; GLYPH_HEIGHT]); 13] = [
    ('0', 3, [0b111, 0b101, 0b101, 0b101, 0b111]), // XXX|X X|X X|X X|XXX
    ('1', 3, [0b010, 0b110, 0b010, 0b010, 0b111]), //  X |XX | X | X |XXX
    ('2', 3, [0b111, 0b001, 0b111, 0b100, 0b111]), // XXX|  X|XXX|X  |XXX
    ('3', 3, [0b111, 0b001, 0b111, 0b001, 0b111]), // XXX|  X|XXX|  X|XXX
    ('4', 3, [0b101, 0b101, 0b111, 0b001, 0b001]), // X X|X X|XXX|  X|  X
    ('5', 3, [0b111, 0b100, 0b111, 0b001, 0b111]), // XXX|X  |XXX|  X|XXX
    ('6', 3, [0b111, 0b100, 0b111, 0b101, 0b111]), // XXX|X  |XXX|X X|XXX
    ('7', 3, [0b111, 0b001, 0b001, 0b001, 0b001]), // XXX|  X|  X|  X|  X
    ('8', 3, [0b111, 0b101, 0b111, 0b101, 0b111]), // XXX|X X|XXX|X X|XXX
    ('9', 3, [0b111, 0b101, 0b111, 0b001, 0b111]), // XXX|X X|XXX|  X|XXX
    (':', 1, [0b0,   0b1,   0b0,   0b1,   0b0  ]), //  |X| |X|
    ('.', 1, [0b0,   0b0,   0b0,   0b0,   0b1  ]), //  | | | |X
    (' ', 3, [0b000, 0b000, 0b000, 0b000, 0b000]),
];
