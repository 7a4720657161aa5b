use crate::app::App;
use crate::braille::{DOTS_PER_CELL_X, DOTS_PER_CELL_Y};
use crate::simulation::Viewport;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Inner canvas rectangle (excluding borders) for a terminal of this size
pub fn canvas_rect(frame_area: Rect, fullscreen: bool) -> Rect {
    let x = if fullscreen { 0 } else { SIDEBAR_WIDTH };
    Rect {
        x: frame_area.x + x + 1,
        y: frame_area.y + 1,
        width: frame_area.width.saturating_sub(x + 2),
        height: frame_area.height.saturating_sub(2),
    }
}

/// Logical viewport of a canvas rectangle: one logical pixel per Braille dot
pub fn viewport_for(canvas: Rect) -> Viewport {
    Viewport {
        width: canvas.width as f64 * DOTS_PER_CELL_X as f64,
        height: canvas.height as f64 * DOTS_PER_CELL_Y as f64,
    }
}

/// Top-left corner of a canvas rectangle in pointer coordinates
pub fn canvas_origin(canvas: Rect) -> (f64, f64) {
    (
        canvas.x as f64 * DOTS_PER_CELL_X as f64,
        canvas.y as f64 * DOTS_PER_CELL_Y as f64,
    )
}

/// Pointer coordinates of the centre of terminal cell (column, row)
pub fn pointer_position(column: u16, row: u16) -> (f64, f64) {
    (
        column as f64 * DOTS_PER_CELL_X as f64 + DOTS_PER_CELL_X as f64 / 2.0,
        row as f64 * DOTS_PER_CELL_Y as f64 + DOTS_PER_CELL_Y as f64 / 2.0,
    )
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Status
            Constraint::Length(8), // Parameters
            Constraint::Min(8),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Particle Field ");

    let (status_text, status_color) = if app.paused {
        ("PAUSED", HIGHLIGHT_COLOR)
    } else if !app.mounted {
        ("NO CANVAS", Color::Red)
    } else {
        ("RUNNING", Color::Green)
    };

    let content = vec![
        Line::from(Span::styled(
            format!("{} particles", app.field.particle_count()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("frame {}", app.frame_count),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");
    let settings = &app.field.settings;
    let mouse = app.field.mouse;

    let make_line = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {}: ", label), Style::default().fg(DIM_TEXT_COLOR)),
            Span::styled(value, Style::default().fg(TEXT_COLOR)),
        ])
    };

    let content = vec![
        make_line("Quantity", format!("{}", settings.quantity)),
        make_line("Staticity", format!("{}", settings.staticity)),
        make_line("Ease", format!("{}", settings.ease)),
        make_line("Ratio", format!("{:.2}", app.field.dpr)),
        make_line(
            "Canvas",
            format!("{}x{}", app.field.canvas_size.w, app.field.canvas_size.h),
        ),
        make_line("Mouse", format!("{:.0},{:.0}", mouse.x, mouse.y)),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "pause/resume"),
        make_control("R", "respawn"),
        make_control("V", "fullscreen"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = app.surface.render_to_braille(inner.width, inner.height);

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            frame.render_widget(Paragraph::new(Line::from(span)), cell_rect);
        }
    }

    render_banner(frame, inner, app);
}

/// Typewriter line drawn over the middle of the canvas
fn render_banner(frame: &mut Frame, inner: Rect, app: &App) {
    if inner.height == 0 {
        return;
    }
    let banner_area = Rect {
        x: inner.x,
        y: inner.y + inner.height / 2,
        width: inner.width,
        height: 1,
    };
    let line = Line::from(vec![
        Span::styled(
            app.typewriter.text().to_string(),
            Style::default().fg(TEXT_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled("▌", Style::default().fg(HIGHLIGHT_COLOR)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), banner_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 52.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(18);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("PARTICLE FIELD", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Dots drift slowly, fade in away from the edges and lean towards the mouse."),
        Line::from(""),
        Line::from(Span::styled("Quantity", Style::default().fg(TEXT_COLOR))),
        Line::from("Number of dots kept alive"),
        Line::from(Span::styled("Staticity", Style::default().fg(TEXT_COLOR))),
        Line::from("Higher = weaker pull towards the mouse"),
        Line::from(Span::styled("Ease", Style::default().fg(TEXT_COLOR))),
        Line::from("Higher = slower follow"),
        Line::from(""),
        Line::from("Space=Pause, R=Respawn, V=Fullscreen, H=Close help, Q=Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(" Help (H to close) ");

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rect_excludes_sidebar_and_borders() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(canvas_rect(area, false), Rect::new(25, 1, 74, 28));
        assert_eq!(canvas_rect(area, true), Rect::new(1, 1, 98, 28));
    }

    #[test]
    fn test_tiny_terminal_has_no_canvas() {
        let rect = canvas_rect(Rect::new(0, 0, 20, 2), false);
        let viewport = viewport_for(rect);
        assert_eq!(viewport.width, 0.0);
        assert_eq!(viewport.height, 0.0);
    }

    #[test]
    fn test_pointer_mapping_matches_canvas_centre() {
        let canvas = Rect::new(25, 1, 74, 28);
        let viewport = viewport_for(canvas);
        let (left, top) = canvas_origin(canvas);
        // centre cell of the canvas
        let (px, py) = pointer_position(25 + 37, 1 + 14);
        assert_eq!(px - left - viewport.width / 2.0, 1.0);
        assert_eq!(py - top - viewport.height / 2.0, 2.0);
    }
}
