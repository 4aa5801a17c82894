mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, ViewState};

// Fixed palette (Catppuccin-inspired)
fn accent() -> Color {
    Color::Rgb(250, 179, 135)
}

fn danger() -> Color {
    Color::Rgb(243, 139, 168)
}

fn success() -> Color {
    Color::Rgb(166, 218, 149)
}

fn text() -> Color {
    Color::Rgb(205, 214, 244)
}

fn text_dim() -> Color {
    Color::Rgb(147, 153, 178)
}

fn inactive() -> Color {
    Color::Rgb(88, 91, 112)
}

fn header() -> Color {
    Color::Rgb(243, 139, 168)
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Min(3),    // Dashboard box
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_dashboard(f, app, chunks[0]);
    draw_footer(f, app, chunks[1]);
}

fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let border_color = match app.state {
        ViewState::Loading => inactive(),
        ViewState::Loaded(_) => accent(),
        ViewState::Failed(_) => danger(),
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", app.endpoint()),
            Style::default().fg(text_dim()),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = app.view().lines().iter().map(components::styled_line).collect();

    let content = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll, 0));

    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let (state_text, state_color) = match app.state {
        ViewState::Loading => ("fetching", text_dim()),
        ViewState::Loaded(_) => ("loaded", success()),
        ViewState::Failed(_) => ("failed", danger()),
    };

    let footer = Line::from(vec![
        Span::styled(state_text, Style::default().fg(state_color).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(inactive())),
        Span::styled("j/k", Style::default().fg(accent())),
        Span::styled(" scroll ", Style::default().fg(text_dim())),
        Span::styled("g", Style::default().fg(accent())),
        Span::styled(" top ", Style::default().fg(text_dim())),
        Span::styled("q", Style::default().fg(accent())),
        Span::styled(" quit", Style::default().fg(text_dim())),
    ]);

    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}
