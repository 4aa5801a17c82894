//! Line builders turning render-model rows into styled ratatui lines.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::{accent, danger, header, text, text_dim};
use crate::view::{ViewLine, LOADING_TEXT};

pub fn styled_line(line: &ViewLine) -> Line<'static> {
    match line {
        ViewLine::Loading => Line::from(Span::styled(LOADING_TEXT, Style::default().fg(text_dim()))),
        ViewLine::Heading(title) => Line::from(Span::styled(
            title.clone(),
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        ViewLine::ErrorHeading(title) => Line::from(Span::styled(
            title.clone(),
            Style::default().fg(danger()).add_modifier(Modifier::BOLD),
        )),
        ViewLine::Message(message) => Line::from(Span::styled(message.clone(), Style::default().fg(text()))),
        ViewLine::SubHeading(title) => Line::from(Span::styled(
            title.clone(),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        ViewLine::Item { marker, item } => {
            let mut spans = vec![
                Span::styled(format!("  {} ", marker), Style::default().fg(text_dim())),
                Span::styled(item.text.clone(), Style::default().fg(text())),
            ];
            if let Some(tail) = &item.emphasis {
                spans.push(Span::styled(
                    tail.clone(),
                    Style::default().fg(text()).add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
        ViewLine::Blank => Line::default(),
    }
}
