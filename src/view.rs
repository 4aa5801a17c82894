//! Render model shared by the terminal UI and `--print`.
//!
//! `View::of` turns the dashboard state into plain data: sections, list
//! kinds and item text. The ratatui layer only decides colours and borders,
//! so everything about *what* is shown can be tested without a terminal.

use crate::app::ViewState;
use crate::pipeline::{FileEntry, PipelineSnapshot};

pub const LOADING_TEXT: &str = "Loading...";
pub const DASHBOARD_HEADING: &str = "Genomics Pipeline Dashboard";
pub const FAILED_HEADING: &str = "Failed to load pipeline data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Failed { message: String },
    Dashboard { heading: String, sections: Vec<Section> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub kind: ListKind,
    pub items: Vec<Item>,
}

/// One list entry: lead text plus an optional emphasized tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub emphasis: Option<String>,
}

/// A single rendered row, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    Loading,
    Heading(String),
    ErrorHeading(String),
    Message(String),
    SubHeading(String),
    Item { marker: String, item: Item },
    Blank,
}

impl Item {
    pub fn plain_text(&self) -> String {
        match &self.emphasis {
            Some(tail) => format!("{}{}", self.text, tail),
            None => self.text.clone(),
        }
    }
}

impl ListKind {
    /// Bullet for the item at `index` (0-based)
    pub fn marker(&self, index: usize) -> String {
        match self {
            ListKind::Unordered => "-".to_string(),
            ListKind::Ordered => format!("{}.", index + 1),
        }
    }
}

fn file_section(title: &str, files: &[FileEntry]) -> Section {
    Section {
        title: title.to_string(),
        kind: ListKind::Unordered,
        items: files
            .iter()
            .map(|f| Item {
                text: f.label(),
                emphasis: None,
            })
            .collect(),
    }
}

impl View {
    pub fn of(state: &ViewState) -> Self {
        match state {
            ViewState::Loading => View::Loading,
            ViewState::Failed(message) => View::Failed {
                message: message.clone(),
            },
            ViewState::Loaded(snapshot) => Self::dashboard(snapshot),
        }
    }

    fn dashboard(snapshot: &PipelineSnapshot) -> Self {
        let status = Section {
            title: "Pipeline Status".to_string(),
            kind: ListKind::Ordered,
            items: snapshot
                .pipeline_status
                .iter()
                .map(|s| Item {
                    text: format!("{}: ", s.stage),
                    emphasis: Some(s.status.clone()),
                })
                .collect(),
        };

        View::Dashboard {
            heading: DASHBOARD_HEADING.to_string(),
            sections: vec![
                file_section("Inputs", &snapshot.inputs),
                file_section("Outputs", &snapshot.outputs),
                status,
            ],
        }
    }

    #[cfg(test)]
    pub fn section(&self, title: &str) -> Option<&Section> {
        match self {
            View::Dashboard { sections, .. } => sections.iter().find(|s| s.title == title),
            _ => None,
        }
    }

    pub fn lines(&self) -> Vec<ViewLine> {
        match self {
            View::Loading => vec![ViewLine::Loading],
            View::Failed { message } => vec![
                ViewLine::ErrorHeading(FAILED_HEADING.to_string()),
                ViewLine::Blank,
                ViewLine::Message(message.clone()),
            ],
            View::Dashboard { heading, sections } => {
                let mut lines = vec![ViewLine::Heading(heading.clone())];
                for section in sections {
                    lines.push(ViewLine::Blank);
                    lines.push(ViewLine::SubHeading(section.title.clone()));
                    lines.extend(section.items.iter().enumerate().map(|(i, item)| {
                        ViewLine::Item {
                            marker: section.kind.marker(i),
                            item: item.clone(),
                        }
                    }));
                }
                lines
            }
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            match line {
                ViewLine::Loading => out.push_str(LOADING_TEXT),
                ViewLine::Heading(text)
                | ViewLine::ErrorHeading(text)
                | ViewLine::Message(text)
                | ViewLine::SubHeading(text) => out.push_str(&text),
                ViewLine::Item { marker, item } => {
                    out.push_str(&format!("{} {}", marker, item.plain_text()))
                }
                ViewLine::Blank => {}
            }
            out.push('\n');
        }
        out
    }
}
