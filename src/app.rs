use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::api::{FetchError, PipelineClient};
use crate::pipeline::PipelineSnapshot;
use crate::view::View;

/// Lines moved by PageUp/PageDown
const PAGE_SCROLL: u16 = 10;

type FetchResult = Result<PipelineSnapshot, FetchError>;

/// What the dashboard currently knows. Leaves `Loading` at most once.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(PipelineSnapshot),
    Failed(String),
}

pub struct App {
    client: PipelineClient,
    pub state: ViewState,

    // Single in-flight fetch, if any
    pending: Option<oneshot::Receiver<FetchResult>>,
    fetch_started: bool,

    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: PipelineClient) -> Self {
        Self {
            client,
            state: ViewState::Loading,
            pending: None,
            fetch_started: false,
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        self.client.endpoint()
    }

    /// Start the one and only fetch for this view. Later calls do nothing.
    pub fn activate(&mut self) {
        if self.fetch_started {
            tracing::debug!("Fetch already issued, ignoring repeated activation");
            return;
        }
        self.fetch_started = true;

        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        tracing::info!("Fetching pipeline data from {}", client.endpoint());

        tokio::spawn(async move {
            let result = client.fetch_snapshot().await;
            if tx.send(result).is_err() {
                tracing::debug!("View closed before pipeline data arrived, discarding result");
            }
        });

        self.pending = Some(rx);
    }

    /// Pick up a finished fetch without blocking
    pub fn tick(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.apply(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.pending = None;
                self.fail("fetch task ended without a result".to_string());
            }
        }
    }

    /// Wait for the outstanding fetch, if there is one.
    pub async fn settle(&mut self) {
        let Some(rx) = self.pending.take() else {
            return;
        };

        match rx.await {
            Ok(result) => self.apply(result),
            Err(_) => self.fail("fetch task ended without a result".to_string()),
        }
    }

    fn apply(&mut self, result: FetchResult) {
        if self.state != ViewState::Loading {
            tracing::warn!("Ignoring fetch result, view already settled");
            return;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    "Pipeline data loaded: {} inputs, {} outputs, {} stages",
                    snapshot.inputs.len(),
                    snapshot.outputs.len(),
                    snapshot.pipeline_status.len()
                );
                self.state = ViewState::Loaded(snapshot);
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, reason: String) {
        if self.state != ViewState::Loading {
            return;
        }
        tracing::error!("Failed to load pipeline data from {}: {}", self.endpoint(), reason);
        self.state = ViewState::Failed(reason);
    }

    pub fn view(&self) -> View {
        View::of(&self.state)
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.view().line_count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll_by(PAGE_SCROLL),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn scroll_by(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }
}

/// Fetch once and render the result as plain text. Failure is an error
/// naming the endpoint.
pub async fn render_once(client: PipelineClient) -> anyhow::Result<String> {
    let mut app = App::new(client);
    app.activate();
    app.settle().await;

    if let ViewState::Failed(reason) = &app.state {
        anyhow::bail!("Could not load pipeline data from {}: {}", app.endpoint(), reason);
    }

    Ok(app.view().to_plain_text())
}
