/// Main TUI application

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::{ClusterNode, FetchError, HttpSampleSource, LiveView, NodeClient};
use crate::screens::dashboard::{self, frame_layout, DashboardView, NodesState};
use crate::screens::graph::GraphLayout;
use crate::utils::AppConfig;

/// How long a status message stays in the footer
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Graph,
    Nodes,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Graph => "Graph",
            Screen::Nodes => "Nodes",
        }
    }

    pub fn all() -> &'static [Screen] {
        &[Screen::Graph, Screen::Nodes]
    }

    pub fn key_hints(&self) -> &'static str {
        match self {
            Screen::Graph => "[q] Quit  [Tab] Switch  [mouse/←→] Inspect  [c] Clear cursor  [?] Help",
            Screen::Nodes => "[q] Quit  [Tab] Switch  [↑↓] Select  [r] Refresh  [?] Help",
        }
    }

    fn next(&self) -> Screen {
        match self {
            Screen::Graph => Screen::Nodes,
            Screen::Nodes => Screen::Graph,
        }
    }
}

type NodesResult = Result<Vec<ClusterNode>, FetchError>;

pub struct App {
    config: AppConfig,
    live: LiveView,
    node_client: NodeClient,
    current_screen: Screen,
    should_quit: bool,
    show_help: bool,
    status_message: Option<(String, Instant)>,
    /// Column of the last pointer position inside the plot
    cursor_column: Option<u16>,
    /// Terminal size as of the last draw
    frame_area: Rect,
    interval_label: String,
    // Node list
    nodes: Vec<ClusterNode>,
    nodes_error: Option<String>,
    nodes_loading: bool,
    selected_node: usize,
    nodes_tx: UnboundedSender<NodesResult>,
    nodes_rx: UnboundedReceiver<NodesResult>,
}

impl App {
    /// Build the app and mount the live view; must run inside a tokio runtime
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let source = HttpSampleSource::new(&config.endpoint, config.request_timeout)
            .context("Failed to create HTTP client")?;
        let node_client = NodeClient::new(&config.endpoint, config.request_timeout)
            .context("Failed to create HTTP client")?;

        tracing::info!(
            url = source.url(),
            capacity = config.capacity,
            interval = ?config.poll_interval,
            "mounting live view"
        );
        let live = LiveView::mount(
            source,
            config.capacity,
            config.poll_interval,
            config.zero_value_policy(),
        );

        let (nodes_tx, nodes_rx) = mpsc::unbounded_channel();
        let interval_label = humantime::format_duration(config.poll_interval).to_string();

        Ok(Self {
            config,
            live,
            node_client,
            current_screen: Screen::Graph,
            should_quit: false,
            show_help: false,
            status_message: None,
            cursor_column: None,
            frame_area: Rect::default(),
            interval_label,
            nodes: Vec::new(),
            nodes_error: None,
            nodes_loading: false,
            selected_node: 0,
            nodes_tx,
            nodes_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.refresh_nodes();

        let result = self.run_loop(&mut terminal).await;

        self.live.teardown();

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Apply finished polls (non-blocking)
            self.live.drain();

            while let Ok(result) = self.nodes_rx.try_recv() {
                self.apply_nodes(result);
            }

            if let Some((_, since)) = self.status_message {
                if since.elapsed() >= STATUS_TTL {
                    self.status_message = None;
                }
            }

            self.frame_area = terminal.size()?;
            terminal.draw(|f| self.render(f))?;

            // Short poll keeps the UI responsive while the event loop yields
            // to the poller task in between frames
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
            tokio::task::yield_now().await;

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let view = DashboardView {
            screen: self.current_screen,
            live: &self.live,
            cursor_column: self.cursor_column,
            nodes: NodesState {
                nodes: &self.nodes,
                error: self.nodes_error.as_deref(),
                loading: self.nodes_loading,
                selected: self.selected_node,
            },
            endpoint: &self.config.endpoint,
            interval_label: &self.interval_label,
            status_message: self.status_message.as_ref().map(|(m, _)| m.as_str()),
            show_help: self.show_help,
        };
        dashboard::render(frame, &view);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn graph_layout(&self) -> GraphLayout {
        let (_, body, _) = frame_layout(self.frame_area);
        GraphLayout::compute(body, self.live.error().is_some())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_screen(self.current_screen.next()),
            KeyCode::Char('1') => self.switch_screen(Screen::Graph),
            KeyCode::Char('2') => self.switch_screen(Screen::Nodes),
            _ => match self.current_screen {
                Screen::Graph => self.handle_graph_key(key.code),
                Screen::Nodes => self.handle_nodes_key(key.code),
            },
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        if screen == self.current_screen {
            return;
        }
        self.current_screen = screen;
        self.cursor_column = None;
        if screen == Screen::Nodes && self.nodes.is_empty() && !self.nodes_loading {
            self.refresh_nodes();
        }
    }

    fn handle_graph_key(&mut self, code: KeyCode) {
        let plot = self.graph_layout().plot;
        if plot.width == 0 {
            return;
        }
        let (left, right) = (plot.x, plot.x + plot.width - 1);

        match code {
            KeyCode::Left => {
                self.cursor_column = Some(match self.cursor_column {
                    Some(c) => c.saturating_sub(1).max(left),
                    None => right,
                });
            }
            KeyCode::Right => {
                self.cursor_column = Some(match self.cursor_column {
                    Some(c) => (c + 1).min(right),
                    None => left,
                });
            }
            KeyCode::Char('c') => self.cursor_column = None,
            _ => {}
        }
    }

    fn handle_nodes_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.selected_node = self.selected_node.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_node + 1 < self.nodes.len() {
                    self.selected_node += 1;
                }
            }
            KeyCode::Char('r') => self.refresh_nodes(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.current_screen != Screen::Graph || self.show_help {
            return;
        }

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                let layout = self.graph_layout();
                // Leaving the plot hides the tooltip
                self.cursor_column = layout
                    .contains(mouse.column, mouse.row)
                    .then_some(mouse.column);
            }
            _ => {}
        }
    }

    /// Fetch the node list in the background
    fn refresh_nodes(&mut self) {
        if self.nodes_loading {
            return;
        }
        self.nodes_loading = true;
        self.set_status("Refreshing nodes...");

        let client = self.node_client.clone();
        let tx = self.nodes_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(client.fetch_nodes().await);
        });
    }

    fn apply_nodes(&mut self, result: NodesResult) {
        self.nodes_loading = false;
        match result {
            Ok(nodes) => {
                tracing::info!(count = nodes.len(), "node list refreshed");
                self.selected_node = self.selected_node.min(nodes.len().saturating_sub(1));
                self.nodes = nodes;
                self.nodes_error = None;
                self.set_status(format!("Loaded {} nodes", self.nodes.len()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "node list refresh failed");
                self.nodes_error = Some(e.to_string());
                self.set_status("Node refresh failed");
            }
        }
    }
}
