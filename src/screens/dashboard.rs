/// Main dashboard frame: tab bar, screen body, footer and help overlay

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::Screen;
use crate::core::nodes::{stage_counts, ClusterNode, NodeStage};
use crate::core::LiveView;
use crate::screens::graph::render_graph;
use crate::utils::truncate;

/// Node table state as seen by the renderer
#[derive(Debug, Clone, Copy)]
pub struct NodesState<'a> {
    pub nodes: &'a [ClusterNode],
    pub error: Option<&'a str>,
    pub loading: bool,
    pub selected: usize,
}

/// Everything one frame needs
pub struct DashboardView<'a> {
    pub screen: Screen,
    pub live: &'a LiveView,
    pub cursor_column: Option<u16>,
    pub nodes: NodesState<'a>,
    pub endpoint: &'a str,
    pub interval_label: &'a str,
    pub status_message: Option<&'a str>,
    pub show_help: bool,
}

/// Split the whole terminal into tab bar, body and footer
pub fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn render(frame: &mut Frame, view: &DashboardView) {
    let (tabs, body, footer) = frame_layout(frame.size());

    frame.render_widget(render_tab_bar(view.screen), tabs);

    match view.screen {
        Screen::Graph => render_graph(
            frame,
            body,
            view.live,
            view.cursor_column,
            view.endpoint,
            view.interval_label,
        ),
        Screen::Nodes => render_nodes(frame, body, &view.nodes),
    }

    let footer_text = match view.status_message {
        Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Yellow))),
        None => Line::from(Span::styled(
            view.screen.key_hints(),
            Style::default().fg(Color::Gray),
        )),
    };
    frame.render_widget(Paragraph::new(footer_text).alignment(Alignment::Center), footer);

    if view.show_help {
        render_help(frame);
    }
}

fn render_tab_bar(current: Screen) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        " Cluster dashboard ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, screen) in Screen::all().iter().enumerate() {
        let label = format!(" [{}] {} ", i + 1, screen.title());
        let style = if *screen == current {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }

    Paragraph::new(Line::from(spans))
}

pub fn stage_color(stage: NodeStage) -> Color {
    match stage {
        NodeStage::Running => Color::Green,
        NodeStage::Loading => Color::Yellow,
        NodeStage::Waiting => Color::Cyan,
        NodeStage::Stopped => Color::Red,
    }
}

fn render_nodes(frame: &mut Frame, area: Rect, state: &NodesState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Summary
    let mut spans = vec![
        Span::styled("Nodes: ", Style::default().fg(Color::White)),
        Span::styled(
            state.nodes.len().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    for (stage, count) in stage_counts(state.nodes) {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("{}: {}", stage, count),
            Style::default().fg(stage_color(stage)),
        ));
    }
    if state.loading {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled("refreshing...", Style::default().fg(Color::Gray)));
    }
    let summary = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(summary, chunks[0]);

    let mut table_area = chunks[1];
    if let Some(error) = state.error {
        let message = Paragraph::new(format!("Failed to load cluster nodes: {}", error))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Cluster nodes"));

        if state.nodes.is_empty() {
            frame.render_widget(message, table_area);
            return;
        }

        // Keep the last good list visible below the error
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(table_area);
        frame.render_widget(message, split[0]);
        table_area = split[1];
    }

    if state.nodes.is_empty() {
        let text = if state.loading { "Loading..." } else { "No nodes reported" };
        let message = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Cluster nodes"));
        frame.render_widget(message, chunks[1]);
        return;
    }

    let header = Row::new(vec!["ID", "IP address", "Cluster", "Stage"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let row = Row::new(vec![
                Cell::from(node.id.to_string()),
                Cell::from(truncate(&node.ip_address, 18)),
                Cell::from(truncate(&node.cluster_id, 10)),
                Cell::from(Span::styled(
                    node.stage.to_string(),
                    Style::default().fg(stage_color(node.stage)).add_modifier(Modifier::BOLD),
                )),
            ]);

            if idx == state.selected {
                row.style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let title = if state.error.is_some() {
        "Cluster nodes (last known)"
    } else {
        "Cluster nodes"
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),  // ID
            Constraint::Length(20), // IP address
            Constraint::Length(12), // Cluster
            Constraint::Min(10),    // Stage
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, table_area);
}

/// Centered rectangle taking `percent_x`/`percent_y` of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.size());
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled("Navigation", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("  Tab / 1 / 2  ", key), Span::raw("Switch screen")]),
        Line::from(vec![Span::styled("  q / Esc      ", key), Span::raw("Quit (Esc closes this help)")]),
        Line::from(vec![Span::styled("  ?            ", key), Span::raw("Toggle help")]),
        Line::from(""),
        Line::from(Span::styled("Graph", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("  Mouse        ", key), Span::raw("Hover the plot to inspect a sample")]),
        Line::from(vec![Span::styled("  ← / →        ", key), Span::raw("Move the cursor one column")]),
        Line::from(vec![Span::styled("  c            ", key), Span::raw("Clear the cursor")]),
        Line::from(""),
        Line::from(Span::styled("Nodes", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("  ↑ / ↓        ", key), Span::raw("Select node")]),
        Line::from(vec![Span::styled("  r            ", key), Span::raw("Refresh node list")]),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false }),
        area,
    );
}
