/// Live chart screen
///
/// Layout math lives in plain functions so mouse handling and rendering agree
/// on where the plot is. The chart itself is drawn by ratatui's `Chart`.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::core::{LiveView, Sample, TimeScale, ValueScale};
use crate::utils::{format_age, format_clock, format_price};

const ACCENT: Color = Color::Rgb(237, 255, 234);
const ACCENT_DARK: Color = Color::Rgb(117, 218, 173);
const BACKGROUND: Color = Color::Rgb(59, 105, 120);
const GRID: Color = Color::Rgb(88, 128, 138);

/// Columns between vertical grid lines
const GRID_SPACING: u16 = 10;

/// Screen regions of the graph view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLayout {
    pub header: Rect,
    pub banner: Option<Rect>,
    pub chart: Rect,
    pub plot: Rect,
    pub time_axis: Rect,
}

impl GraphLayout {
    pub fn compute(area: Rect, has_error: bool) -> Self {
        let constraints = if has_error {
            vec![Constraint::Length(3), Constraint::Length(3), Constraint::Min(4)]
        } else {
            vec![Constraint::Length(3), Constraint::Min(4)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let (header, banner, chart) = if has_error {
            (chunks[0], Some(chunks[1]), chunks[2])
        } else {
            (chunks[0], None, chunks[1])
        };

        let inner = Block::default().borders(Borders::ALL).inner(chart);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        Self {
            header,
            banner,
            chart,
            plot: rows[0],
            time_axis: rows[1],
        }
    }

    /// Whether a terminal cell lies inside the plot area
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let p = self.plot;
        p.width > 0
            && p.height > 0
            && column >= p.x
            && column < p.x + p.width
            && row >= p.y
            && row < p.y + p.height
    }

    /// Horizontal cell range the time domain is mapped onto
    pub fn column_range(&self) -> (f64, f64) {
        let left = self.plot.x as f64;
        let right = (self.plot.x + self.plot.width.saturating_sub(1)) as f64;
        (left, right)
    }

    pub fn row_range(&self) -> (f64, f64) {
        let top = self.plot.y as f64;
        let bottom = (self.plot.y + self.plot.height.saturating_sub(1)) as f64;
        (top, bottom)
    }

    pub fn time_scale(&self, view: &LiveView) -> Option<TimeScale> {
        TimeScale::from_buffer(view.buffer(), self.column_range())
    }

    pub fn value_scale(&self, view: &LiveView) -> ValueScale {
        let (top, bottom) = self.row_range();
        ValueScale::from_buffer(view.buffer(), top, bottom)
    }
}

/// Tooltip contents and anchor for a cursor column
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub sample: Sample,
    pub column: u16,
    pub row: u16,
    /// Chart x coordinate of the cursor column, where the guide line is drawn
    pub guide_x: f64,
}

impl Tooltip {
    pub fn value_label(&self) -> String {
        format_price(self.sample.value.unwrap_or_default())
    }

    pub fn time_label(&self) -> String {
        format_clock(self.sample.timestamp)
    }
}

/// Resolve the tooltip for a cursor at `column`, if one should be shown
pub fn tooltip_for(view: &LiveView, layout: &GraphLayout, column: u16) -> Option<Tooltip> {
    let time_scale = layout.time_scale(view)?;
    let position = column as f64;
    let sample = *view.tooltip_at(&time_scale, position)?;

    let value_scale = layout.value_scale(view);
    let (top, bottom) = layout.row_range();
    let row = value_scale
        .apply(sample.value.unwrap_or_default())
        .round()
        .clamp(top, bottom) as u16;

    Some(Tooltip {
        sample,
        column,
        row,
        guide_x: column_to_chart_x(layout, chart_x_bounds(&time_scale), column),
    })
}

/// Chart x bounds for a time scale; a lone sample gets a one-second window
pub fn chart_x_bounds(scale: &TimeScale) -> [f64; 2] {
    let (d0, d1) = scale.domain_seconds();
    if d1 > d0 {
        [d0, d1]
    } else {
        [d0 - 0.5, d0 + 0.5]
    }
}

/// Chart x coordinate drawn at `column`
pub fn column_to_chart_x(layout: &GraphLayout, bounds: [f64; 2], column: u16) -> f64 {
    let (left, right) = layout.column_range();
    if right <= left {
        return (bounds[0] + bounds[1]) / 2.0;
    }
    bounds[0] + (column as f64 - left) / (right - left) * (bounds[1] - bounds[0])
}

/// Linear interpolation of the series at `x`, `None` outside its extent
fn interpolate(points: &[(f64, f64)], x: f64) -> Option<f64> {
    let (first, last) = (points.first()?, points.last()?);
    if x < first.0 || x > last.0 {
        return None;
    }
    let idx = points.partition_point(|p| p.0 < x);
    if idx == 0 {
        return Some(first.1);
    }
    let (x0, y0) = points[idx - 1];
    let (x1, y1) = points[idx];
    if x1 == x0 {
        return Some(y1);
    }
    Some(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
}

/// One block per plot cell lying under the series line
pub fn area_fill_points(layout: &GraphLayout, points: &[(f64, f64)], x_bounds: [f64; 2], y_max: f64) -> Vec<(f64, f64)> {
    let rows = layout.plot.height as usize;
    if rows == 0 || y_max <= 0.0 {
        return Vec::new();
    }

    let mut fill = Vec::new();
    for column in layout.plot.x..layout.plot.x + layout.plot.width {
        let x = column_to_chart_x(layout, x_bounds, column);
        let Some(top) = interpolate(points, x) else {
            continue;
        };
        for r in 0..rows {
            let y = y_max * (r as f64 + 0.5) / rows as f64;
            if y > top {
                break;
            }
            fill.push((x, y));
        }
    }
    fill
}

/// Dotted vertical grid lines roughly every `GRID_SPACING` columns
pub fn grid_points(layout: &GraphLayout, x_bounds: [f64; 2], y_max: f64) -> Vec<(f64, f64)> {
    let plot = layout.plot;
    let rows = plot.height as usize;
    if plot.width < GRID_SPACING * 2 || rows == 0 {
        return Vec::new();
    }

    let lines = plot.width / GRID_SPACING;
    let mut grid = Vec::new();
    for i in 1..lines {
        let column = plot.x + i * plot.width / lines;
        let x = column_to_chart_x(layout, x_bounds, column);
        grid.extend(
            (0..rows)
                .step_by(2)
                .map(|r| (x, y_max * (r as f64 + 0.5) / rows as f64)),
        );
    }
    grid
}

/// Place a `width`x`height` box beside an anchor, flipping left when it
/// would overflow `bounds`
pub fn place_tooltip(anchor_column: u16, anchor_row: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let right_edge = bounds.x + bounds.width;
    let bottom_edge = bounds.y + bounds.height;

    let mut x = anchor_column.saturating_add(2);
    if x + width > right_edge {
        x = anchor_column.saturating_sub(width + 1);
    }
    let x = x.clamp(bounds.x, right_edge - width);

    let y = anchor_row
        .saturating_sub(1)
        .clamp(bounds.y, bottom_edge - height);

    Rect::new(x, y, width, height)
}

/// Single-row label centered on `column`, kept within `bounds`
pub fn place_axis_label(column: u16, label_width: u16, bounds: Rect) -> Rect {
    let width = label_width.min(bounds.width);
    let x = column
        .saturating_sub(width / 2)
        .clamp(bounds.x, bounds.x + bounds.width - width);
    Rect::new(x, bounds.y, width, 1)
}

pub fn render_graph(
    frame: &mut Frame,
    area: Rect,
    view: &LiveView,
    cursor_column: Option<u16>,
    endpoint: &str,
    interval_label: &str,
) {
    let layout = GraphLayout::compute(area, view.error().is_some());

    render_header(frame, layout.header, view, endpoint, interval_label);

    if let (Some(banner), Some(error)) = (layout.banner, view.error()) {
        let text = Paragraph::new(Line::from(vec![
            Span::styled("Failed to load samples: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.to_string(), Style::default().fg(Color::Red)),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
        frame.render_widget(text, banner);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BACKGROUND))
        .title("Live samples");
    frame.render_widget(block, layout.chart);

    if view.buffer().is_empty() {
        let message = if view.error().is_some() {
            "Waiting for the first sample..."
        } else {
            "Loading..."
        };
        let loading = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        let middle = Rect::new(
            layout.plot.x,
            layout.plot.y + layout.plot.height / 2,
            layout.plot.width,
            1.min(layout.plot.height),
        );
        frame.render_widget(loading, middle);
        return;
    }

    let tooltip = cursor_column
        .filter(|&c| layout.contains(c, layout.plot.y))
        .and_then(|c| tooltip_for(view, &layout, c));

    render_chart(frame, &layout, view, tooltip.as_ref());
    render_time_axis(frame, &layout, view);

    if let Some(ref tip) = tooltip {
        render_tooltip(frame, &layout, tip);
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &LiveView, endpoint: &str, interval_label: &str) {
    let buffer = view.buffer();
    let stats = view.stats();

    let latest = match buffer.latest() {
        Some(s) => match s.value {
            Some(v) => format!("{} at {}", format_price(v), format_clock(s.timestamp)),
            None => format!("no value at {}", format_clock(s.timestamp)),
        },
        None => "-".to_string(),
    };

    let updated = view
        .last_update()
        .map(|t| format_age(t, Utc::now()))
        .unwrap_or_else(|| "never".to_string());

    let status_style = if view.error().is_some() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled("Samples: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}/{}", buffer.len(), buffer.capacity()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled("Latest: ", Style::default().fg(Color::Gray)),
        Span::styled(latest, Style::default().fg(ACCENT_DARK)),
        Span::raw("  │  "),
        Span::styled("Updated: ", Style::default().fg(Color::Gray)),
        Span::styled(updated, Style::default().fg(Color::Blue)),
        Span::raw("  │  "),
        Span::styled("OK/Failed: ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{}/{}", stats.succeeded, stats.failed), status_style),
    ]);

    let title = format!("Graph [{} every {}]", endpoint, interval_label);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(header, area);
}

fn render_chart(frame: &mut Frame, layout: &GraphLayout, view: &LiveView, tooltip: Option<&Tooltip>) {
    let points: Vec<(f64, f64)> = view
        .samples()
        .iter()
        .filter_map(|s| s.value.map(|v| (s.epoch_seconds(), v)))
        .collect();

    let Some(time_scale) = layout.time_scale(view) else {
        return;
    };
    let x_bounds = chart_x_bounds(&time_scale);

    let y_max = layout.value_scale(view).domain_max();
    let y_bounds = [0.0, if y_max > 0.0 { y_max } else { 1.0 }];

    let grid = grid_points(layout, x_bounds, y_bounds[1]);
    let fill = area_fill_points(layout, &points, x_bounds, y_bounds[1]);
    let guide: Vec<(f64, f64)>;
    let highlight: Vec<(f64, f64)>;

    let mut datasets = vec![
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(GRID))
            .data(&grid),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(BACKGROUND))
            .data(&fill),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(ACCENT))
            .data(&points),
    ];

    if let Some(tip) = tooltip {
        // Dashed vertical guide: every other step up the plot
        let steps = (layout.plot.height as usize * 2).max(2);
        guide = (0..=steps)
            .filter(|i| i % 4 < 2)
            .map(|i| (tip.guide_x, y_bounds[1] * i as f64 / steps as f64))
            .collect();
        highlight = vec![(tip.sample.epoch_seconds(), tip.sample.value.unwrap_or_default())];

        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(ACCENT_DARK))
                .data(&guide),
        );
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .data(&highlight),
        );
    }

    let chart = Chart::new(datasets)
        .x_axis(Axis::default().bounds(x_bounds))
        .y_axis(Axis::default().bounds(y_bounds));

    frame.render_widget(chart, layout.plot);
}

fn render_time_axis(frame: &mut Frame, layout: &GraphLayout, view: &LiveView) {
    let Some((first, last)) = view.buffer().time_extent() else {
        return;
    };
    let axis = layout.time_axis;
    let dim = Style::default().fg(Color::Gray);

    frame.render_widget(Paragraph::new(format_clock(first)).style(dim), axis);
    if last != first {
        frame.render_widget(
            Paragraph::new(format_clock(last)).style(dim).alignment(Alignment::Right),
            axis,
        );
    }

    // Midpoint label when there is room for all three
    if axis.width >= 30 && last != first {
        let Some(time_scale) = layout.time_scale(view) else {
            return;
        };
        let mid: DateTime<Utc> = first + (last - first) / 2;
        let label = format_clock(mid);
        let column = time_scale.apply(mid).round() as u16;
        let rect = place_axis_label(column, label.len() as u16, axis);
        frame.render_widget(Paragraph::new(label).style(dim), rect);
    }
}

fn render_tooltip(frame: &mut Frame, layout: &GraphLayout, tip: &Tooltip) {
    let value_label = tip.value_label();
    let rect = place_tooltip(tip.column, tip.row, value_label.len() as u16 + 2, 3, layout.plot);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(value_label)
            .style(Style::default().fg(Color::White).bg(BACKGROUND))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White))),
        rect,
    );

    let time_label = format!(" {} ", tip.time_label());
    let rect = place_axis_label(tip.column, time_label.len() as u16, layout.time_axis);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(time_label).style(Style::default().fg(Color::Black).bg(ACCENT)),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::poller::tests::ok;
    use crate::core::{PollEvent, ZeroValuePolicy};
    use ratatui::{backend::TestBackend, Terminal};

    fn view_with(points: &[(f64, f64)]) -> LiveView {
        let mut view = LiveView::new(20, ZeroValuePolicy::Suppress);
        for (i, &(t, v)) in points.iter().enumerate() {
            view.apply(PollEvent {
                tick: i as u64 + 1,
                result: ok(t, v),
            });
        }
        view
    }

    #[test]
    fn test_layout_regions() {
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.header, Rect::new(0, 0, 80, 3));
        assert!(layout.banner.is_none());
        assert_eq!(layout.chart, Rect::new(0, 3, 80, 21));
        assert_eq!(layout.plot, Rect::new(1, 4, 78, 18));
        assert_eq!(layout.time_axis, Rect::new(1, 22, 78, 1));
        assert_eq!(layout.column_range(), (1.0, 78.0));

        let with_error = GraphLayout::compute(Rect::new(0, 0, 80, 24), true);
        assert_eq!(with_error.banner, Some(Rect::new(0, 3, 80, 3)));
        assert_eq!(with_error.plot, Rect::new(1, 7, 78, 15));
    }

    #[test]
    fn test_contains() {
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        assert!(layout.contains(1, 4));
        assert!(layout.contains(78, 21));
        assert!(!layout.contains(0, 10));
        assert!(!layout.contains(79, 10));
        assert!(!layout.contains(10, 22));
    }

    #[test]
    fn test_tooltip_snaps_to_nearest_sample() {
        let view = view_with(&[(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]);
        // Plot columns 1..=78 cover two seconds
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);

        let tip = tooltip_for(&view, &layout, 1).unwrap();
        assert_eq!(tip.sample.value, Some(100.0));

        let tip = tooltip_for(&view, &layout, 45).unwrap();
        assert_eq!(tip.sample.value, Some(200.0));
        assert_eq!(tip.value_label(), "$200.00");

        let tip = tooltip_for(&view, &layout, 78).unwrap();
        assert_eq!(tip.sample.value, Some(300.0));
        // Domain tops out at 400, so 300 sits a quarter of the way down
        let (top, bottom) = layout.row_range();
        assert_eq!(tip.row as f64, (top + (bottom - top) * 0.25).round());
    }

    /// Column the chart draws chart-space `x` at, given the same bounds
    fn chart_x_to_column(layout: &GraphLayout, bounds: [f64; 2], x: f64) -> f64 {
        let (left, right) = layout.column_range();
        left + (x - bounds[0]) / (bounds[1] - bounds[0]) * (right - left)
    }

    #[test]
    fn test_guide_follows_cursor_with_single_sample() {
        let view = view_with(&[(5.0, 250.0)]);
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        let bounds = chart_x_bounds(&layout.time_scale(&view).unwrap());
        assert_eq!(bounds, [4.5, 5.5]);

        for column in [1, 5, 40, 78] {
            let tip = tooltip_for(&view, &layout, column).unwrap();
            assert_eq!(tip.column, column);
            let drawn_at = chart_x_to_column(&layout, bounds, tip.guide_x);
            assert!((drawn_at - column as f64).abs() < 1e-9, "column {column} drawn at {drawn_at}");
        }
    }

    #[test]
    fn test_guide_follows_cursor_with_many_samples() {
        let view = view_with(&[(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]);
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        let scale = layout.time_scale(&view).unwrap();
        let bounds = chart_x_bounds(&scale);
        assert_eq!(bounds, [0.0, 2.0]);

        for column in [1, 30, 45, 78] {
            let tip = tooltip_for(&view, &layout, column).unwrap();
            assert!((chart_x_to_column(&layout, bounds, tip.guide_x) - column as f64).abs() < 1e-9);
            assert!((tip.guide_x - scale.invert_seconds(column as f64)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_area_fill_stays_under_line() {
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        let points = [(0.0, 100.0), (2.0, 300.0)];
        let fill = area_fill_points(&layout, &points, [0.0, 2.0], 400.0);

        assert!(!fill.is_empty());
        for &(x, y) in &fill {
            let line = 100.0 + x * 100.0;
            assert!(y > 0.0 && y <= line + 1e-9, "({x}, {y}) above line {line}");
        }
        // Taller at the right end than at the left
        let left = fill.iter().filter(|p| p.0 == 0.0).count();
        let right = fill.iter().filter(|p| p.0 == 2.0).count();
        assert!(right > left);

        assert!(area_fill_points(&layout, &points, [0.0, 2.0], 0.0).is_empty());
    }

    #[test]
    fn test_grid_lines_inside_bounds() {
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        let grid = grid_points(&layout, [0.0, 2.0], 400.0);

        let mut columns: Vec<f64> = grid.iter().map(|p| p.0).collect();
        columns.dedup();
        assert_eq!(columns.len(), 6);
        assert!(grid.iter().all(|&(x, y)| x > 0.0 && x < 2.0 && y > 0.0 && y < 400.0));

        let narrow = GraphLayout::compute(Rect::new(0, 0, 12, 24), false);
        assert!(grid_points(&narrow, [0.0, 2.0], 400.0).is_empty());
    }

    #[test]
    fn test_no_tooltip_without_data() {
        let view = view_with(&[]);
        let layout = GraphLayout::compute(Rect::new(0, 0, 80, 24), false);
        assert!(tooltip_for(&view, &layout, 10).is_none());
    }

    #[test]
    fn test_place_tooltip_flips_at_right_edge() {
        let bounds = Rect::new(1, 4, 78, 18);

        assert_eq!(place_tooltip(10, 10, 9, 3, bounds), Rect::new(12, 9, 9, 3));
        assert_eq!(place_tooltip(75, 10, 9, 3, bounds), Rect::new(65, 9, 9, 3));
        // Top edge clamps downward, bottom edge upward
        assert_eq!(place_tooltip(10, 4, 9, 3, bounds), Rect::new(12, 4, 9, 3));
        assert_eq!(place_tooltip(10, 21, 9, 3, bounds), Rect::new(12, 19, 9, 3));
    }

    #[test]
    fn test_place_axis_label_stays_in_bounds() {
        let axis = Rect::new(1, 22, 78, 1);
        assert_eq!(place_axis_label(40, 10, axis), Rect::new(35, 22, 10, 1));
        assert_eq!(place_axis_label(2, 10, axis), Rect::new(1, 22, 10, 1));
        assert_eq!(place_axis_label(78, 10, axis), Rect::new(69, 22, 10, 1));
    }

    #[test]
    fn test_render_shows_value_tooltip() {
        let view = view_with(&[(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| render_graph(f, f.size(), &view, Some(45), "http://test", "1s"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("$200.00"));
        assert!(text.contains("Samples: 3/20"));
    }

    #[test]
    fn test_render_loading_and_error() {
        let mut view = view_with(&[]);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| render_graph(f, f.size(), &view, None, "http://test", "1s"))
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Loading..."));

        view.apply(PollEvent {
            tick: 1,
            result: Err(crate::core::FetchError::Decode("bad".to_string())),
        });
        terminal
            .draw(|f| render_graph(f, f.size(), &view, None, "http://test", "1s"))
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Failed to load samples"));
    }
}
