// src/view/terminal.rs
use log::{debug, error, warn};
use std::io::{self, Write};

use super::{
    ChartHandle, ChartSurface, DashboardView, DetailsBlock, DetailsPanel, ListContainer,
    RangeButton, StockListItem,
};
use crate::handlers::chart::{LegendPosition, LineChart};
use crate::services::format::format_money;

const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 12;

/// Draws the dashboard as text on any writer (stdout in the binary).
pub struct TerminalView<W: Write> {
    out: W,
    buttons: Vec<RangeButton>,
    items: Vec<StockListItem>,
    live_chart: Option<ChartHandle>,
    next_chart: u64,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, range_labels: &[String]) -> Self {
        TerminalView {
            out,
            buttons: range_labels.iter().map(RangeButton::new).collect(),
            items: Vec::new(),
            live_chart: None,
            next_chart: 0,
        }
    }

    pub fn items(&self) -> &[StockListItem] {
        &self.items
    }

    pub fn live_chart(&self) -> Option<ChartHandle> {
        self.live_chart
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            error!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> ListContainer for TerminalView<W> {
    fn replace_items(&mut self, items: Vec<StockListItem>) {
        let mut lines = vec![String::new(), "== Stocks ==".to_string()];
        for item in &items {
            lines.push(format!("  {:<8} {:<24} {}", item.symbol, item.book_value, item.profit));
        }
        self.items = items;
        self.emit(&lines);
    }
}

impl<W: Write> DetailsPanel for TerminalView<W> {
    fn replace_details(&mut self, details: DetailsBlock) {
        let lines = vec![
            String::new(),
            "== Stock Details ==".to_string(),
            format!("Stock: {}", details.symbol),
            format!("Book Value: {}", details.book_value),
            format!("Profit: {}", details.profit),
            format!("Summary: {}", details.summary),
        ];
        self.emit(&lines);
    }
}

impl<W: Write> ChartSurface for TerminalView<W> {
    fn draw(&mut self, chart: &LineChart) -> ChartHandle {
        if let Some(live) = self.live_chart {
            warn!("Drawing over chart {:?} that was never destroyed", live);
        }
        self.next_chart += 1;
        let handle = ChartHandle(self.next_chart);
        self.live_chart = Some(handle);

        let lines = render_chart(chart);
        self.emit(&lines);
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        match self.live_chart {
            Some(live) if live == handle => {
                debug!("Chart {:?} destroyed", handle);
                self.live_chart = None;
            }
            _ => warn!("Chart {:?} is not attached", handle),
        }
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn stocks_list(&mut self) -> Option<&mut dyn ListContainer> {
        Some(self)
    }

    fn details_section(&mut self) -> Option<&mut dyn DetailsPanel> {
        Some(self)
    }

    fn stock_chart(&mut self) -> Option<&mut dyn ChartSurface> {
        Some(self)
    }

    fn range_buttons(&self) -> Vec<RangeButton> {
        self.buttons.clone()
    }
}

/// Text rendering of a line chart: title and legend, a point grid with
/// price gutter, and the first/last date under the x axis.
pub fn render_chart(chart: &LineChart) -> Vec<String> {
    let data = &chart.data;
    let mut lines = vec![String::new()];
    let legend = format!("-- {}", data.title);

    if chart.legend == LegendPosition::Top {
        lines.push(legend.clone());
    }
    lines.push(format!("[{}]", chart.y_title));

    if data.is_empty() {
        lines.push("  (no data)".to_string());
    } else {
        let (min, max) = data
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let top = format_money(max);
        let bottom = format_money(min);
        let gutter = top.len().max(bottom.len());

        for (row, cells) in plot_grid(&data.values, PLOT_WIDTH, PLOT_HEIGHT).iter().enumerate() {
            let label = if row == 0 {
                top.as_str()
            } else if row == PLOT_HEIGHT - 1 {
                bottom.as_str()
            } else {
                ""
            };
            lines.push(format!("{:>gutter$} |{}", label, cells, gutter = gutter));
        }
        lines.push(format!("{:>gutter$} +{}", "", "-".repeat(PLOT_WIDTH), gutter = gutter));

        let first = data.labels.first().map(String::as_str).unwrap_or("");
        let last = data.labels.last().map(String::as_str).unwrap_or("");
        let span = PLOT_WIDTH.saturating_sub(first.len());
        lines.push(format!(
            "{:>gutter$}  {}{:>span$}",
            "",
            first,
            last,
            gutter = gutter,
            span = span
        ));
        lines.push(format!("{:>gutter$}  [{}]", "", chart.x_title, gutter = gutter));

        if let Some(&latest) = data.values.last() {
            lines.push(format!("Latest {}", chart.tooltip_label(latest)));
        }
    }

    if chart.legend == LegendPosition::Bottom {
        lines.push(legend);
    }
    lines
}

/// Rows of `height` strings `width` wide, top row first. Each column shows
/// the value sampled at its position in the series.
pub fn plot_grid(values: &[f64], width: usize, height: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; width]; height];
    if values.is_empty() || width == 0 || height == 0 {
        return grid.into_iter().map(|row| row.into_iter().collect()).collect();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let spread = max - min;
    let columns = width.min(values.len());

    for col in 0..columns {
        let idx = if columns == 1 {
            0
        } else {
            col * (values.len() - 1) / (columns - 1)
        };
        let level = if spread > 0.0 {
            ((values[idx] - min) / spread * (height - 1) as f64).round() as usize
        } else {
            (height - 1) / 2
        };
        grid[height - 1 - level.min(height - 1)][col] = '*';
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Convenience constructor for the binary.
pub fn stdout_view(range_labels: &[String]) -> TerminalView<io::Stdout> {
    TerminalView::new(io::stdout(), range_labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::series::ChartData;

    fn chart(values: Vec<f64>) -> LineChart {
        let labels = (1..=values.len()).map(|d| format!("1/{}/2024", d)).collect();
        LineChart::new(ChartData {
            title: "AAPL Stock Price (1m)".to_string(),
            labels,
            values,
        })
    }

    #[test]
    fn grid_puts_extremes_on_outer_rows() {
        let grid = plot_grid(&[1.0, 5.0, 3.0], 3, 5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], " * ");
        assert_eq!(grid[4], "*  ");
        assert_eq!(grid[2], "  *");
    }

    #[test]
    fn flat_series_sits_mid_height() {
        let grid = plot_grid(&[2.0, 2.0], 2, 5);
        assert_eq!(grid[2], "**");
    }

    #[test]
    fn chart_text_carries_titles_and_dates() {
        let text = render_chart(&chart(vec![100.0, 110.0])).join("\n");
        assert!(text.contains("-- AAPL Stock Price (1m)"));
        assert!(text.contains("[Stock Price (USD)]"));
        assert!(text.contains("[Date]"));
        assert!(text.contains("1/1/2024"));
        assert!(text.contains("1/2/2024"));
        assert!(text.contains("Latest Price: $110.00"));
    }

    #[test]
    fn one_chart_attached_at_a_time() {
        let mut view = TerminalView::new(Vec::new(), &["1M".to_string()]);
        let first = view.draw(&chart(vec![1.0]));
        view.destroy(first);
        assert_eq!(view.live_chart(), None);

        let second = view.draw(&chart(vec![2.0]));
        assert_ne!(first, second);
        assert_eq!(view.live_chart(), Some(second));
    }

    #[test]
    fn list_and_details_are_written_out() {
        let mut view = TerminalView::new(Vec::new(), &[]);
        view.replace_items(vec![StockListItem {
            symbol: "AAPL".into(),
            book_value: "Book Value: $150.20".into(),
            profit: "Profit: 12.35%".into(),
        }]);
        view.replace_details(DetailsBlock {
            symbol: "AAPL".into(),
            book_value: "$150.20".into(),
            profit: "12.35%".into(),
            summary: String::new(),
        });

        assert_eq!(view.items().len(), 1);
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("AAPL"));
        assert!(text.contains("Book Value: $150.20"));
        assert!(text.contains("== Stock Details =="));
        assert!(text.contains("Summary: "));
    }
}
