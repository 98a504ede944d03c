// src/view/mod.rs
//! Presentation boundary of the dashboard.
//!
//! A view exposes four anchors: the stocks list, the details section, the
//! chart surface and the range buttons. Any of them may be missing, in which
//! case the rendering path that needs it is aborted and logged.

pub mod terminal;

use crate::handlers::chart::LineChart;

pub const STOCKS_LIST_ID: &str = "stocks-list";
pub const DETAILS_SECTION_ID: &str = "details-section";
pub const STOCK_CHART_ID: &str = "stockChart";
pub const CHART_BUTTONS_ID: &str = "chart-btn";

#[derive(Debug, Clone, PartialEq)]
pub struct StockListItem {
    pub symbol: String,
    pub book_value: String,
    pub profit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsBlock {
    pub symbol: String,
    pub book_value: String,
    pub profit: String,
    pub summary: String,
}

/// Opaque id of a chart attached to a [`ChartSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// A range button; `data_time` is the raw label it carries, e.g. `1Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeButton {
    pub data_time: String,
}

impl RangeButton {
    pub fn new(data_time: impl Into<String>) -> Self {
        Self {
            data_time: data_time.into(),
        }
    }
}

pub trait ListContainer {
    /// Drop whatever is listed and show `items` instead.
    fn replace_items(&mut self, items: Vec<StockListItem>);
}

pub trait DetailsPanel {
    fn replace_details(&mut self, details: DetailsBlock);
}

pub trait ChartSurface {
    fn draw(&mut self, chart: &LineChart) -> ChartHandle;

    fn destroy(&mut self, handle: ChartHandle);
}

pub trait DashboardView {
    fn stocks_list(&mut self) -> Option<&mut dyn ListContainer>;

    fn details_section(&mut self) -> Option<&mut dyn DetailsPanel>;

    fn stock_chart(&mut self) -> Option<&mut dyn ChartSurface>;

    fn range_buttons(&self) -> Vec<RangeButton>;
}
