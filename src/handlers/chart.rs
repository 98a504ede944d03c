// src/handlers/chart.rs
use log::{debug, info};

use super::error::{DashboardError, Result};
use crate::services::format::format_money;
use crate::services::series::ChartData;
use crate::view::{ChartHandle, DashboardView, STOCK_CHART_ID};

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Stock Price (USD)";
pub const LINE_COLOR: &str = "rgb(75, 192, 192)";
pub const LINE_TENSION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
    Bottom,
}

/// Fully specified line chart, ready for a surface to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub data: ChartData,
    pub fill: bool,
    pub border_color: &'static str,
    pub tension: f64,
    pub legend: LegendPosition,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

impl LineChart {
    pub fn new(data: ChartData) -> Self {
        LineChart {
            data,
            fill: false,
            border_color: LINE_COLOR,
            tension: LINE_TENSION,
            legend: LegendPosition::Top,
            x_title: X_AXIS_TITLE,
            y_title: Y_AXIS_TITLE,
        }
    }

    pub fn tooltip_label(&self, value: f64) -> String {
        format!("Price: {}", format_money(value))
    }
}

/// Holds the one chart currently attached to the view's chart surface.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    current: Option<ChartHandle>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ChartHandle> {
        self.current
    }

    /// Dispose the live chart, if any, then draw `data` in its place.
    pub fn plot(&mut self, view: &mut dyn DashboardView, data: ChartData) -> Result<ChartHandle> {
        let surface = view
            .stock_chart()
            .ok_or(DashboardError::MissingElement(STOCK_CHART_ID))?;

        if let Some(previous) = self.current.take() {
            debug!("Destroying chart {:?}", previous);
            surface.destroy(previous);
        }

        let chart = LineChart::new(data);
        let handle = surface.draw(&chart);
        info!("Plotted '{}' with {} points", chart.data.title, chart.data.len());
        self.current = Some(handle);
        Ok(handle)
    }
}
