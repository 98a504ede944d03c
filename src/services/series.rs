// src/services/series.rs
use chrono_tz::Tz;
use log::debug;

use super::format::format_date;
use crate::handlers::error::{DashboardError, Result};
use crate::models::{SeriesSnapshot, TimeRange};

/// Input of the chart renderer: one label per point, in series order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pull `symbol`/`range` out of the series snapshot and pair each price with
/// its date label. Points keep the order of the document.
pub fn prepare_series(
    snapshot: &SeriesSnapshot,
    range: TimeRange,
    symbol: &str,
    tz: Tz,
) -> Result<ChartData> {
    let series = snapshot.range_series(symbol, range)?;

    if series.value.len() != series.time_stamp.len() {
        return Err(DashboardError::SeriesShape {
            symbol: symbol.to_string(),
            range: range.to_string(),
            values: series.value.len(),
            timestamps: series.time_stamp.len(),
        });
    }

    let labels = series
        .time_stamp
        .iter()
        .map(|&ts| format_date(ts, tz))
        .collect();
    debug!("Prepared {} points for {} ({})", series.value.len(), symbol, range);

    Ok(ChartData {
        title: format!("{} Stock Price ({})", symbol, range),
        labels,
        values: series.value,
    })
}
