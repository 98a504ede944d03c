// src/handlers/range.rs
use log::{info, warn};

use super::error::{DashboardError, Result};
use crate::models::TimeRange;
use crate::view::{DashboardView, CHART_BUTTONS_ID};

#[derive(Debug, Clone, PartialEq)]
pub struct RangeBinding {
    pub data_time: String,
    pub range: TimeRange,
}

/// Range buttons resolved once when the dashboard starts. Clicks are
/// looked up here; the symbol they apply to is owned by the dashboard.
#[derive(Debug, Clone, Default)]
pub struct RangeControls {
    bindings: Vec<RangeBinding>,
}

impl RangeControls {
    pub fn bind(view: &dyn DashboardView) -> Self {
        let buttons = view.range_buttons();
        if buttons.is_empty() {
            warn!("No range buttons found in '#{}'", CHART_BUTTONS_ID);
        }

        let mut bindings = Vec::with_capacity(buttons.len());
        for button in buttons {
            match button.data_time.to_lowercase().parse::<TimeRange>() {
                Ok(range) => bindings.push(RangeBinding {
                    data_time: button.data_time,
                    range,
                }),
                Err(e) => warn!("Skipping range button: {}", e),
            }
        }

        info!("Bound {} range buttons", bindings.len());
        Self { bindings }
    }

    pub fn bindings(&self) -> &[RangeBinding] {
        &self.bindings
    }

    /// Range of the button whose `data-time` matches `clicked`.
    pub fn resolve(&self, clicked: &str) -> Result<TimeRange> {
        let clicked = clicked.trim();
        self.bindings
            .iter()
            .find(|b| b.data_time.eq_ignore_ascii_case(clicked))
            .map(|b| b.range)
            .ok_or_else(|| DashboardError::InvalidRange(clicked.to_string()))
    }
}
