// src/handlers/details.rs
use log::warn;

use super::error::{DashboardError, Result};
use crate::models::{ProfileSnapshot, StockStat};
use crate::services::format::{format_money, format_percent};
use crate::view::{DashboardView, DetailsBlock, DETAILS_SECTION_ID};

pub fn details_block(symbol: &str, stat: &StockStat, profiles: &ProfileSnapshot) -> DetailsBlock {
    let summary = profiles.summary(symbol).unwrap_or_else(|| {
        warn!("Summary for {} is not available.", symbol);
        String::new()
    });

    DetailsBlock {
        symbol: symbol.to_string(),
        book_value: format_money(stat.book_value),
        profit: format_percent(stat.profit),
        summary,
    }
}

pub fn render_details(
    view: &mut dyn DashboardView,
    symbol: &str,
    stat: &StockStat,
    profiles: &ProfileSnapshot,
) -> Result<()> {
    let panel = view
        .details_section()
        .ok_or(DashboardError::MissingElement(DETAILS_SECTION_ID))?;
    panel.replace_details(details_block(symbol, stat, profiles));
    Ok(())
}
