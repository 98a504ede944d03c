// src/handlers/stats_list.rs
use log::info;

use super::error::{DashboardError, Result};
use crate::models::{StatsSnapshot, StockStatEntry};
use crate::services::format::{format_money, format_percent};
use crate::view::{DashboardView, StockListItem, STOCKS_LIST_ID};

pub fn list_item(entry: &StockStatEntry) -> StockListItem {
    StockListItem {
        symbol: entry.symbol.clone(),
        book_value: format!("Book Value: {}", format_money(entry.stat.book_value)),
        profit: format!("Profit: {}", format_percent(entry.stat.profit)),
    }
}

/// Replace the stocks list with one item per symbol. Returns how many items
/// were rendered.
pub fn render_stats_list(view: &mut dyn DashboardView, stats: &StatsSnapshot) -> Result<usize> {
    let list = view
        .stocks_list()
        .ok_or(DashboardError::MissingElement(STOCKS_LIST_ID))?;

    let items: Vec<StockListItem> = stats.entries().iter().map(list_item).collect();
    let count = items.len();
    list.replace_items(items);

    info!("Rendered {} stocks in the list", count);
    Ok(count)
}
