// src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::handlers::error::{DashboardError, Result};

/// Document identifier carried by every snapshot; never a symbol.
pub const RESERVED_ID_FIELD: &str = "_id";

pub fn is_symbol_key(key: &str) -> bool {
    key != RESERVED_ID_FIELD
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStat {
    pub book_value: f64,
    /// Percent, e.g. `12.5` for 12.5%.
    pub profit: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockProfile {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangeSeries {
    pub value: Vec<f64>,
    #[serde(rename = "timeStamp")]
    pub time_stamp: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    OneMonth,
    ThreeMonths,
    OneYear,
    #[default]
    FiveYears,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
    ];

    /// Key used by the series document.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::OneYear => "1y",
            TimeRange::FiveYears => "5y",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_lowercase();
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str() == label)
            .ok_or_else(|| DashboardError::InvalidRange(s.to_string()))
    }
}

// Wire envelopes, one per endpoint.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsEnvelope {
    pub stocks_stats_data: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub stocks_profile_data: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEnvelope {
    pub stocks_data: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockStatEntry {
    pub symbol: String,
    pub stat: StockStat,
}

/// Stats document with symbols in document order.
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    entries: Vec<StockStatEntry>,
}

impl StatsSnapshot {
    pub fn from_document(doc: Map<String, Value>) -> Result<Self> {
        let mut entries = Vec::with_capacity(doc.len());
        for (symbol, value) in doc {
            if !is_symbol_key(&symbol) {
                continue;
            }
            let stat: StockStat = serde_json::from_value(value)
                .map_err(|e| DashboardError::MissingField(format!("{}: {}", symbol, e)))?;
            entries.push(StockStatEntry { symbol, stat });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[StockStatEntry] {
        &self.entries
    }

    pub fn get(&self, symbol: &str) -> Option<&StockStat> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| &e.stat)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<StatsEnvelope> for StatsSnapshot {
    type Error = DashboardError;

    fn try_from(envelope: StatsEnvelope) -> Result<Self> {
        let doc = envelope
            .stocks_stats_data
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::MissingField("stocksStatsData[0]".into()))?;
        Self::from_document(doc)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    doc: Option<Map<String, Value>>,
}

impl ProfileSnapshot {
    pub fn from_document(doc: Map<String, Value>) -> Self {
        Self { doc: Some(doc) }
    }

    /// `None` when the symbol, its record or its summary is absent.
    pub fn summary(&self, symbol: &str) -> Option<String> {
        let value = self.doc.as_ref()?.get(symbol)?;
        let profile: StockProfile = serde_json::from_value(value.clone()).ok()?;
        profile.summary
    }
}

impl From<ProfileEnvelope> for ProfileSnapshot {
    fn from(envelope: ProfileEnvelope) -> Self {
        Self {
            doc: envelope
                .stocks_profile_data
                .and_then(|docs| docs.into_iter().next()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesSnapshot {
    doc: Map<String, Value>,
}

impl SeriesSnapshot {
    pub fn from_document(doc: Map<String, Value>) -> Self {
        Self { doc }
    }

    pub fn range_series(&self, symbol: &str, range: TimeRange) -> Result<RangeSeries> {
        let ranges = self
            .doc
            .get(symbol)
            .ok_or_else(|| DashboardError::MissingField(format!("stocksData[0].{}", symbol)))?;
        let series = ranges.get(range.as_str()).ok_or_else(|| {
            DashboardError::MissingField(format!("stocksData[0].{}.{}", symbol, range))
        })?;
        serde_json::from_value(series.clone())
            .map_err(|e| DashboardError::MissingField(format!("{}.{}: {}", symbol, range, e)))
    }
}

impl TryFrom<SeriesEnvelope> for SeriesSnapshot {
    type Error = DashboardError;

    fn try_from(envelope: SeriesEnvelope) -> Result<Self> {
        envelope
            .stocks_data
            .into_iter()
            .next()
            .map(Self::from_document)
            .ok_or_else(|| DashboardError::MissingField("stocksData[0]".into()))
    }
}
