#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use stock_dashboard::handlers::chart::LineChart;
use stock_dashboard::handlers::error::{DashboardError, Result};
use stock_dashboard::models::{ProfileSnapshot, SeriesSnapshot, StatsSnapshot};
use stock_dashboard::services::api::StockSource;
use stock_dashboard::view::{
    ChartHandle, ChartSurface, DashboardView, DetailsBlock, DetailsPanel, ListContainer,
    RangeButton, StockListItem,
};

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn stats_doc() -> Map<String, Value> {
    object(json!({
        "_id": "x",
        "AAPL": {"bookValue": 150.2, "profit": 12.345},
        "MSFT": {"bookValue": 40.5, "profit": 8.0},
        "TSLA": {"bookValue": 20.0, "profit": -3.5}
    }))
}

pub fn profiles_doc() -> Map<String, Value> {
    object(json!({
        "_id": "p",
        "AAPL": {"summary": "Apple designs consumer electronics."},
        "MSFT": {"summary": "Microsoft builds software."}
    }))
}

pub fn series_doc() -> Map<String, Value> {
    object(json!({
        "_id": "s",
        "AAPL": {
            "1y": {"value": [100, 110], "timeStamp": [1700000000, 1700086400]},
            "5y": {"value": [50, 80, 110], "timeStamp": [1600000000, 1650000000, 1700000000]}
        },
        "MSFT": {
            "5y": {"value": [200, 300], "timeStamp": [1600000000, 1700000000]}
        },
        "TSLA": {
            "5y": {"value": [30, 20, 25, 40], "timeStamp": [1600000000, 1620000000, 1650000000, 1700000000]}
        }
    }))
}

/// In-memory source that counts calls and can delay or fail them.
#[derive(Default)]
pub struct FakeSource {
    pub stats: Map<String, Value>,
    pub profiles: Map<String, Value>,
    pub series: Map<String, Value>,
    pub stats_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub series_calls: AtomicUsize,
    pub fail_profiles: AtomicBool,
    pub fail_series: AtomicBool,
    stats_delays: Mutex<VecDeque<Duration>>,
    profile_delays: Mutex<VecDeque<Duration>>,
    series_delays: Mutex<VecDeque<Duration>>,
}

impl FakeSource {
    pub fn new() -> Self {
        FakeSource {
            stats: stats_doc(),
            profiles: profiles_doc(),
            series: series_doc(),
            ..Default::default()
        }
    }

    pub fn delay_stats(&self, delays: &[u64]) {
        let mut queue = self.stats_delays.lock().unwrap();
        queue.extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
    }

    /// Delays applied to the next profile fetches, in call order.
    pub fn delay_profiles(&self, delays: &[u64]) {
        let mut queue = self.profile_delays.lock().unwrap();
        queue.extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
    }

    pub fn delay_series(&self, delays: &[u64]) {
        let mut queue = self.series_delays.lock().unwrap();
        queue.extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.stats_calls.load(Ordering::SeqCst),
            self.profile_calls.load(Ordering::SeqCst),
            self.series_calls.load(Ordering::SeqCst),
        )
    }

    fn next_delay(queue: &Mutex<VecDeque<Duration>>) -> Duration {
        queue.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl StockSource for FakeSource {
    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let delay = Self::next_delay(&self.stats_delays);
        tokio::time::sleep(delay).await;
        StatsSnapshot::from_document(self.stats.clone())
    }

    async fn fetch_profiles(&self) -> Result<ProfileSnapshot> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let delay = Self::next_delay(&self.profile_delays);
        tokio::time::sleep(delay).await;
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(DashboardError::transport("fake://profiles", "connection reset"));
        }
        Ok(ProfileSnapshot::from_document(self.profiles.clone()))
    }

    async fn fetch_series(&self) -> Result<SeriesSnapshot> {
        self.series_calls.fetch_add(1, Ordering::SeqCst);
        let delay = Self::next_delay(&self.series_delays);
        tokio::time::sleep(delay).await;
        if self.fail_series.load(Ordering::SeqCst) {
            return Err(DashboardError::decode("stock series", "expected value at line 1"));
        }
        Ok(SeriesSnapshot::from_document(self.series.clone()))
    }
}

#[derive(Debug, Default)]
pub struct RecordedList {
    pub items: Vec<StockListItem>,
    pub replacements: usize,
}

impl ListContainer for RecordedList {
    fn replace_items(&mut self, items: Vec<StockListItem>) {
        self.items = items;
        self.replacements += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordedDetails {
    pub current: Option<DetailsBlock>,
    pub replacements: usize,
}

impl DetailsPanel for RecordedDetails {
    fn replace_details(&mut self, details: DetailsBlock) {
        self.current = Some(details);
        self.replacements += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOp {
    Draw(ChartHandle),
    Destroy(ChartHandle),
}

#[derive(Debug, Default)]
pub struct RecordedChart {
    pub ops: Vec<ChartOp>,
    pub charts: Vec<LineChart>,
    pub attached: Vec<ChartHandle>,
    pub max_attached: usize,
    next: u64,
}

impl RecordedChart {
    pub fn last(&self) -> Option<&LineChart> {
        self.charts.last()
    }
}

impl ChartSurface for RecordedChart {
    fn draw(&mut self, chart: &LineChart) -> ChartHandle {
        self.next += 1;
        let handle = ChartHandle(self.next);
        self.ops.push(ChartOp::Draw(handle));
        self.charts.push(chart.clone());
        self.attached.push(handle);
        self.max_attached = self.max_attached.max(self.attached.len());
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.ops.push(ChartOp::Destroy(handle));
        self.attached.retain(|h| *h != handle);
    }
}

/// View whose anchors can be left out to simulate a broken page.
pub struct RecordingView {
    pub list: Option<RecordedList>,
    pub details: Option<RecordedDetails>,
    pub chart: Option<RecordedChart>,
    pub buttons: Vec<RangeButton>,
}

impl RecordingView {
    pub fn new() -> Self {
        RecordingView {
            list: Some(RecordedList::default()),
            details: Some(RecordedDetails::default()),
            chart: Some(RecordedChart::default()),
            buttons: ["1M", "3M", "1Y", "5Y"].into_iter().map(RangeButton::new).collect(),
        }
    }

    pub fn list(&self) -> &RecordedList {
        self.list.as_ref().expect("list anchor")
    }

    pub fn details(&self) -> &RecordedDetails {
        self.details.as_ref().expect("details anchor")
    }

    pub fn chart(&self) -> &RecordedChart {
        self.chart.as_ref().expect("chart anchor")
    }
}

impl DashboardView for RecordingView {
    fn stocks_list(&mut self) -> Option<&mut dyn ListContainer> {
        self.list.as_mut().map(|l| l as &mut dyn ListContainer)
    }

    fn details_section(&mut self) -> Option<&mut dyn DetailsPanel> {
        self.details.as_mut().map(|d| d as &mut dyn DetailsPanel)
    }

    fn stock_chart(&mut self) -> Option<&mut dyn ChartSurface> {
        self.chart.as_mut().map(|c| c as &mut dyn ChartSurface)
    }

    fn range_buttons(&self) -> Vec<RangeButton> {
        self.buttons.clone()
    }
}
