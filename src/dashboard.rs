// src/dashboard.rs
use chrono_tz::Tz;
use log::{debug, error, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::handlers::chart::ChartRenderer;
use crate::handlers::details::render_details;
use crate::handlers::error::Result;
use crate::handlers::range::RangeControls;
use crate::handlers::stats_list::render_stats_list;
use crate::models::{
    ProfileSnapshot, SeriesSnapshot, StatsSnapshot, StockStat, StockStatEntry, TimeRange,
};
use crate::services::api::StockSource;
use crate::services::series::prepare_series;
use crate::view::DashboardView;

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on a stocks list item.
    SelectSymbol(String),
    /// Click on a range button, carrying its `data-time` label.
    SelectRange(String),
    RefreshList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    NoSelection,
    Selected(String),
}

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub default_symbol: String,
    pub default_range: TimeRange,
    pub tz: Tz,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            default_symbol: crate::config::DEFAULT_SYMBOL.to_string(),
            default_range: TimeRange::default(),
            tz: Tz::UTC,
        }
    }
}

impl From<&Config> for DashboardOptions {
    fn from(config: &Config) -> Self {
        Self {
            default_symbol: config.default_symbol.clone(),
            default_range: config.default_range,
            tz: config.tz,
        }
    }
}

/// Monotonic request ids. A completion is applied only if it carries the
/// latest id issued for its pane.
#[derive(Debug, Default)]
struct Tokens {
    next: u64,
    list: u64,
    details: u64,
    chart: u64,
}

impl Tokens {
    fn issue(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

#[derive(Debug)]
enum Completion {
    Stats {
        token: u64,
        result: Result<StatsSnapshot>,
    },
    Profile {
        token: u64,
        symbol: String,
        stat: StockStat,
        result: Result<ProfileSnapshot>,
    },
    Series {
        token: u64,
        symbol: String,
        range: TimeRange,
        result: Result<SeriesSnapshot>,
    },
}

pub struct Dashboard<S, V> {
    source: Arc<S>,
    view: V,
    options: DashboardOptions,
    chart: ChartRenderer,
    ranges: RangeControls,
    listed: StatsSnapshot,
    selected: Option<String>,
    // symbol the range buttons act on; the default symbol until a selection
    chart_symbol: String,
    tokens: Tokens,
    pending: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: StockSource, V: DashboardView> Dashboard<S, V> {
    pub fn new(source: Arc<S>, view: V, options: DashboardOptions) -> Self {
        let ranges = RangeControls::bind(&view);
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            source,
            view,
            chart_symbol: options.default_symbol.clone(),
            options,
            chart: ChartRenderer::new(),
            ranges,
            listed: StatsSnapshot::default(),
            selected: None,
            tokens: Tokens::default(),
            pending: 0,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> DashboardState {
        match &self.selected {
            Some(symbol) => DashboardState::Selected(symbol.clone()),
            None => DashboardState::NoSelection,
        }
    }

    pub fn chart_symbol(&self) -> &str {
        &self.chart_symbol
    }

    pub fn listed(&self) -> &StatsSnapshot {
        &self.listed
    }

    pub fn ranges(&self) -> &RangeControls {
        &self.ranges
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Initial load: chart the default symbol and fetch the stocks list.
    pub fn start(&mut self) {
        info!(
            "Starting dashboard with {} ({})",
            self.options.default_symbol, self.options.default_range
        );
        let symbol = self.options.default_symbol.clone();
        self.request_series(symbol, self.options.default_range);
        self.request_stats();
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        debug!("Handling {:?}", event);
        match event {
            UiEvent::SelectSymbol(symbol) => self.select_symbol(&symbol),
            UiEvent::SelectRange(label) => self.select_range(&label),
            UiEvent::RefreshList => self.request_stats(),
        }
    }

    pub fn select_symbol(&mut self, symbol: &str) {
        let Some(entry) = self.find_listed(symbol) else {
            warn!("{} is not in the stocks list", symbol);
            return;
        };
        let StockStatEntry { symbol, stat } = entry;

        info!("Selected {}", symbol);
        self.selected = Some(symbol.clone());
        self.chart_symbol = symbol.clone();
        self.request_profile(symbol.clone(), stat);
        self.request_series(symbol, self.options.default_range);
    }

    pub fn select_range(&mut self, label: &str) {
        match self.ranges.resolve(label) {
            Ok(range) => {
                let symbol = self.chart_symbol.clone();
                self.request_series(symbol, range);
            }
            Err(e) => warn!("Ignoring range click: {}", e),
        }
    }

    /// Apply the next finished fetch. Returns `false` when nothing is pending.
    pub async fn next_completion(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Wait for every in-flight fetch and apply it.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Event loop: interleave user events with fetch completions until the
    /// event channel closes.
    pub async fn run(&mut self, events: &mut mpsc::UnboundedReceiver<UiEvent>) {
        enum Step {
            Event(Option<UiEvent>),
            Done(Completion),
        }

        loop {
            let step = tokio::select! {
                event = events.recv() => Step::Event(event),
                Some(completion) = self.rx.recv() => Step::Done(completion),
            };

            match step {
                Step::Event(Some(event)) => self.handle_event(event),
                Step::Event(None) => {
                    info!("Event channel closed, stopping dashboard");
                    break;
                }
                Step::Done(completion) => self.apply(completion),
            }
        }
    }

    fn find_listed(&self, symbol: &str) -> Option<StockStatEntry> {
        let symbol = symbol.trim();
        self.listed
            .entries()
            .iter()
            .find(|e| e.symbol == symbol)
            .or_else(|| {
                self.listed
                    .entries()
                    .iter()
                    .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
            })
            .cloned()
    }

    fn spawn<F>(&mut self, fetch: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // receiver lives as long as the dashboard
            let _ = tx.send(fetch.await);
        });
    }

    fn request_stats(&mut self) {
        let token = self.tokens.issue();
        self.tokens.list = token;
        let source = Arc::clone(&self.source);
        self.spawn(async move {
            Completion::Stats {
                token,
                result: source.fetch_stats().await,
            }
        });
    }

    fn request_profile(&mut self, symbol: String, stat: StockStat) {
        let token = self.tokens.issue();
        self.tokens.details = token;
        let source = Arc::clone(&self.source);
        self.spawn(async move {
            Completion::Profile {
                token,
                symbol,
                stat,
                result: source.fetch_profiles().await,
            }
        });
    }

    fn request_series(&mut self, symbol: String, range: TimeRange) {
        let token = self.tokens.issue();
        self.tokens.chart = token;
        let source = Arc::clone(&self.source);
        self.spawn(async move {
            Completion::Series {
                token,
                symbol,
                range,
                result: source.fetch_series().await,
            }
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);

        match completion {
            Completion::Stats { token, result } => {
                if token != self.tokens.list {
                    debug!("Discarding stale stats response {}", token);
                    return;
                }
                let rendered = result.and_then(|stats| {
                    render_stats_list(&mut self.view, &stats)?;
                    Ok(stats)
                });
                match rendered {
                    Ok(stats) => self.listed = stats,
                    Err(e) => error!("Error fetching stock stats: {}", e),
                }
            }
            Completion::Profile {
                token,
                symbol,
                stat,
                result,
            } => {
                if token != self.tokens.details {
                    debug!("Discarding stale profile response for {}", symbol);
                    return;
                }
                let rendered = result
                    .and_then(|profiles| render_details(&mut self.view, &symbol, &stat, &profiles));
                if let Err(e) = rendered {
                    error!("Error displaying details for {}: {}", symbol, e);
                }
            }
            Completion::Series {
                token,
                symbol,
                range,
                result,
            } => {
                if token != self.tokens.chart {
                    debug!("Discarding stale series response for {} ({})", symbol, range);
                    return;
                }
                let plotted = result
                    .and_then(|series| prepare_series(&series, range, &symbol, self.options.tz))
                    .and_then(|data| self.chart.plot(&mut self.view, data));
                if let Err(e) = plotted {
                    error!("Error fetching stock data for {} ({}): {}", symbol, range, e);
                }
            }
        }
    }
}
