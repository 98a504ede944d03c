// src/handlers/error.rs
use thiserror::Error;

/// Everything that can abort a rendering path. None of these are fatal:
/// the dashboard logs them and keeps its last good state.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("could not decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("element '{0}' not found in the view")]
    MissingElement(&'static str),

    #[error("series {symbol}/{range} has {values} values but {timestamps} timestamps")]
    SeriesShape {
        symbol: String,
        range: String,
        values: usize,
        timestamps: usize,
    },

    #[error("unknown time range '{0}'")]
    InvalidRange(String),
}

impl DashboardError {
    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        DashboardError::Transport {
            url: url.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        DashboardError::Decode {
            what,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
