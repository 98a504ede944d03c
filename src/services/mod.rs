pub mod api;
pub mod format;
pub mod series;
