pub mod chart;
pub mod details;
pub mod error;
pub mod range;
pub mod stats_list;
