// Export modules for library usage
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod parser;
pub mod report;
pub mod summary;
pub mod timeline;

// Re-export commonly used types
pub use crate::core::{
    AggregationMode, AggregationResult, EventRecord, Interval, IntervalEnd, SeriesPoint,
};

pub use crate::aggregate::{aggregate, aggregate_intervals};
pub use crate::config::{StatusRank, StatusRegistry};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::parser::{parse_events, parse_timestamp, ParseOutcome};
pub use crate::report::ChartReport;
pub use crate::summary::{summarize, SeriesSummary};
pub use crate::timeline::build_intervals;
