//! Derived views over the monthly records: spending grouped by period and income by source.
//!
//! Everything here is a pure function of the records passed in. Nothing is read from or written
//! to disk and the records are never modified.

mod groups;
mod income;
mod view;

pub use groups::{
    group_aggregates, percent_of, GroupAggregate, GroupAggregates, SYNTHETIC_CATEGORIES,
};
pub use income::{income_series, IncomeSeries};
pub use view::{ViewMode, ANNUAL};
