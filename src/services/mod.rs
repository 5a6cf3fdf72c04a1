//! Services for usage aggregation and data loading

pub mod aggregator;
pub mod calendar;
pub mod data_loader;
pub mod statistics;

pub use aggregator::Aggregator;
pub use data_loader::{DataLoaderService, DataStore};
pub use statistics::Summarizer;
