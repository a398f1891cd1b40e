//! Distance statistics between a map's reference point and its satellite
//! entities, aggregated over collections of maps.
//!
//! Stages: [`extract`] entity lists into [`Record`]s, persist [`Dataset`]s
//! as CSV, normalise into reference-centred offsets, then aggregate with
//! [`stats`] and render a [`CollectionReport`].

pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod layout;
pub mod offsets;
pub mod point;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use dataset::{Dataset, Record};
pub use error::{HerdError, Result};
pub use extract::{Entity, EntitySource, JsonEntitySource};
pub use layout::CollectionPaths;
pub use point::{Metric, Point};
pub use report::CollectionReport;
