#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod error;
mod fetcher;
mod mirror;
mod patterns;
mod plan;
mod progress;

pub use error::{FetchError, FetchResult};
pub use fetcher::SnapshotFetcher;
pub use mirror::{FileMetadata, LocalMirror};
pub use patterns::PathFilter;
pub use plan::{FetchAction, FetchPlan, FetchReport, PlanEntry};
pub use progress::CliProgressPrinter;
