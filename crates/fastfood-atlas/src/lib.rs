pub mod canonical;
pub mod config;
pub mod dataset;
pub mod error;
pub mod query;
pub mod session;
pub mod telemetry;

pub use canonical::{Canonicalizer, ConflictPolicy};
pub use dataset::{Dataset, Record};
pub use query::ChainFilter;
pub use session::AtlasSession;
