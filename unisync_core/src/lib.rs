//! unisync core library: the ingestion-and-query engine behind the
//! university directory service.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod normalize;
pub mod query;
pub mod reconcile;
pub mod sqlite;
pub mod traits;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use models::{IngestReport, University, UniversityFilter};
pub use normalize::RawUniversity;
pub use query::{distinct_states, QueryService};
pub use reconcile::IngestEngine;
pub use traits::{UniversitySource, UniversityStore};
