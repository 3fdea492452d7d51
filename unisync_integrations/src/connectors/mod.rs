//! Connectors implementing the core `UniversitySource` trait.

pub mod hipolabs;

pub use hipolabs::HipolabsConnector;
