//! External collaborators implementing the core `UniversitySource` trait.

#![forbid(unsafe_code)]

pub mod connectors;
