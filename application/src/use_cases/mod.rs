//! Use cases (application services)

pub mod coordinator;
