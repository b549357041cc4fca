//! Customer registry core.
//!
//! The customer entity and its lifecycle, CPF checksum validation, a
//! repository contract with two interchangeable backends (in-memory and
//! Postgres) and the offset-pagination query model. Transport, wire
//! serialization and dependency wiring live outside this crate.

pub mod domain;
