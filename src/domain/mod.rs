// ============================================================================
// Domain Layer
// ============================================================================
//
// Shared building blocks (entity primitives, errors, pagination) plus the
// customer module. Everything here returns domain-level outcomes; transport
// concerns stay outside the crate.
//
// ============================================================================

pub mod customer;
pub mod entity;
pub mod errors;
pub mod query;
