// ============================================================================
// Customer Domain
// ============================================================================
//
// All customer-specific code:
// - CPF value object and checksum validation (cpf)
// - Entity, state and creation data (entity)
// - Boundary validation of raw creation input (validation)
// - Read projection and query params (resource)
// - Repository contract plus both backends (repository, memory, postgres)
// - Create-customer use case (create_customer)
//
// ============================================================================

pub mod cpf;
pub mod create_customer;
pub mod entity;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod resource;
pub mod validation;

#[cfg(test)]
pub mod fake;

pub use cpf::Cpf;
pub use create_customer::CreateCustomerUseCase;
pub use entity::{CreateCustomerData, Customer, CustomerState};
pub use memory::MemCustomerRepository;
pub use postgres::PgCustomerRepository;
pub use repository::CustomerRepository;
pub use resource::{CustomerQuery, CustomerResource, CUSTOMER_RESOURCE_NAME};
pub use validation::{validate_create_customer, CreateCustomerInput};
