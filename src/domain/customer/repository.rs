use async_trait::async_trait;

use super::cpf::Cpf;
use super::entity::Customer;
use super::resource::{CustomerQuery, CustomerResource};
use crate::domain::entity::EntityId;
use crate::domain::errors::DomainError;

/// Storage contract for customers.
///
/// Two backends satisfy it: [`super::memory::MemCustomerRepository`], the
/// reference implementation, and [`super::postgres::PgCustomerRepository`].
/// Callers pick one at construction time; nothing switches at runtime.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer keyed by its id.
    ///
    /// Fails with [`DomainError::UniqueConflict`] when the id or the cpf is
    /// already taken, leaving the store untouched.
    async fn insert(&self, customer: &Customer) -> Result<(), DomainError>;

    /// Fetch a customer by id. Misses are [`DomainError::NotFound`].
    async fn find(&self, id: EntityId) -> Result<Customer, DomainError>;

    /// Fetch a customer by its normalized cpf. Misses are
    /// [`DomainError::NotFound`].
    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Customer, DomainError>;

    /// List resources matching `params`, newest first: optional
    /// case-sensitive name-substring filter, descending creation order,
    /// then the offset window.
    async fn query(&self, params: &CustomerQuery)
        -> Result<Vec<CustomerResource>, DomainError>;
}
