use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::cpf::Cpf;
use super::entity::{Customer, CustomerState};
use super::repository::CustomerRepository;
use super::resource::{CustomerQuery, CustomerResource, CUSTOMER_RESOURCE_NAME};
use crate::domain::entity::EntityId;
use crate::domain::errors::DomainError;

// ============================================================================
// In-Memory Customer Repository
// ============================================================================
//
// Reference backend: a locked map from id to state. Reads share the lock;
// insert holds it exclusively so the two uniqueness checks and the write
// are one atomic step. Linear scans are fine at the scale this backend is
// meant for (tests, local runs).
//
// ============================================================================

#[derive(Debug, Default)]
pub struct MemCustomerRepository {
    customers: RwLock<HashMap<EntityId, CustomerState>>,
}

impl MemCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing states, e.g. to seed a test.
    pub fn with_customers(customers: HashMap<EntityId, CustomerState>) -> Self {
        Self {
            customers: RwLock::new(customers),
        }
    }
}

#[async_trait]
impl CustomerRepository for MemCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.customers.write().await;

        if customers.contains_key(&customer.id()) {
            return Err(DomainError::unique_conflict(
                "id",
                CUSTOMER_RESOURCE_NAME,
                format!("id:{}", customer.id()),
            ));
        }
        if customers.values().any(|state| &state.cpf == customer.cpf()) {
            return Err(DomainError::unique_conflict(
                "cpf",
                CUSTOMER_RESOURCE_NAME,
                format!("cpf:{}", customer.cpf()),
            ));
        }

        customers.insert(customer.id(), customer.internal_state());
        debug!(id = %customer.id(), "customer inserted");
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<Customer, DomainError> {
        let customers = self.customers.read().await;

        customers
            .get(&id)
            // Hand out a copy, never the stored state.
            .map(|state| Customer::restore(id, state.clone()))
            .ok_or_else(|| DomainError::not_found(CUSTOMER_RESOURCE_NAME, format!("id:{id}")))
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Customer, DomainError> {
        let customers = self.customers.read().await;

        customers
            .iter()
            .find(|(_, state)| &state.cpf == cpf)
            .map(|(id, state)| Customer::restore(*id, state.clone()))
            .ok_or_else(|| DomainError::not_found(CUSTOMER_RESOURCE_NAME, format!("cpf:{cpf}")))
    }

    async fn query(
        &self,
        params: &CustomerQuery,
    ) -> Result<Vec<CustomerResource>, DomainError> {
        let customers = self.customers.read().await;

        // WHERE name LIKE %{name}%
        let mut resources: Vec<CustomerResource> = customers
            .iter()
            .filter(|(_, state)| match &params.name {
                Some(term) => state.name.contains(term.as_str()),
                None => true,
            })
            .map(|(id, state)| CustomerResource::from_state(*id, state))
            .collect();

        // ORDER BY created DESC, ties broken by id so the order is stable.
        resources.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));

        // LIMIT {limit} OFFSET {offset}
        Ok(resources
            .into_iter()
            .skip(params.page.offset as usize)
            .take(params.page.limit as usize)
            .collect())
    }
}
