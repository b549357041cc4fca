use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cpf::Cpf;
use crate::domain::entity::{Entity, EntityId};

/// Everything a customer holds besides its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerState {
    /// 2 to 256 characters, enforced at the boundary.
    pub name: String,
    /// Normalized CPF. Unique across the registry.
    pub cpf: Cpf,
    /// Strictly before "now" at validation time; the entity itself does not
    /// re-check it.
    pub birthdate: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// Creation data that already went through boundary validation
/// ([`super::validation::validate_create_customer`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerData {
    pub name: String,
    pub cpf: Cpf,
    pub birthdate: DateTime<Utc>,
}

/// Customer entity.
///
/// State is fixed at construction. There is no update operation; a customer
/// only ever leaves the system through external deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer(Entity<CustomerState>);

impl Customer {
    /// Build a brand-new customer: stamps `created` with the current time
    /// and mints an id carrying that same timestamp, so id order and
    /// creation order stay aligned.
    pub fn create(data: CreateCustomerData) -> Self {
        let created = Utc::now();
        Self(Entity::new(
            EntityId::from_datetime(created),
            CustomerState {
                name: data.name,
                cpf: data.cpf,
                birthdate: data.birthdate,
                created,
            },
        ))
    }

    /// Rehydrate from storage. The data is trusted; no validation is re-run.
    pub fn restore(id: EntityId, state: CustomerState) -> Self {
        Self(Entity::new(id, state))
    }

    pub fn id(&self) -> EntityId {
        self.0.id()
    }

    pub fn name(&self) -> &str {
        &self.0.state().name
    }

    pub fn cpf(&self) -> &Cpf {
        &self.0.state().cpf
    }

    pub fn birthdate(&self) -> DateTime<Utc> {
        self.0.state().birthdate
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.0.state().created
    }

    /// Deep, independent copy of the state.
    pub fn internal_state(&self) -> CustomerState {
        self.0.internal_state()
    }
}
