use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cpf::Cpf;
use super::entity::{Customer, CustomerState};
use crate::domain::entity::EntityId;
use crate::domain::query::OffsetQuery;

pub const CUSTOMER_RESOURCE_NAME: &str = "CUSTOMER";

/// Read projection of a customer: the id plus the state fields, used by
/// list queries instead of the full entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResource {
    pub id: EntityId,
    pub name: String,
    pub cpf: Cpf,
    pub birthdate: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

impl CustomerResource {
    pub fn from_state(id: EntityId, state: &CustomerState) -> Self {
        Self {
            id,
            name: state.name.clone(),
            cpf: state.cpf.clone(),
            birthdate: state.birthdate,
            created: state.created,
        }
    }
}

impl From<&Customer> for CustomerResource {
    fn from(customer: &Customer) -> Self {
        Self::from_state(customer.id(), &customer.internal_state())
    }
}

/// Parameters for listing customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerQuery {
    /// Case-sensitive substring match on the customer name.
    pub name: Option<String>,
    pub page: OffsetQuery,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::entity::CreateCustomerData;
    use chrono::TimeZone;

    #[test]
    fn resource_mirrors_the_entity() {
        let customer = Customer::create(CreateCustomerData {
            name: "Marcus Brutus".to_string(),
            cpf: Cpf::parse("11144477735").unwrap(),
            birthdate: Utc.with_ymd_and_hms(1985, 3, 15, 0, 0, 0).unwrap(),
        });

        let resource = CustomerResource::from(&customer);

        assert_eq!(resource.id, customer.id());
        assert_eq!(resource.name, customer.name());
        assert_eq!(&resource.cpf, customer.cpf());
        assert_eq!(resource.birthdate, customer.birthdate());
        assert_eq!(resource.created, customer.created());
    }
}
