use std::sync::Arc;

use tracing::debug;

use super::entity::{CreateCustomerData, Customer};
use super::repository::CustomerRepository;
use super::resource::CUSTOMER_RESOURCE_NAME;
use crate::domain::errors::DomainError;

// ============================================================================
// Create Customer Use Case
// ============================================================================

pub struct CreateCustomerUseCase {
    repository: Arc<dyn CustomerRepository>,
}

impl CreateCustomerUseCase {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Create and persist a new customer from validated data.
    ///
    /// The cpf lookup up front answers the common duplicate case with a
    /// precise conflict before building anything. The repository still
    /// enforces uniqueness at insert time, so a concurrent insert slipping
    /// between the two steps is caught there.
    pub async fn execute(&self, data: CreateCustomerData) -> Result<Customer, DomainError> {
        match self.repository.find_by_cpf(&data.cpf).await {
            Ok(_) => {
                return Err(DomainError::unique_conflict(
                    "cpf",
                    CUSTOMER_RESOURCE_NAME,
                    format!("cpf:{}", data.cpf),
                ))
            }
            Err(DomainError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }

        let customer = Customer::create(data);
        self.repository.insert(&customer).await?;
        debug!(id = %customer.id(), "customer created");

        Ok(customer)
    }
}
