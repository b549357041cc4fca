use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::cpf::Cpf;
use super::entity::CreateCustomerData;
use crate::domain::errors::{DomainError, ValidationIssue};

// ============================================================================
// Creation Input Validation
// ============================================================================

pub const CUSTOMER_NAME_MIN: usize = 2;
pub const CUSTOMER_NAME_MAX: usize = 256;

/// Raw creation input as it arrives from the caller, before any checks.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub cpf: String,
    pub birthdate: DateTime<Utc>,
}

/// Validate raw input into [`CreateCustomerData`].
///
/// Every failing field is reported with its path, not just the first one.
/// The cpf comes out normalized; nothing is silently coerced.
pub fn validate_create_customer(
    input: CreateCustomerInput,
) -> Result<CreateCustomerData, DomainError> {
    let mut issues = Vec::new();

    let name_chars = input.name.chars().count();
    if name_chars < CUSTOMER_NAME_MIN {
        issues.push(ValidationIssue {
            path: "name".to_string(),
            message: format!("name must have at least {CUSTOMER_NAME_MIN} characters"),
        });
    } else if name_chars > CUSTOMER_NAME_MAX {
        issues.push(ValidationIssue {
            path: "name".to_string(),
            message: format!("name must have at most {CUSTOMER_NAME_MAX} characters"),
        });
    }

    let cpf = match Cpf::parse(&input.cpf) {
        Ok(cpf) => Some(cpf),
        Err(_) => {
            issues.push(ValidationIssue {
                path: "cpf".to_string(),
                message: "CPF is invalid".to_string(),
            });
            None
        }
    };

    if input.birthdate >= Utc::now() {
        issues.push(ValidationIssue {
            path: "birthdate".to_string(),
            message: "customer birthdate is in the future".to_string(),
        });
    }

    match cpf {
        Some(cpf) if issues.is_empty() => Ok(CreateCustomerData {
            name: input.name,
            cpf,
            birthdate: input.birthdate,
        }),
        _ => Err(DomainError::InvalidEntityData(issues)),
    }
}
