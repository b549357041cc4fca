// ============================================================================
// Domain Errors
// ============================================================================
//
// Domain-level outcomes, not HTTP status codes. Conflicts and misses are
// terminal facts: they propagate unmodified to the caller, nothing here
// retries or recovers. Translation to a user-facing shape is the caller's
// concern.
//
// ============================================================================

/// A reference to a resource: where it was referenced from and a key that
/// identifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    /// Field path the reference came from, when there is one.
    pub path: Option<String>,
    /// Resource type name, e.g. `CUSTOMER`.
    pub resource_type: &'static str,
    /// Key identifying a single resource, e.g. `cpf:11144477735`.
    pub resource_key: String,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed or checksum-failing national id.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// One or more fields failed domain validation.
    #[error("invalid entity data: {0:?}")]
    InvalidEntityData(Vec<ValidationIssue>),

    /// Duplicate id or duplicate cpf on insert.
    #[error("unique constraint violation on {} {}", .0.resource_type, .0.resource_key)]
    UniqueConflict(ResourceLocation),

    /// Lookup found nothing.
    #[error("{} not found: {}", .0.resource_type, .0.resource_key)]
    NotFound(ResourceLocation),

    /// Backend failure that is not a domain outcome (connection loss,
    /// corrupt row, ...). Never produced by the in-memory backend.
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

impl DomainError {
    pub fn not_found(resource_type: &'static str, resource_key: String) -> Self {
        Self::NotFound(ResourceLocation {
            path: None,
            resource_type,
            resource_key,
        })
    }

    pub fn unique_conflict(
        path: &str,
        resource_type: &'static str,
        resource_key: String,
    ) -> Self {
        Self::UniqueConflict(ResourceLocation {
            path: Some(path.to_string()),
            resource_type,
            resource_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_carries_the_offending_field() {
        let err = DomainError::unique_conflict("cpf", "CUSTOMER", "cpf:11144477735".into());

        match err {
            DomainError::UniqueConflict(location) => {
                assert_eq!(location.path.as_deref(), Some("cpf"));
                assert_eq!(location.resource_type, "CUSTOMER");
                assert_eq!(location.resource_key, "cpf:11144477735");
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn not_found_has_no_path() {
        let err = DomainError::not_found("CUSTOMER", "id:01ARZ3NDEKTSV4RRFFQ69G5FAV".into());

        match err {
            DomainError::NotFound(location) => {
                assert_eq!(location.path, None);
                assert_eq!(location.resource_key, "id:01ARZ3NDEKTSV4RRFFQ69G5FAV");
            }
            other => panic!("expected not-found, got {other:?}"),
        }
    }
}
