use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::debug;

use super::cpf::Cpf;
use super::entity::{Customer, CustomerState};
use super::repository::CustomerRepository;
use super::resource::{CustomerQuery, CustomerResource, CUSTOMER_RESOURCE_NAME};
use crate::domain::entity::EntityId;
use crate::domain::errors::DomainError;

// ============================================================================
// Postgres Customer Repository
// ============================================================================
//
// Durable backend over a single `customer` table. Uniqueness is enforced by
// the database constraints alone: insert goes straight to the store and a
// unique violation comes back as a domain conflict, so there is no
// check-then-act window.
//
// ============================================================================

/// Name of the unique constraint guarding the cpf column. The primary key
/// constraint gets the Postgres default name, `customer_pkey`.
const CPF_UNIQUE_CONSTRAINT: &str = "customer_unique_cpf";

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS customer (
    id CHAR(26) PRIMARY KEY,
    name TEXT NOT NULL,
    cpf CHAR(11) NOT NULL,
    birthdate TIMESTAMPTZ NOT NULL,
    created TIMESTAMPTZ NOT NULL,
    CONSTRAINT customer_unique_cpf UNIQUE (cpf)
)";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the customer table when it does not exist yet. The service
    /// carries no migration tooling; this mirrors setting up the schema at
    /// startup.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    cpf: String,
    birthdate: DateTime<Utc>,
    created: DateTime<Utc>,
}

impl CustomerRow {
    fn parse_id(&self) -> Result<EntityId, DomainError> {
        self.id.parse().map_err(|err| {
            DomainError::Storage(anyhow::anyhow!(
                "stored id {:?} is not a valid ulid: {err}",
                self.id
            ))
        })
    }

    fn into_customer(self) -> Result<Customer, DomainError> {
        let id = self.parse_id()?;
        Ok(Customer::restore(
            id,
            CustomerState {
                name: self.name,
                cpf: Cpf::restore(self.cpf),
                birthdate: self.birthdate,
                created: self.created,
            },
        ))
    }

    fn into_resource(self) -> Result<CustomerResource, DomainError> {
        let id = self.parse_id()?;
        Ok(CustomerResource {
            id,
            name: self.name,
            cpf: Cpf::restore(self.cpf),
            birthdate: self.birthdate,
            created: self.created,
        })
    }
}

fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::Storage(err.into())
}

/// Map a violated unique constraint back to the offending field. The table
/// has exactly two unique constraints: the primary key and the cpf one.
fn conflict_from_constraint(constraint: Option<&str>, customer: &Customer) -> DomainError {
    match constraint {
        Some(CPF_UNIQUE_CONSTRAINT) => DomainError::unique_conflict(
            "cpf",
            CUSTOMER_RESOURCE_NAME,
            format!("cpf:{}", customer.cpf()),
        ),
        _ => DomainError::unique_conflict(
            "id",
            CUSTOMER_RESOURCE_NAME,
            format!("id:{}", customer.id()),
        ),
    }
}

fn translate_insert_error(err: sqlx::Error, customer: &Customer) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return conflict_from_constraint(db_err.constraint(), customer);
        }
    }
    storage_error(err)
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO customer (id, name, cpf, birthdate, created) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(customer.id().to_string())
        .bind(customer.name())
        .bind(customer.cpf().as_str())
        .bind(customer.birthdate())
        .bind(customer.created())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(id = %customer.id(), "customer inserted");
                Ok(())
            }
            Err(err) => Err(translate_insert_error(err, customer)),
        }
    }

    async fn find(&self, id: EntityId) -> Result<Customer, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, cpf, birthdate, created FROM customer WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match row {
            Some(row) => row.into_customer(),
            None => Err(DomainError::not_found(
                CUSTOMER_RESOURCE_NAME,
                format!("id:{id}"),
            )),
        }
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Customer, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, cpf, birthdate, created FROM customer WHERE cpf = $1",
        )
        .bind(cpf.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match row {
            Some(row) => row.into_customer(),
            None => Err(DomainError::not_found(
                CUSTOMER_RESOURCE_NAME,
                format!("cpf:{cpf}"),
            )),
        }
    }

    async fn query(
        &self,
        params: &CustomerQuery,
    ) -> Result<Vec<CustomerResource>, DomainError> {
        // The id embeds the creation timestamp in its most significant
        // bits, so descending id order is descending creation order and
        // the primary key index does the work instead of a sort on
        // `created`.
        let rows: Vec<CustomerRow> = sqlx::query_as(
            "SELECT id, name, cpf, birthdate, created \
             FROM customer \
             WHERE $1::text IS NULL OR position($1 IN name) > 0 \
             ORDER BY id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(params.name.as_deref())
        .bind(i64::from(params.page.limit))
        .bind(i64::from(params.page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(CustomerRow::into_resource).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::customer::fake::fake_customer;

    #[test]
    fn cpf_constraint_maps_to_the_cpf_field() {
        let mut rng = StdRng::seed_from_u64(7);
        let customer = fake_customer(&mut rng);

        let err = conflict_from_constraint(Some(CPF_UNIQUE_CONSTRAINT), &customer);

        match err {
            DomainError::UniqueConflict(location) => {
                assert_eq!(location.path.as_deref(), Some("cpf"));
                assert_eq!(location.resource_key, format!("cpf:{}", customer.cpf()));
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn any_other_unique_constraint_maps_to_the_id() {
        let mut rng = StdRng::seed_from_u64(7);
        let customer = fake_customer(&mut rng);

        for constraint in [Some("customer_pkey"), None] {
            let err = conflict_from_constraint(constraint, &customer);
            match err {
                DomainError::UniqueConflict(location) => {
                    assert_eq!(location.path.as_deref(), Some("id"));
                    assert_eq!(location.resource_key, format!("id:{}", customer.id()));
                }
                other => panic!("expected a conflict, got {other:?}"),
            }
        }
    }

    #[test]
    fn rows_with_a_corrupt_id_surface_a_storage_error() {
        let row = CustomerRow {
            id: "definitely-not-a-ulid-value".to_string(),
            name: "Julius Caesar".to_string(),
            cpf: "11144477735".to_string(),
            birthdate: Utc::now(),
            created: Utc::now(),
        };

        assert!(matches!(
            row.into_customer(),
            Err(DomainError::Storage(_))
        ));
    }

    #[test]
    fn schema_declares_the_cpf_constraint_it_translates() {
        assert!(SCHEMA_SQL.contains(CPF_UNIQUE_CONSTRAINT));
    }
}
