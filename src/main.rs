use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use customer_registry::domain::customer::{
    validate_create_customer, CreateCustomerInput, CreateCustomerUseCase, Cpf, CustomerQuery,
    CustomerRepository, MemCustomerRepository, PgCustomerRepository,
};
use customer_registry::domain::errors::DomainError;
use customer_registry::domain::query::{make_query_result, OffsetQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging with environment-based filtering; override with
    // RUST_LOG, e.g. RUST_LOG=debug cargo run.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_registry=debug")),
        )
        .init();

    // Backend selection: Postgres when DATABASE_URL is set, otherwise the
    // in-memory reference implementation.
    let repository: Arc<dyn CustomerRepository> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            tracing::info!("connecting to postgres");
            let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
            let repository = PgCustomerRepository::new(pool);
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set, using the in-memory backend");
            Arc::new(MemCustomerRepository::new())
        }
    };

    let create_customer = CreateCustomerUseCase::new(repository.clone());

    let input = CreateCustomerInput {
        name: "Julius Caesar".to_string(),
        cpf: "111.444.777-35".to_string(),
        birthdate: "1990-07-12T00:00:00Z".parse()?,
    };
    let data = validate_create_customer(input)?;

    let customer = match create_customer.execute(data).await {
        Ok(customer) => {
            tracing::info!(id = %customer.id(), name = customer.name(), "customer created");
            customer
        }
        Err(DomainError::UniqueConflict(location)) => {
            // A previous run against the same database already registered
            // this cpf; fetch the existing record instead.
            tracing::warn!(key = %location.resource_key, "customer already registered");
            repository.find_by_cpf(&Cpf::parse("11144477735")?).await?
        }
        Err(err) => return Err(err.into()),
    };

    let found = repository.find(customer.id()).await?;
    tracing::info!(
        id = %found.id(),
        cpf = %found.cpf().formatted(),
        "fetched by id"
    );

    let params = CustomerQuery {
        name: Some("Caesar".to_string()),
        page: OffsetQuery::default(),
    };
    let resources = repository.query(&params).await?;
    let page = make_query_result(resources, params.page);
    tracing::info!(count = page.count, "query finished");

    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
