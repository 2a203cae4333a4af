//! Rostra API Server
//!
//! Receives attendance-change deliveries, replicates approved shifts into
//! the parent ledgers, and serves parent-scoped ledger reads.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rostra_api::{AppState, create_router};
use rostra_core::access::AccessPolicy;
use rostra_core::billing::PeriodDeriver;
use rostra_core::contract::ContractResolver;
use rostra_core::ledger::LedgerWriter;
use rostra_core::replication::ReplicationOrchestrator;
use rostra_db::{
    ContractRepository, LedgerRepository, MembershipRepository, OrganizationRepository,
    connect_with_config,
};
use rostra_shared::{AppConfig, JwtConfig, JwtService};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rostra=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect_with_config(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    #[allow(clippy::cast_possible_wrap)]
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    });

    let deriver = PeriodDeriver::new(config.billing.biweekly_anchor)
        .context("billing.biweekly_anchor must be a Monday")?;
    info!(anchor = %deriver.biweekly_anchor(), "Biweekly periods anchored");

    let ledger = Arc::new(LedgerRepository::new(db.clone()));
    let orchestrator = ReplicationOrchestrator::new(
        ContractResolver::new(
            Arc::new(OrganizationRepository::new(db.clone())),
            Arc::new(ContractRepository::new(db.clone())),
        ),
        deriver,
        LedgerWriter::new(ledger.clone()),
    );
    let access = AccessPolicy::new(Arc::new(MembershipRepository::new(db)));

    let state = AppState {
        jwt_service: Arc::new(jwt_service),
        orchestrator: Arc::new(orchestrator),
        ledger,
        access: Arc::new(access),
        trigger_secret: Arc::from(config.trigger.secret.as_str()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
