use capella::config::CONFIG;
use capella::error::CapellaError;
use capella::migrate::{Runner, registry};
use capella::router::{Router, default_routes};
use capella::session::Session;
use capella::store::SchemaDao;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), CapellaError> {
    dotenvy::dotenv().ok();

    let cfg = &*CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        backend = %cfg.backend.base_url,
        base_path = %cfg.app.base_path,
        loglevel = %cfg.basic.loglevel,
    );

    let dao = SchemaDao::connect(&cfg.basic.database_url).await?;
    let runner = Runner::new(&dao, registry())?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("rollback") => {
            let steps = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
            let reverted = runner.down(steps).await?;
            info!(reverted, "rollback complete");
        }
        Some("status") => {
            for status in runner.status().await? {
                match status.applied_at {
                    Some(at) => info!(migration = %status.key, applied_at = %at, "applied"),
                    None => info!(migration = %status.key, "pending"),
                }
            }
        }
        None | Some("migrate") => {
            let ran = runner.up().await?;
            info!(ran, "migrations up to date");

            let router = Router::new(default_routes()?, &cfg.app);
            info!(
                history = ?router.history(),
                base_path = %router.base_path(),
                routes = router.table().entries().len(),
                "route table validated"
            );

            let session = Session::new(&cfg.backend);
            info!(
                backend = %session.client().base_url(),
                authenticated = session.current_user().is_some(),
                "session context ready"
            );
        }
        Some(other) => {
            eprintln!("unknown command: {other} (expected: migrate, rollback, status)");
            std::process::exit(2);
        }
    }

    Ok(())
}
