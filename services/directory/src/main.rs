use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use staffdesk_core::config::Config;
use staffdesk_core::tracing::init_tracing;
use staffdesk_directory::config::{DirectoryConfig, StoreBackend};
use staffdesk_directory::error::DirectoryError;
use staffdesk_directory::infra::backend::Backend;
use staffdesk_directory::infra::db::DbAdminRepository;
use staffdesk_directory::infra::memory::MemoryStore;
use staffdesk_directory::infra::storage::LocalImageStore;
use staffdesk_directory::router::build_router;
use staffdesk_directory::state::AppState;
use staffdesk_directory::usecase::session::{CreateAdminInput, CreateAdminUseCase};
use staffdesk_directory_migration::Migrator;

#[derive(Parser)]
#[command(name = "directory", about = "Employee directory admin API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },
    /// Provision an operator account in the database
    CreateAdmin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

async fn connect(config: &DirectoryConfig) -> anyhow::Result<DatabaseConnection> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the database backend")?;
    Database::connect(url)
        .await
        .context("failed to connect to database")
}

async fn serve(config: DirectoryConfig, migrate: bool) -> anyhow::Result<()> {
    let backend = match config.store_backend {
        StoreBackend::Database => {
            let db = connect(&config).await?;
            if migrate {
                Migrator::up(&db, None)
                    .await
                    .context("failed to apply migrations")?;
                info!("migrations applied");
            }
            Backend::Database(db)
        }
        StoreBackend::Memory => {
            info!("using in-memory store with demo data");
            Backend::Memory(MemoryStore::demo(&config.demo_admin_password)?)
        }
    };

    let state = AppState {
        backend,
        images: LocalImageStore::new(&config.storage_root, &config.app_url),
        token_ttl: config.token_ttl(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.directory_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("directory service listening on {addr}");
    axum::serve(listener, router).await.context("server error")
}

async fn create_admin(config: DirectoryConfig, input: CreateAdminInput) -> anyhow::Result<()> {
    if config.store_backend == StoreBackend::Memory {
        anyhow::bail!("create-admin needs the database backend; the memory store is not persisted");
    }
    let usecase = CreateAdminUseCase {
        admins: DbAdminRepository {
            db: connect(&config).await?,
        },
    };
    let admin = usecase.execute(input).await.map_err(|e| match e {
        DirectoryError::Validation(errors) => anyhow::anyhow!("invalid admin: {errors:?}"),
        other => other.into(),
    })?;
    info!(admin_id = %admin.id, username = %admin.username, "admin provisioned");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = DirectoryConfig::from_env().context("invalid configuration")?;

    match cli.command.unwrap_or(Command::Serve { migrate: false }) {
        Command::Serve { migrate } => serve(config, migrate).await,
        Command::CreateAdmin {
            name,
            username,
            phone,
            email,
            password,
        } => {
            create_admin(
                config,
                CreateAdminInput {
                    name,
                    username,
                    phone,
                    email,
                    password,
                },
            )
            .await
        }
    }
}
