use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{error, info};

use configs::{AppConfig, StorageBackend, StorageConfig};
use models::user::Role;
use service::portal::PortalService;
use service::storage::{file_kv::FileKvStore, memory_kv::MemoryKvStore, KvBackend};
use service::store::{DocumentStore, StoreKeys};

async fn open_backend(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn KvBackend>> {
    match cfg.backend {
        StorageBackend::File => {
            let backend: Arc<dyn KvBackend> = FileKvStore::new(&cfg.path).await?;
            Ok(backend)
        }
        StorageBackend::Memory => {
            let backend: Arc<dyn KvBackend> = Arc::new(MemoryKvStore::default());
            Ok(backend)
        }
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let backend = open_backend(&cfg.storage).await?;
    let keys = StoreKeys { document: cfg.storage.document_key.clone(), session: cfg.storage.session_key.clone() };
    let portal = PortalService::new(Arc::new(DocumentStore::new(backend, keys)));

    let seeded = portal.init().await?;
    let admins = portal.list_users_by_role(Role::Admin).await?.len();
    let companies = portal.list_users_by_role(Role::Company).await?.len();
    let students = portal.list_users_by_role(Role::Student).await?.len();
    let jobs = portal.list_jobs().await?.len();
    let applications = portal.list_applications().await?.len();

    info!(
        event = "store_ready",
        backend = ?cfg.storage.backend,
        path = %cfg.storage.path,
        seeded,
        admins,
        companies,
        students,
        jobs,
        applications,
        "portal store initialized"
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    // load .env before reading CONFIG_PATH / RUST_LOG
    dotenv().ok();

    let cfg = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging.format);

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cfg)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "run_failed", error = %e, "portal store initialization failed");
            std::process::ExitCode::FAILURE
        }
    }
}
