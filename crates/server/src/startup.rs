use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::{AppConfig, StorageBackend};
use service::customer::{
    CustomerService, CustomerStore, InMemoryCustomerStore, OrmCustomerStore, SqlCustomerStore,
};

use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the config file, falling back to env vars only when it is absent.
/// A present but invalid file refuses to start: silently downgrading a
/// `sql`/`orm` deployment to the in-memory store would lose writes.
fn load_config() -> anyhow::Result<AppConfig> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path)
}

fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    if std::path::Path::new(path).exists() {
        let mut cfg = configs::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("config file {path} is invalid: {e}"))?;
        cfg.normalize_and_validate()
            .map_err(|e| anyhow::anyhow!("config file {path} is invalid: {e}"))?;
        return Ok(cfg);
    }

    info!(%path, "config file not found, using environment variables");
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.storage.backend = match env::var("STORAGE_BACKEND").as_deref() {
        Ok("sql") => StorageBackend::Sql,
        Ok("orm") => StorageBackend::Orm,
        _ => StorageBackend::Memory,
    };
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Construct the one record store this process runs with. DB-backed stores
/// get the schema migrated before serving.
async fn build_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CustomerStore>> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "record store selected");
            Ok(Arc::new(InMemoryCustomerStore::new()))
        }
        StorageBackend::Sql => {
            let db = models::db::connect_with(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            let pool = models::db::pg_pool(&cfg.database).await?;
            info!(backend = "sql", "record store selected");
            Ok(Arc::new(SqlCustomerStore::new(pool)))
        }
        StorageBackend::Orm => {
            let db = models::db::connect_with(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "orm", "record store selected");
            Ok(Arc::new(OrmCustomerStore::new(db)))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let store = build_store(&cfg).await?;
    let customer_service = Arc::new(CustomerService::new(store));

    let cors = build_cors();
    let app: Router = routes::build_router(customer_service, cors);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting customer api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_config_file_falls_back_to_memory_backend() {
        let cfg = load_config_from("/nonexistent/customer_api_config.toml").unwrap();
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn malformed_config_file_refuses_to_start() {
        let path = temp_config("malformed_config", "[server\nhost =");
        let err = load_config_from(path.to_str().unwrap()).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("is invalid"));
    }

    #[test]
    fn invalid_config_file_refuses_to_start() {
        let path = temp_config(
            "invalid_config",
            "[server]\nhost = \"127.0.0.1\"\nport = 0\n\n[storage]\nbackend = \"memory\"\n",
        );
        let err = load_config_from(path.to_str().unwrap()).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("is invalid"));
    }

    #[test]
    fn valid_config_file_is_honored() {
        let path = temp_config(
            "valid_config",
            "[server]\nhost = \"0.0.0.0\"\nport = 9001\n\n[storage]\nbackend = \"memory\"\n",
        );
        let cfg = load_config_from(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
    }
}
