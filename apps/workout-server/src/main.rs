use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use api_ingress::ApiIngress;
use clap::{Parser, Subcommand};
use modkit::{ModuleRegistry, RunOptions, ShutdownOptions};
use modkit_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use workout_tracker::WorkoutTracker;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as `sqlite::memory:`.
/// - Normalizes backslashes into forward slashes.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Workout Tracker Server - plans, schedules and exercises over REST
#[derive(Parser)]
#[command(name = "workout-server")]
#[command(about = "Workout Tracker Server - plans, schedules and exercises over REST")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database and an ephemeral signing secret
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);
    prepare_module_sections(&mut config, &args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Workout Tracker Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, &args),
    }
}

/// Fill module sections that are derived from global settings.
fn prepare_module_sections(config: &mut AppConfig, args: &CliArgs) {
    if config.server.timeout_sec > 0 {
        let ingress = config
            .modules
            .entry("api_ingress".to_string())
            .or_insert_with(|| serde_json::json!({}));
        if let Some(section) = ingress.as_object_mut() {
            section
                .entry("request_timeout_secs")
                .or_insert_with(|| serde_json::json!(config.server.timeout_sec));
        }
    }

    if args.mock {
        let tracker = config
            .modules
            .entry("workout_tracker".to_string())
            .or_insert_with(|| serde_json::json!({}));
        if let Some(section) = tracker.as_object_mut() {
            let missing = section
                .get("jwt_secret")
                .and_then(|v| v.as_str())
                .is_none_or(|s| s.trim().is_empty());
            if missing {
                section.insert("jwt_secret".into(), serde_json::json!(nanoid::nanoid!(48)));
            }
        }
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if raw.eq_ignore_ascii_case(MEMORY_DSN) {
        return Ok("sqlite");
    }

    let url = url::Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN: {}", e))?;
    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

fn resolve_dsn(db_config: &DatabaseConfig, base_dir: &Path, mock: bool) -> Result<String> {
    if mock {
        return Ok(MEMORY_DSN.to_string());
    }
    detect_from_dsn(db_config)?;
    let dsn = db_config.url.trim().to_owned();
    if dsn.starts_with("sqlite") {
        absolutize_sqlite_dsn(&dsn, base_dir, true)
    } else {
        Ok(dsn)
    }
}

async fn connect_db(config: &AppConfig, args: &CliArgs) -> Result<Option<Arc<DbHandle>>> {
    let Some(db_config) = config.database.clone() else {
        if args.mock {
            let db = DbHandle::connect(MEMORY_DSN, ConnectOpts::default()).await?;
            return Ok(Some(Arc::new(db)));
        }
        tracing::warn!("No database configuration found, running without database");
        return Ok(None);
    };

    let dsn = resolve_dsn(&db_config, &config.home_dir(), args.mock)?;
    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .context("failed to connect database")?;
    tracing::info!(dsn = %db.dsn(), backend = ?db.engine(), "Connected database");
    Ok(Some(Arc::new(db)))
}

fn build_registry(config: &AppConfig) -> Result<ModuleRegistry> {
    let default_bind = format!("{}:{}", config.server.host, config.server.port);
    let ingress = Arc::new(ApiIngress::new(default_bind));
    let tracker = Arc::new(WorkoutTracker::default());

    let registry = ModuleRegistry::builder()
        .register_core("api_ingress", &[], ingress.clone())
        .register_rest_host("api_ingress", ingress.clone())
        .register_stateful("api_ingress", ingress)
        .register_core("workout_tracker", &["api_ingress"], tracker.clone())
        .register_db("workout_tracker", tracker.clone())
        .register_rest("workout_tracker", tracker)
        .build()?;
    Ok(registry)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db = connect_db(&config, &args).await?;
    let registry = build_registry(&config)?;

    modkit::run(RunOptions {
        registry,
        modules_cfg: Arc::new(config),
        db,
        shutdown: ShutdownOptions::Signals,
    })
    .await
}

fn check_config(config: AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db) = &config.database {
        if !args.mock {
            detect_from_dsn(db)?;
        }
    }
    let tracker: workout_tracker::config::WorkoutTrackerConfig =
        config.module_config("workout_tracker")?;
    if let Err(e) = tracker.validate() {
        println!("Warning: workout_tracker section is incomplete: {e}");
    }
    build_registry(&config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_conns: None,
            busy_timeout_ms: None,
        }
    }

    #[test]
    fn sqlite_paths_become_absolute() {
        let base = Path::new("/srv/workouts");
        let out = absolutize_sqlite_dsn("sqlite://database/w.db?mode=rwc", base, false).unwrap();
        assert_eq!(out, "sqlite:///srv/workouts/database/w.db?mode=rwc");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(),
            MEMORY_DSN
        );
        assert!(absolutize_sqlite_dsn("postgres://x", base, false).is_err());
    }

    #[test]
    fn dsn_detection() {
        assert_eq!(detect_from_dsn(&db("postgres://u:p@h/db")).unwrap(), "postgres");
        assert_eq!(detect_from_dsn(&db("sqlite:///tmp/x.db")).unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(&db("sqlite::memory:")).unwrap(), "sqlite");
        assert!(detect_from_dsn(&db("mysql://h/db")).is_err());
        assert!(detect_from_dsn(&db("  ")).is_err());
    }

    #[test]
    fn mock_resolves_to_memory() {
        let dsn = resolve_dsn(&db("postgres://nowhere/db"), Path::new("/tmp"), true).unwrap();
        assert_eq!(dsn, MEMORY_DSN);
    }

    #[test]
    fn mock_fills_an_ephemeral_secret_only_when_missing() {
        let args = CliArgs {
            mock: true,
            ..Default::default()
        };
        let mut cfg = AppConfig::default();
        prepare_module_sections(&mut cfg, &args);
        let secret = cfg.modules["workout_tracker"]["jwt_secret"].as_str().unwrap();
        assert_eq!(secret.len(), 48);

        let mut cfg = AppConfig::default();
        cfg.modules.insert(
            "workout_tracker".into(),
            serde_json::json!({ "jwt_secret": "keep-me" }),
        );
        prepare_module_sections(&mut cfg, &args);
        assert_eq!(cfg.modules["workout_tracker"]["jwt_secret"], "keep-me");
    }

    #[test]
    fn server_timeout_feeds_ingress() {
        let mut cfg = AppConfig::default();
        cfg.server.timeout_sec = 7;
        prepare_module_sections(&mut cfg, &CliArgs::default());
        assert_eq!(cfg.modules["api_ingress"]["request_timeout_secs"], 7);
    }

    #[test]
    fn registry_orders_ingress_first() {
        let registry = build_registry(&AppConfig::default()).unwrap();
        let names: Vec<_> = registry.modules().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["api_ingress", "workout_tracker"]);
    }
}
