use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

fn level_filter(s: &str) -> LevelFilter {
    parse_tracing_level(s)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

// -------- rotating file writers --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .flush()
    }
}

/// Writer handle that drops records when no file is configured for the target.
struct MaybeWriter(Option<RotWriter>);

impl Write for MaybeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to a file by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: Vec<(String, RotWriter)>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_crate_prefix(target, prefix))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeWriter(self.resolve_for(meta.target()))
    }
}

/// Relative paths are resolved against `base_dir` (server.home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer_at_path(log_path: &Path, section: &Section) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(backups)),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- filters --------

/// Console filter: "default" sets the fallback level, every other key a crate target.
fn build_console_targets(cfg: &LoggingConfig) -> Targets {
    let mut targets = Targets::new().with_default(
        cfg.get(DEFAULT_SECTION)
            .map(|s| level_filter(&s.console_level))
            .unwrap_or(LevelFilter::INFO),
    );
    for (name, section) in cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION) {
        targets = targets.with_target(name.clone(), level_filter(&section.console_level));
    }
    targets
}

/// File filter: a section without a file contributes nothing.
fn build_file_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .filter(|s| !s.file.trim().is_empty())
        .map(|s| level_filter(&s.file_level))
        .unwrap_or(LevelFilter::OFF);

    let mut targets = Targets::new().with_default(default);
    for (name, section) in cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION) {
        let level = if section.file.trim().is_empty() {
            default
        } else {
            level_filter(&section.file_level)
        };
        targets = targets.with_target(name.clone(), level);
    }
    targets
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    // One writer per distinct path so sections sharing a file share a handle.
    let mut by_path: HashMap<PathBuf, RotWriter> = HashMap::new();
    let mut open = |section: &Section, name: &str| -> Option<RotWriter> {
        if section.file.trim().is_empty() {
            return None;
        }
        let path = resolve_log_path(&section.file, base_dir);
        if let Some(w) = by_path.get(&path) {
            return Some(w.clone());
        }
        match create_rotating_writer_at_path(&path, section) {
            Ok(w) => {
                by_path.insert(path, w.clone());
                Some(w)
            }
            Err(e) => {
                eprintln!(
                    "Failed to init log file for '{}': {} ({})",
                    name,
                    path.display(),
                    e
                );
                None
            }
        }
    };

    let mut router = FileRouter {
        default: cfg
            .get(DEFAULT_SECTION)
            .and_then(|s| open(s, DEFAULT_SECTION)),
        by_prefix: Vec::new(),
    };

    for (name, section) in cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION) {
        if let Some(w) = open(section, name) {
            router.by_prefix.push((name.clone(), w));
        }
    }
    // Longest prefix wins when crate names nest.
    router
        .by_prefix
        .sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    router
}

// -------- public init --------

/// Install the global subscriber: a human readable console layer plus an
/// optional JSON layer writing into rotating files under `base_dir`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` records before the subscriber goes in.
    let _ = tracing_log::LogTracer::init();

    let ansi = std::io::stdout().is_terminal();
    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_console_targets(cfg));

    let router = build_file_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(build_file_targets(cfg));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_backups: Some(2),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn test_logging_level_parsing() {
        assert_eq!(parse_tracing_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_tracing_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("Warn"), Some(Level::WARN));
        assert_eq!(parse_tracing_level("off"), None);
        assert_eq!(parse_tracing_level("bogus"), Some(Level::INFO));
        assert_eq!(level_filter("none"), LevelFilter::OFF);
    }

    #[test]
    fn test_crate_prefix_matching() {
        assert!(matches_crate_prefix("workout_tracker", "workout_tracker"));
        assert!(matches_crate_prefix("workout_tracker::domain", "workout_tracker"));
        assert!(!matches_crate_prefix("workout_tracker_extra", "workout_tracker"));
    }

    #[test]
    fn test_console_targets_use_default_section() {
        let mut cfg = default_logging_config();
        cfg.insert("sqlx".into(), section("warn", "", ""));

        let targets = build_console_targets(&cfg);
        assert!(targets.would_enable("api_ingress", &Level::INFO));
        assert!(!targets.would_enable("api_ingress", &Level::DEBUG));
        assert!(!targets.would_enable("sqlx::query", &Level::INFO));
        assert!(targets.would_enable("sqlx::query", &Level::WARN));
    }

    #[test]
    fn test_file_targets_off_without_files() {
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("info", "", "debug"));
        let targets = build_file_targets(&cfg);
        assert!(!targets.would_enable("anything", &Level::ERROR));
    }

    #[test]
    fn test_file_router_shares_writer_for_same_path() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("info", "logs/all.log", "debug"));
        cfg.insert("workout_tracker".into(), section("info", "logs/all.log", "debug"));
        cfg.insert("api_ingress".into(), section("info", "logs/http.log", "debug"));

        let router = build_file_router(&cfg, tmp.path());
        assert!(router.default.is_some());
        assert_eq!(router.by_prefix.len(), 2);
        assert!(tmp.path().join("logs").exists());

        let default = router.default.clone().unwrap();
        let tracker = router.resolve_for("workout_tracker::service").unwrap();
        assert!(Arc::ptr_eq(&default.0, &tracker.0));

        let http = router.resolve_for("api_ingress").unwrap();
        assert!(!Arc::ptr_eq(&default.0, &http.0));
    }

    #[test]
    fn test_file_paths_resolved_against_home_dir() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_log_path("logs/test.log", tmp.path());
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("logs/test.log"));

        let abs = tmp.path().join("abs.log");
        assert_eq!(resolve_log_path(&abs.to_string_lossy(), Path::new("/ignored")), abs);
    }
}
