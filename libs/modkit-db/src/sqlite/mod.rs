//! SQLite DSN helpers: memory detection, home-relative paths and
//! parent directory creation.

use std::io;
use std::path::{Path, PathBuf};

/// True for `sqlite::memory:`, `sqlite://:memory:` and `mode=memory` DSNs.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let dsn = dsn.trim();
    if dsn.contains(":memory:") {
        return true;
    }
    split_query(dsn)
        .1
        .map(|q| {
            q.split('&').any(|kv| {
                kv.split_once('=')
                    .map(|(k, v)| k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory"))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Rewrites a relative SQLite file DSN so the file lives under `base_dir`.
///
/// `sqlite://database/workouts.db` with base `/srv/app` becomes
/// `sqlite:///srv/app/database/workouts.db`. Memory DSNs, absolute paths and
/// non-SQLite DSNs are returned unchanged.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> String {
    if is_memory_dsn(dsn) {
        return dsn.to_string();
    }
    let Some(path) = file_path(dsn) else {
        return dsn.to_string();
    };
    if path.is_absolute() {
        return dsn.to_string();
    }

    let abs = base_dir.join(path);
    let abs = abs.to_string_lossy().replace('\\', "/");
    let abs = abs.trim_start_matches('/');
    match split_query(dsn).1 {
        Some(q) => format!("sqlite:///{abs}?{q}"),
        None => format!("sqlite:///{abs}"),
    }
}

/// Creates the parent directory of a SQLite database file.
pub(crate) fn ensure_parent_dir(dsn: &str) -> io::Result<()> {
    if is_memory_dsn(dsn) {
        return Ok(());
    }
    if let Some(parent) = file_path(dsn).as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn split_query(dsn: &str) -> (&str, Option<&str>) {
    match dsn.split_once('?') {
        Some((head, q)) => (head, Some(q)),
        None => (dsn, None),
    }
}

/// File path of a SQLite DSN: `sqlite:///abs`, `sqlite://rel`, `sqlite:rel`.
fn file_path(dsn: &str) -> Option<PathBuf> {
    let (head, _) = split_query(dsn.trim());
    let rest = head
        .strip_prefix("sqlite://")
        .or_else(|| head.strip_prefix("sqlite:"))?;
    if rest.is_empty() {
        return None;
    }
    Some(PathBuf::from(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsns_are_detected() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite://file.db?cache=shared&mode=memory"));
        assert!(!is_memory_dsn("sqlite://database/workouts.db"));
    }

    #[test]
    fn relative_path_is_joined_to_base() {
        let out = absolutize_sqlite_dsn("sqlite://database/workouts.db", Path::new("/srv/app"));
        assert_eq!(out, "sqlite:///srv/app/database/workouts.db");
    }

    #[test]
    fn query_is_preserved() {
        let out = absolutize_sqlite_dsn("sqlite:data.db?mode=rwc", Path::new("/srv"));
        assert_eq!(out, "sqlite:///srv/data.db?mode=rwc");
    }

    #[test]
    fn absolute_memory_and_foreign_dsns_are_untouched() {
        let base = Path::new("/srv");
        assert_eq!(absolutize_sqlite_dsn("sqlite:///var/db.sqlite", base), "sqlite:///var/db.sqlite");
        assert_eq!(absolutize_sqlite_dsn("sqlite::memory:", base), "sqlite::memory:");
        assert_eq!(
            absolutize_sqlite_dsn("postgres://u:p@localhost/db", base),
            "postgres://u:p@localhost/db"
        );
    }

    #[test]
    fn parent_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("nested/dir/app.db");
        let dsn = format!("sqlite://{}", db.to_string_lossy());
        ensure_parent_dir(&dsn).unwrap();
        assert!(db.parent().unwrap().exists());
    }
}
