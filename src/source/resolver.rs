//! Data directory resolution.
//!
//! # Responsibilities
//! - Read the configured directory from the environment on every request
//! - Translate drive-letter paths (`C:\data`) to their POSIX mount point
//!   (`/mnt/c/data`) when running on a POSIX host
//! - Expand `~`, make the path absolute and canonical
//! - Reject paths that do not exist or are not directories
//!
//! # Design Decisions
//! - Drive-letter translation is a best-effort regex heuristic, not a
//!   general path translator
//! - Nothing is cached: a changed variable takes effect on the next request

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::DataSourceConfig;
use crate::source::error::DataError;

fn drive_letter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<drive>[a-zA-Z]):[\\/](?P<rest>.*)$")
            .expect("drive letter pattern is valid")
    })
}

/// Rewrite a drive-letter path to its mount point under `mount_root`.
///
/// Values that do not look like `X:\...` or `X:/...` are returned unchanged,
/// and so is everything on Windows hosts.
pub fn normalize_foreign_path(raw: &str, mount_root: &str) -> String {
    if cfg!(windows) {
        return raw.to_string();
    }

    let Some(captures) = drive_letter_pattern().captures(raw) else {
        return raw.to_string();
    };

    let drive = captures["drive"].to_ascii_lowercase();
    let rest = captures["rest"].replace('\\', "/");
    format!("{}/{}/{}", mount_root.trim_end_matches('/'), drive, rest)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(first) if first.as_os_str() == "~" => match home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Resolves the data directory named by an environment variable.
#[derive(Debug, Clone)]
pub struct PathResolver {
    env_var: String,
    mount_root: String,
}

impl PathResolver {
    pub fn new(env_var: impl Into<String>, mount_root: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
            mount_root: mount_root.into(),
        }
    }

    pub fn from_config(config: &DataSourceConfig) -> Self {
        Self::new(config.env_var.clone(), config.mount_root.clone())
    }

    /// The raw configured value, if any. Read fresh on every call.
    pub fn configured(&self) -> Option<String> {
        std::env::var_os(&self.env_var).map(|value| value.to_string_lossy().into_owned())
    }

    /// Resolve the directory currently named by the environment variable.
    pub async fn resolve(&self) -> Result<PathBuf, DataError> {
        match std::env::var_os(&self.env_var) {
            Some(raw) if !raw.is_empty() => self.resolve_value(raw).await,
            _ => Err(DataError::NotConfigured {
                var: self.env_var.clone(),
            }),
        }
    }

    /// Resolve an explicit configured value.
    pub async fn resolve_value(&self, raw: impl Into<OsString>) -> Result<PathBuf, DataError> {
        let raw = raw.into();
        let normalized = match raw.to_str() {
            Some(text) => PathBuf::from(normalize_foreign_path(text, &self.mount_root)),
            None => PathBuf::from(&raw),
        };

        let expanded = expand_home(&normalized);
        let not_found = || DataError::NotFound {
            path: std::path::absolute(&expanded).unwrap_or_else(|_| expanded.clone()),
        };

        let canonical = tokio::fs::canonicalize(&expanded)
            .await
            .map_err(|_| not_found())?;
        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|_| not_found())?;
        if !metadata.is_dir() {
            return Err(DataError::NotFound { path: canonical });
        }

        tracing::debug!(
            env_var = %self.env_var,
            root = %canonical.display(),
            "Resolved data directory"
        );
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_drive_letter_translated_on_posix() {
        assert_eq!(
            normalize_foreign_path(r"C:\Users\me\data", "/mnt"),
            "/mnt/c/Users/me/data"
        );
        assert_eq!(normalize_foreign_path("d:/runs/7", "/mnt/"), "/mnt/d/runs/7");
        assert_eq!(normalize_foreign_path(r"E:\", "/mnt"), "/mnt/e/");
    }

    #[test]
    fn test_other_paths_unchanged() {
        assert_eq!(normalize_foreign_path("/srv/data", "/mnt"), "/srv/data");
        assert_eq!(normalize_foreign_path("relative/dir", "/mnt"), "relative/dir");
        assert_eq!(normalize_foreign_path("C:", "/mnt"), "C:");
        assert_eq!(normalize_foreign_path(r"CC:\x", "/mnt"), r"CC:\x");
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/srv/data")), PathBuf::from("/srv/data"));
        assert_eq!(expand_home(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    }

    #[tokio::test]
    async fn test_unset_variable_is_not_configured() {
        let resolver = PathResolver::new("EXTERNAL_DATA_TEST_RESOLVER_UNSET", "/mnt");
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, DataError::NotConfigured { .. }));
        assert!(resolver.configured().is_none());
    }

    #[tokio::test]
    async fn test_empty_variable_is_not_configured() {
        std::env::set_var("EXTERNAL_DATA_TEST_RESOLVER_EMPTY", "");
        let resolver = PathResolver::new("EXTERNAL_DATA_TEST_RESOLVER_EMPTY", "/mnt");
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, DataError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn test_existing_directory_resolves_canonical() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("run")).unwrap();
        let resolver = PathResolver::new("unused", "/mnt");

        let dotted = dir.path().join("run").join("..").join("run");
        let root = resolver.resolve_value(dotted.as_os_str()).await.unwrap();
        assert_eq!(root, dir.path().join("run").canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_missing_or_file_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let resolver = PathResolver::new("unused", "/mnt");

        let err = resolver.resolve_value(file.as_os_str()).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));

        let missing = dir.path().join("missing");
        let err = resolver.resolve_value(missing.as_os_str()).await.unwrap_err();
        match err {
            DataError::NotFound { path } => assert!(path.ends_with("missing")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_drive_letter_resolves_under_mount_root() {
        let mount = tempfile::tempdir().unwrap();
        let resolver = PathResolver::new("unused", mount.path().to_string_lossy());

        let err = resolver.resolve_value(r"C:\Users\me\data").await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));

        let target = mount.path().join("c").join("Users").join("me").join("data");
        std::fs::create_dir_all(&target).unwrap();
        let root = resolver.resolve_value(r"C:\Users\me\data").await.unwrap();
        assert_eq!(root, target.canonicalize().unwrap());
    }
}
