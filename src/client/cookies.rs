//! Session cookie persistence
//!
//! The API keeps the session in an HttpOnly cookie. A browser holds on to
//! it by itself; the CLI saves the cookie header for the API base URL to a
//! small JSON file after each command and restores it into a fresh cookie
//! jar on the next one.

use chrono::{DateTime, Utc};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing the session file
#[derive(Error, Debug)]
pub enum SessionFileError {
    #[error("Failed to access session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    base_url: String,
    /// `name=value` pairs
    cookies: Vec<String>,
    saved_at: DateTime<Utc>,
}

/// On-disk home of the CLI session cookie
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved cookies for `base_url` into `jar`
    ///
    /// Returns how many cookies were restored. A missing file, or one saved
    /// for a different API, restores nothing.
    pub fn restore(&self, jar: &Jar, base_url: &str) -> Result<usize, SessionFileError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        let stored: StoredSession =
            serde_json::from_str(&content).map_err(|source| SessionFileError::Format {
                path: self.path.clone(),
                source,
            })?;

        if stored.base_url != base_url {
            tracing::debug!(
                saved = %stored.base_url,
                current = %base_url,
                "Session file belongs to another API, ignoring"
            );
            return Ok(0);
        }

        let url = parse_url(base_url)?;
        for pair in &stored.cookies {
            jar.add_cookie_str(&format!("{}; Path=/", pair), &url);
        }
        tracing::debug!(count = stored.cookies.len(), "Restored session cookies");
        Ok(stored.cookies.len())
    }

    /// Save the jar's cookies for `base_url`; an empty jar removes the file
    pub fn save(&self, jar: &Jar, base_url: &str) -> Result<(), SessionFileError> {
        let url = parse_url(base_url)?;
        let cookies: Vec<String> = jar
            .cookies(&url)
            .and_then(|header| header.to_str().ok().map(split_cookie_header))
            .unwrap_or_default();

        if cookies.is_empty() {
            return self.clear();
        }

        let stored = StoredSession {
            base_url: base_url.to_string(),
            cookies,
            saved_at: Utc::now(),
        };
        let content =
            serde_json::to_string_pretty(&stored).map_err(|source| SessionFileError::Format {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Forget the saved session
    pub fn clear(&self) -> Result<(), SessionFileError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionFileError {
        SessionFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn parse_url(base_url: &str) -> Result<Url, SessionFileError> {
    Url::parse(base_url).map_err(|e| SessionFileError::InvalidUrl(format!("{}: {}", base_url, e)))
}

fn split_cookie_header(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/api/v1";

    fn jar_with(cookie: &str) -> Jar {
        let jar = Jar::default();
        jar.add_cookie_str(cookie, &Url::parse(BASE).unwrap());
        jar
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("nested").join("session.json"));

        file.save(&jar_with("access_token=abc123; Path=/; HttpOnly"), BASE)
            .unwrap();

        let fresh = Jar::default();
        assert_eq!(file.restore(&fresh, BASE).unwrap(), 1);
        let header = fresh.cookies(&Url::parse(BASE).unwrap()).unwrap();
        assert_eq!(header.to_str().unwrap(), "access_token=abc123");
    }

    #[test]
    fn test_missing_file_restores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        assert_eq!(file.restore(&Jar::default(), BASE).unwrap(), 0);
    }

    #[test]
    fn test_other_api_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        file.save(&jar_with("access_token=abc123; Path=/"), BASE).unwrap();

        let restored = file
            .restore(&Jar::default(), "http://staging.example.com/api/v1")
            .unwrap();

        assert_eq!(restored, 0);
    }

    #[test]
    fn test_empty_jar_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let file = SessionFile::new(&path);
        file.save(&jar_with("access_token=abc123; Path=/"), BASE).unwrap();
        assert!(path.exists());

        file.save(&Jar::default(), BASE).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = SessionFile::new(&path)
            .restore(&Jar::default(), BASE)
            .unwrap_err();

        assert!(matches!(err, SessionFileError::Format { .. }));
    }
}
