use std::fs;
use std::io::Write;
use std::path::Path;

use client_logging::{client_error, client_info, client_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

const IDENTITY_FILENAME: &str = ".webpdf_identity.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedIdentity {
    user_id: String,
}

/// Loads the persisted identity token, or generates and saves a fresh
/// one. The token is created once per machine and never reassigned;
/// a corrupt or unreadable file falls back to a fresh token.
pub(crate) fn load_or_create_identity(state_dir: &Path) -> String {
    if let Some(token) = load_identity(state_dir) {
        return token;
    }
    let token = Uuid::new_v4().to_string();
    client_info!("Generated new identity token");
    save_identity(state_dir, &token);
    token
}

fn load_identity(state_dir: &Path) -> Option<String> {
    let path = state_dir.join(IDENTITY_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            client_warn!("Failed to read identity from {:?}: {}", path, err);
            return None;
        }
    };

    let persisted: PersistedIdentity = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(err) => {
            client_warn!("Failed to parse identity from {:?}: {}", path, err);
            return None;
        }
    };

    if persisted.user_id.is_empty() {
        return None;
    }
    Some(persisted.user_id)
}

pub(crate) fn save_identity(state_dir: &Path, token: &str) {
    let persisted = PersistedIdentity {
        user_id: token.to_string(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            client_error!("Failed to serialize identity: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(state_dir, &content) {
        client_error!("Failed to write identity to {:?}: {}", state_dir, err);
    }
}

fn write_atomic(state_dir: &Path, content: &str) -> std::io::Result<()> {
    let target = state_dir.join(IDENTITY_FILENAME);
    let mut tmp = NamedTempFile::new_in(state_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_or_create_identity, save_identity, IDENTITY_FILENAME};
    use tempfile::TempDir;

    #[test]
    fn identity_round_trips_through_the_state_file() {
        let temp = TempDir::new().unwrap();
        save_identity(temp.path(), "abc123");

        assert_eq!(load_or_create_identity(temp.path()), "abc123");
    }

    #[test]
    fn missing_file_yields_a_fresh_persistent_token() {
        let temp = TempDir::new().unwrap();
        let first = load_or_create_identity(temp.path());
        assert!(!first.is_empty());

        // Second load returns the same token, not a new one.
        let second = load_or_create_identity(temp.path());
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_file_is_replaced_with_a_fresh_token() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(IDENTITY_FILENAME), "not ron at all").unwrap();

        let token = load_or_create_identity(temp.path());
        assert!(!token.is_empty());
        assert_eq!(load_or_create_identity(temp.path()), token);
    }
}
