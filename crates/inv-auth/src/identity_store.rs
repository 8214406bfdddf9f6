//! Persisted session identity (`~/.inventra/identity.json`).
//!
//! The identity file mirrors the stored token: written together at login,
//! cleared together at logout or teardown. Hydration reads it synchronously at
//! startup so commands know the logged-in user without a network round trip.

use std::fs;
use std::path::{Path, PathBuf};

use inv_core::identity::SessionIdentity;

use crate::error::AuthError;

const IDENTITY_FILE_NAME: &str = "identity.json";

fn identity_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".inventra").join(IDENTITY_FILE_NAME))
        .ok_or_else(|| {
            AuthError::IdentityStoreError("home directory not found; cannot store identity".into())
        })
}

/// Persist the identity alongside the token.
///
/// # Errors
///
/// Returns `AuthError::IdentityStoreError` if the file cannot be written.
pub fn save(identity: &SessionIdentity) -> Result<(), AuthError> {
    save_to(&identity_path()?, identity)
}

/// Load the persisted identity, if a readable one exists.
#[must_use]
pub fn load() -> Option<SessionIdentity> {
    load_from(&identity_path().ok()?)
}

/// Remove the persisted identity.
///
/// # Errors
///
/// Returns `AuthError::IdentityStoreError` if the file exists but cannot be
/// removed.
pub fn delete() -> Result<(), AuthError> {
    delete_at(&identity_path()?)
}

fn save_to(path: &Path, identity: &SessionIdentity) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AuthError::IdentityStoreError(format!("mkdir {}: {e}", parent.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    let json = serde_json::to_string_pretty(identity)
        .map_err(|e| AuthError::IdentityStoreError(format!("serialize identity: {e}")))?;
    fs::write(path, json)
        .map_err(|e| AuthError::IdentityStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::IdentityStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_from(path: &Path) -> Option<SessionIdentity> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(identity) => Some(identity),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "stored identity is unreadable; ignoring");
            None
        }
    }
}

fn delete_at(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::IdentityStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use inv_core::enums::Role;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_identity() -> SessionIdentity {
        SessionIdentity {
            id: 3,
            username: "jdoe".into(),
            email: Some("jdoe@example.com".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            role: Role::Manager,
        }
    }

    #[test]
    fn identity_path_is_under_home() {
        let path = identity_path().expect("should resolve");
        assert!(path.ends_with(".inventra/identity.json"));
    }

    #[test]
    fn save_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("identity.json");

        let identity = sample_identity();
        save_to(&path, &identity).expect("save");
        assert_eq!(load_from(&path), Some(identity));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path)
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "identity file should be 0600");
        }

        delete_at(&path).expect("delete");
        assert!(!path.exists());
        assert_eq!(load_from(&path), None);
    }

    #[test]
    fn corrupt_identity_loads_as_none() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("identity.json");

        std::fs::write(&path, "{not json").expect("write");
        assert_eq!(load_from(&path), None);
    }

    #[test]
    fn deleting_a_missing_file_is_fine() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("identity.json");
        assert!(delete_at(&path).is_ok());
    }
}
