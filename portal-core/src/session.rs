//! The logged-in session: bearer token plus who it belongs to.
//!
//! The session is loaded once and handed to the API client explicitly; nothing
//! reads the token from ambient state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PortalConfig;
use crate::error::{PortalError, PortalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Guide,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Guide => f.write_str("guide"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "guide" => Ok(Role::Guide),
            other => Err(format!("unknown role '{other}' (expected admin or guide)")),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub email: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .finish()
    }
}

impl Session {
    /// `<config dir>/edu-portal/session.toml`
    pub fn path() -> PortalResult<PathBuf> {
        Ok(PortalConfig::config_dir()?.join("session.toml"))
    }

    pub fn load() -> PortalResult<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> PortalResult<Self> {
        if !path.exists() {
            return Err(PortalError::NotLoggedIn);
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PortalError::Serialization(e.to_string()))
    }

    pub fn save(&self) -> PortalResult<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> PortalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PortalError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear() -> PortalResult<bool> {
        Self::clear_at(&Self::path()?)
    }

    pub fn clear_at(path: &Path) -> PortalResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    pub fn require_role(&self, required: Role) -> PortalResult<()> {
        if self.role == required {
            Ok(())
        } else {
            Err(PortalError::Forbidden {
                required,
                actual: self.role,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "eyJhbGciOi.secret".into(),
            role: Role::Guide,
            email: "ana@school.test".into(),
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");
        session().save_to(&path).unwrap();
        assert_eq!(Session::load_from(&path).unwrap(), session());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("role = \"guide\""));
    }

    #[test]
    fn missing_file_means_not_logged_in() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::load_from(&dir.path().join("session.toml")).unwrap_err();
        assert!(matches!(err, PortalError::NotLoggedIn));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = ").unwrap();
        assert!(matches!(
            Session::load_from(&path),
            Err(PortalError::Serialization(_))
        ));
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        session().save_to(&path).unwrap();
        assert!(Session::clear_at(&path).unwrap());
        assert!(!path.exists());
        assert!(!Session::clear_at(&path).unwrap());
    }

    #[test]
    fn role_checks() {
        let guide = session();
        assert!(guide.require_role(Role::Guide).is_ok());
        let err = guide.require_role(Role::Admin).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This action requires the admin role (logged in as guide)"
        );
    }

    #[test]
    fn role_parsing() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" guide ".parse::<Role>(), Ok(Role::Guide));
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn debug_hides_token() {
        let shown = format!("{:?}", session());
        assert!(!shown.contains("secret"));
        assert!(shown.contains("ana@school.test"));
    }
}
