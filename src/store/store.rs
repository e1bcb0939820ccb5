use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::backend::StorageBackend;
use crate::model::{Profile, Session, MIN_PROFILE_DOMAINS};

const PROFILE_KEY: &str = "clarity_profile";
const SESSIONS_KEY: &str = "clarity_sessions";
const USED_PROMPTS_KEY: &str = "clarity_used_prompts";

/// Typed access to the three persisted namespaces
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    pub fn profile(&self) -> Option<Profile> {
        self.load(PROFILE_KEY)
    }

    /// Full-replace save. Profiles with fewer than the minimum domain count
    /// are rejected before anything is written.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        if profile.domains.len() < MIN_PROFILE_DOMAINS {
            bail!(
                "profile must select at least {} domains (got {})",
                MIN_PROFILE_DOMAINS,
                profile.domains.len()
            );
        }
        self.save(PROFILE_KEY, profile)
    }

    pub fn clear_profile(&self) -> Result<()> {
        self.backend.remove(PROFILE_KEY)
    }

    /// One-time migration: earlier builds persisted the service token inside
    /// the profile record. Strip the legacy `apiKey` field, keeping every
    /// other field as-is.
    pub fn migrate_profile(&self) -> Result<()> {
        let raw = match self.backend.read(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!("Skipping profile migration, read failed: {}", e);
                return Ok(());
            }
        };

        let mut value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            // Corrupt records are handled lazily by the load path
            Err(_) => return Ok(()),
        };

        if let Some(obj) = value.as_object_mut() {
            if obj.remove("apiKey").is_some() {
                info!("Removed legacy apiKey field from stored profile");
                self.backend.write(PROFILE_KEY, &value.to_string())?;
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// All persisted sessions, most recent first
    pub fn sessions(&self) -> Vec<Session> {
        self.load(SESSIONS_KEY).unwrap_or_default()
    }

    /// Upsert by session id: an in-progress session is replaced in place,
    /// a new one is inserted at the front.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        if session.attempts.is_empty() {
            bail!("refusing to persist session {} with no attempts", session.id);
        }

        let mut sessions = self.sessions();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.insert(0, session.clone()),
        }
        self.save(SESSIONS_KEY, &sessions)
    }

    // ------------------------------------------------------------------
    // Used prompt ids
    // ------------------------------------------------------------------

    pub fn used_prompt_ids(&self) -> Vec<String> {
        self.load(USED_PROMPTS_KEY).unwrap_or_default()
    }

    /// Set semantics: marking an already-present id is a no-op
    pub fn mark_prompt_used(&self, id: &str) -> Result<()> {
        let mut used = self.used_prompt_ids();
        if used.iter().any(|u| u == id) {
            return Ok(());
        }
        used.push(id.to_string());
        self.save(USED_PROMPTS_KEY, &used)
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Clear all three namespaces together
    pub fn reset(&self) -> Result<()> {
        self.backend.remove(PROFILE_KEY)?;
        self.backend.remove(SESSIONS_KEY)?;
        self.backend.remove(USED_PROMPTS_KEY)?;
        info!("Store reset: profile, sessions and used prompts cleared");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Load and parse a record. Locally-cached convenience data fails soft:
    /// unreadable or unparseable records are treated as absent.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read {}, treating as absent: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Corrupt record at {}, treating as absent: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }
}
