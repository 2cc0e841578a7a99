//! Persisted authentication/session state.
//!
//! `SessionStore` is the single owner of the session: every other
//! component reads it, nothing else writes it. It mirrors the browser
//! localStorage layout of the original client — three independent
//! entries (`token`, `principal`, `role`) under one directory — and
//! writes all of them through on every mutation.
//!
//! Key properties:
//! - Observable state is all-or-nothing: a fully populated session or
//!   an empty one, never a token without a principal.
//! - `restore` never fails: missing, unparseable, or mutually
//!   inconsistent entries collapse to the empty session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config;
use crate::models::{Principal, Role};

const TOKEN_ENTRY: &str = "token";
const PRINCIPAL_ENTRY: &str = "principal";
const ROLE_ENTRY: &str = "role";

// ═══════════════════════════════════════════════════════════
// ActiveSession — one authenticated principal
// ═══════════════════════════════════════════════════════════

/// A fully populated session: bearer token, principal, role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub token: String,
    pub principal: Principal,
    pub role: Role,
}

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

/// Owner of the client's session state, with durable file backing.
///
/// The in-memory session is authoritative for the running process;
/// the backing entries exist so a restart lands in the same session.
pub struct SessionStore {
    dir: PathBuf,
    session: Option<ActiveSession>,
}

impl SessionStore {
    /// Open a store backed by the given directory, restoring any
    /// persisted session. Corrupt or partial entries are treated as
    /// no session.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let session = restore_from(&dir);
        if session.is_some() {
            tracing::info!(dir = %dir.display(), "restored persisted session");
        }
        Self { dir, session }
    }

    /// Open the store at the default platform location.
    pub fn open_default() -> Self {
        Self::open(config::session_dir())
    }

    // ── Reads ────────────────────────────────────────────

    /// The current session, if authenticated.
    pub fn current(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    /// The bearer token, if authenticated.
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// The session role, if authenticated.
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    // ── Mutations (the only writers) ─────────────────────

    /// Establish a session: all three fields set together, then written
    /// through to disk. Pure local mutation — persistence failures are
    /// logged and do not fail the login.
    pub fn login(&mut self, token: String, principal: Principal, role: Role) {
        tracing::info!(role = %role, principal = principal.id(), "session login");
        self.session = Some(ActiveSession {
            token,
            principal,
            role,
        });
        if let Err(e) = self.persist() {
            tracing::warn!("failed to persist session: {e}");
        }
    }

    /// Clear the session and its durable entries.
    pub fn logout(&mut self) {
        tracing::info!("session logout");
        self.session = None;
        for entry in [TOKEN_ENTRY, PRINCIPAL_ENTRY, ROLE_ENTRY] {
            if let Err(e) = remove_entry(&self.dir, entry) {
                tracing::warn!(entry, "failed to clear session entry: {e}");
            }
        }
    }

    // ── Internal ─────────────────────────────────────────

    fn persist(&self) -> io::Result<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_ENTRY), &session.token)?;
        let principal = serde_json::to_string(&session.principal)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.dir.join(PRINCIPAL_ENTRY), principal)?;
        fs::write(self.dir.join(ROLE_ENTRY), session.role.as_str())?;
        Ok(())
    }
}

/// Read the three entries back; any gap or inconsistency means no session.
fn restore_from(dir: &Path) -> Option<ActiveSession> {
    let token = read_entry(dir, TOKEN_ENTRY)?;
    if token.trim().is_empty() {
        return None;
    }
    let principal: Principal = serde_json::from_str(&read_entry(dir, PRINCIPAL_ENTRY)?)
        .map_err(|e| tracing::warn!("discarding unparseable principal entry: {e}"))
        .ok()?;
    let role = Role::parse(&read_entry(dir, ROLE_ENTRY)?)?;
    if role != principal.role() {
        tracing::warn!("discarding session: role entry contradicts principal");
        return None;
    }
    Some(ActiveSession {
        token,
        principal,
        role,
    })
}

fn read_entry(dir: &Path, entry: &str) -> Option<String> {
    fs::read_to_string(dir.join(entry)).ok()
}

fn remove_entry(dir: &Path, entry: &str) -> io::Result<()> {
    match fs::remove_file(dir.join(entry)) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
