//! Application state shared by axum handlers.

use std::path::Path;
use std::sync::Arc;

use fleetmatch_lib::{Error as LibError, Roster};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Roster file missing at the configured path.
    RosterNotFound(String),

    /// Roster file present but unreadable or invalid.
    RosterLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RosterNotFound(path) => write!(f, "driver roster not found: {}", path),
            Self::RosterLoad(e) => write!(f, "failed to load driver roster: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RosterLoad(e) => Some(e),
            Self::RosterNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::RosterNotFound { path } => Self::RosterNotFound(path.display().to_string()),
            other => Self::RosterLoad(other),
        }
    }
}

/// Cheaply cloneable handle to the loaded roster.
///
/// ```
/// use fleetmatch_lib::Roster;
/// use fleetmatch_service_shared::AppState;
///
/// let state = AppState::from_roster(Roster::demo());
/// assert_eq!(state.roster().len(), 4);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    roster: Roster,
}

impl AppState {
    /// Load the roster from a JSON file.
    pub fn load(roster_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let roster_path = roster_path.as_ref();
        tracing::info!(path = %roster_path.display(), "loading driver roster");
        let roster = Roster::from_path(roster_path)?;
        Ok(Self::from_roster(roster))
    }

    /// Load from `FLEETMATCH_ROSTER_PATH`, or fall back to the demo roster.
    pub fn from_env() -> Result<Self, AppStateError> {
        let roster = Roster::from_env_or_demo()?;
        if roster.source().is_none() {
            tracing::warn!("FLEETMATCH_ROSTER_PATH not set, serving the demo roster");
        }
        Ok(Self::from_roster(roster))
    }

    pub fn from_roster(roster: Roster) -> Self {
        Self {
            inner: Arc::new(AppStateInner { roster }),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.inner.roster
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("driver_count", &self.inner.roster.len())
            .field("source", &self.inner.roster.source())
            .finish()
    }
}
