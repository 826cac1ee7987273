use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::manufacturing::CostHistory;

pub const SESSION_COOKIE: &str = "pricing_desk_session";

/// Per-browser state: login flag and the cost estimator history
#[derive(Debug)]
pub struct Session {
    pub authenticated: bool,
    pub cost_history: CostHistory,
    last_seen: Instant,
}

impl Session {
    fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            cost_history: CostHistory::new(),
            last_seen: Instant::now(),
        }
    }
}

/// Handle to the caller's session, attached to each request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub id: Uuid,
    /// The caller sent no live session; a cookie is issued once the session is stored
    pub is_new: bool,
}

/// All live sessions
///
/// Entries are created on first write (login, first cost estimate), so
/// requests that only read never grow the map.
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    ttl: Duration,
    gate_enabled: bool,
}

impl SessionStore {
    /// With the password gate disabled every session counts as authenticated
    pub fn new(ttl: Duration, gate_enabled: bool) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            gate_enabled,
        }
    }

    /// Resume the session `id`, or hand out a fresh id that is not stored yet
    pub fn open(&self, id: Option<Uuid>) -> SessionContext {
        if let Some(id) = id {
            if let Some(mut session) = self.sessions.get_mut(&id) {
                session.last_seen = Instant::now();
                return SessionContext { id, is_new: false };
            }
        }

        SessionContext {
            id: Uuid::new_v4(),
            is_new: true,
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn is_authenticated(&self, id: &Uuid) -> bool {
        self.sessions
            .get(id)
            .map(|s| s.authenticated)
            .unwrap_or(!self.gate_enabled)
    }

    /// Logging in stores the session; logging out only updates a stored one
    pub fn set_authenticated(&self, id: &Uuid, authenticated: bool) {
        if authenticated {
            self.with_session_or_create(id, |session| session.authenticated = true);
        } else {
            self.update_session(id, |session| session.authenticated = false);
        }
    }

    /// Read the session, if it is stored
    pub fn with_session<R>(&self, id: &Uuid, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.sessions.get(id).map(|session| f(session.value()))
    }

    /// Modify the session, if it is stored
    pub fn update_session<R>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.sessions
            .get_mut(id)
            .map(|mut session| f(session.value_mut()))
    }

    /// Modify the session, storing it first if needed
    pub fn with_session_or_create<R>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        if !self.sessions.contains_key(id) {
            self.prune_expired();
            debug!(session = %id, "Session created");
        }

        let mut session = self
            .sessions
            .entry(*id)
            .or_insert_with(|| Session::new(!self.gate_enabled));
        session.last_seen = Instant::now();
        f(session.value_mut())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn prune_expired(&self) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen.elapsed() < self.ttl);
        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed, "Pruned idle sessions");
        }
    }
}

/// Read the session id from the `Cookie` header
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session
pub fn session_cookie(id: &Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
