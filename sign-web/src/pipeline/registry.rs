//! Session registry - explicit create / get / evict with idle sweeping
//!
//! The map lock is held only to look up or insert; each session has its own
//! lock, so different sessions are processed in parallel while frames for
//! one session stay sequential.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use super::session::SignSession;
use crate::recognizer::Predictor;
use crate::stabilizer::StabilizerParams;

/// Builds the predictor for a new session
pub type PredictorFactory = Arc<dyn Fn() -> Box<dyn Predictor> + Send + Sync>;

pub type SharedSession = Arc<Mutex<SignSession>>;

pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SharedSession>>,
    factory: PredictorFactory,
    stabilizer: StabilizerParams,
    timeout_secs: f64,
    cleanup_interval_secs: f64,
    last_sweep: Mutex<Option<f64>>,
}

impl SessionRegistry {
    pub fn new(
        factory: PredictorFactory,
        stabilizer: StabilizerParams,
        timeout_secs: f64,
        cleanup_interval_secs: f64,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            factory,
            stabilizer,
            timeout_secs,
            cleanup_interval_secs,
            last_sweep: Mutex::new(None),
        }
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.lock().get(id).cloned()
    }

    pub fn get_or_create(&self, id: &str, now: f64) -> SharedSession {
        let mut sessions = self.sessions.lock();
        if let Some(session) = sessions.get(id) {
            return Arc::clone(session);
        }

        let session = Arc::new(Mutex::new(SignSession::new(
            (self.factory)(),
            self.stabilizer,
            now,
        )));
        sessions.insert(id.to_string(), Arc::clone(&session));
        info!(session = id, active = sessions.len(), "Session created");
        session
    }

    /// Tear down one session; returns whether it existed
    pub fn evict(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock();
        let removed = sessions.remove(id).is_some();
        if removed {
            info!(session = id, active = sessions.len(), "Session evicted");
        }
        removed
    }

    /// Drop every session idle longer than the timeout
    pub fn evict_idle(&self, now: f64) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.lock().idle_for(now) <= self.timeout_secs;
            if !keep {
                info!(session = %id, "Session expired");
            }
            keep
        });
        before - sessions.len()
    }

    /// Run `evict_idle` if a cleanup interval has passed since the last sweep
    ///
    /// The first call only starts the interval.
    pub fn maybe_sweep(&self, now: f64) -> usize {
        {
            let mut last = self.last_sweep.lock();
            match *last {
                Some(at) if now - at < self.cleanup_interval_secs => return 0,
                None => {
                    *last = Some(now);
                    return 0;
                }
                Some(_) => *last = Some(now),
            }
        }
        self.evict_idle(now)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}
