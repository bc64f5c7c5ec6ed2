//! A session behind a mutex, for hosts that call in from arbitrary threads.
//!
//! Every entry point takes the lock and runs to completion, so `choose`
//! never interleaves with another call. `initialize` builds the new session
//! before touching the lock and swaps it in whole; if building fails, the
//! previous session stays in place.

use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::view::ViewSnapshot;

/// An internally synchronised slot holding at most one session.
#[derive(Debug)]
pub struct SessionHost {
    session: Mutex<Option<Engine>>,
}

impl Default for SessionHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHost {
    /// An empty host. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            session: parking_lot::const_mutex(None),
        }
    }

    /// Start a session with the default configuration and the given seed.
    pub fn initialize(&self, campaign: &str, character: &str, seed: u64) -> EngineResult<()> {
        self.initialize_with(campaign, character, EngineConfig::default().with_seed(seed))
    }

    /// Start a session with an explicit configuration, replacing any
    /// existing one.
    pub fn initialize_with(
        &self,
        campaign: &str,
        character: &str,
        config: EngineConfig,
    ) -> EngineResult<()> {
        let engine = Engine::from_json(campaign, character, config).inspect_err(|err| {
            tracing::warn!(error = %err, "initialize failed, keeping previous session");
        })?;
        let replaced = self.session.lock().replace(engine).is_some();
        tracing::info!(replaced, "session initialized");
        Ok(())
    }

    /// The current view as JSON.
    pub fn current_view(&self) -> EngineResult<String> {
        Ok(self.view()?.to_json()?)
    }

    /// The current view.
    pub fn view(&self) -> EngineResult<ViewSnapshot> {
        self.with_engine(Engine::current_view)
    }

    /// Take a visible choice.
    pub fn choose(&self, choice_id: &str) -> EngineResult<()> {
        let mut guard = self.session.lock();
        let engine = guard.as_mut().ok_or(EngineError::NotInitialized)?;
        engine.choose(choice_id)
    }

    /// Drop the session. Returns whether there was one.
    pub fn teardown(&self) -> bool {
        let had = self.session.lock().take().is_some();
        if had {
            tracing::info!("session torn down");
        }
        had
    }

    /// Whether a session is installed.
    pub fn is_initialized(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Run `f` against the session under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine) -> R) -> EngineResult<R> {
        let guard = self.session.lock();
        let engine = guard.as_ref().ok_or(EngineError::NotInitialized)?;
        Ok(f(engine))
    }
}
