use crate::Loader;
use crate::error::{ErrorKind, Result};
use derive_more::Display;
use mushaf_index::Corpus;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::instrument;

/// Coarse lifecycle of a [`Store`].
#[derive(Debug, Display, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    #[display("idle")]
    Idle,
    #[display("loading")]
    Loading,
    #[display("loaded")]
    Loaded,
    /// The last attempt failed; the message is the top-level error.
    #[display("failed: {_0}")]
    Failed(String),
}

/// Owns the corpus once loaded, and the state of getting there.
///
/// At most one load runs at a time. Once loaded, the corpus is immutable and
/// shared by [`Arc`]; readers need no further synchronization.
pub struct Store {
    loader: Loader,
    state: watch::Sender<State>,
    corpus: OnceLock<Arc<Corpus>>,
}

impl Store {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            state: watch::Sender::new(State::Idle),
            corpus: OnceLock::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.borrow(), State::Loaded)
    }

    /// Receive every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    /// The corpus, if a load has completed.
    pub fn corpus(&self) -> Option<Arc<Corpus>> {
        self.corpus.get().cloned()
    }

    /// Load the corpus, or return it if already loaded.
    ///
    /// # Errors
    ///
    /// [`AlreadyLoading`](ErrorKind::AlreadyLoading) if another call is in
    /// flight; otherwise whatever [`Loader::load`] reports. A failed store can
    /// be loaded again.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Arc<Corpus>> {
        if let Some(corpus) = self.corpus() {
            return Ok(corpus);
        }
        let claimed = self.state.send_if_modified(|state| match state {
            State::Idle | State::Failed(_) => {
                *state = State::Loading;
                true
            },
            State::Loading | State::Loaded => false,
        });
        if !claimed {
            // Lost a race with a load that has just finished.
            if let Some(corpus) = self.corpus() {
                return Ok(corpus);
            }
            tracing::warn!("Rejected load while another is in flight");
            exn::bail!(ErrorKind::AlreadyLoading);
        }
        tracing::info!("Loading corpus");

        let flight = InFlight { state: &self.state, done: false };
        match self.loader.load().await {
            Ok(corpus) => {
                let corpus = Arc::clone(self.corpus.get_or_init(|| Arc::new(corpus)));
                flight.finish(State::Loaded);
                tracing::info!(verses = corpus.verses().len(), pages = corpus.pages().len(), "Corpus loaded");
                Ok(corpus)
            },
            Err(err) => {
                let message = (*err).to_string();
                tracing::warn!(error = %message, "Corpus failed to load");
                flight.finish(State::Failed(message));
                Err(err)
            },
        }
    }
}

/// Marks the store failed if the load future is dropped before finishing.
struct InFlight<'a> {
    state: &'a watch::Sender<State>,
    done: bool,
}
impl InFlight<'_> {
    fn finish(mut self, state: State) {
        self.done = true;
        self.state.send_replace(state);
    }
}
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            tracing::warn!("Corpus load cancelled");
            self.state.send_replace(State::Failed("load cancelled".to_string()));
        }
    }
}
