/// Session Controller - Event Loop
///
/// **Responsibility:**
/// Feed user events and network completions into the `Session` one at a
/// time and push the resulting view updates to a `Surface`.
///
/// **Architecture:**
/// 1. Catalog load runs as a spawned task, its result comes back as an event
/// 2. Each submission runs as a spawned judge call, tagged with its practice
/// 3. The loop never blocks on the network; it only waits for the next event
///
/// Judge calls are never cancelled. A late answer for a practice that is no
/// longer selected is dropped by the session. A call that panics comes back
/// as a failed completion, so the drain always ends.

use practice_common::types::{Catalog, Identifier, ResultSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, instrument};

use crate::backend::Backend;
use crate::catalog::CatalogLoader;
use crate::error::{BackendError, SessionError};
use crate::session::{Session, Submission, ViewUpdate};

/// User input consumed by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Select(Identifier),
    EditCode(String),
    Submit,
    ShowAnswers(bool),
}

/// Anything that can display view updates
pub trait Surface {
    fn apply(&mut self, update: &ViewUpdate);
}

impl Surface for mpsc::UnboundedSender<ViewUpdate> {
    fn apply(&mut self, update: &ViewUpdate) {
        // Receiver gone means nobody is watching anymore
        let _ = self.send(update.clone());
    }
}

impl Surface for Vec<ViewUpdate> {
    fn apply(&mut self, update: &ViewUpdate) {
        self.push(update.clone());
    }
}

enum Completion {
    Catalog(Result<Catalog, SessionError>),
    Judge(Submission, Result<ResultSet, SessionError>),
}

pub struct Controller<B> {
    backend: Arc<B>,
    session: Session,
}

impl<B: Backend + 'static> Controller<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            session: Session::new(),
        }
    }

    /// Run until `events` is closed and nothing is in flight
    ///
    /// Returns the final session state.
    #[instrument(skip_all)]
    pub async fn run<S: Surface + ?Sized>(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        surface: &mut S,
    ) -> Session {
        let mut tasks = JoinSet::new();
        let mut events_open = true;

        self.spawn_catalog_load(&mut tasks);

        while events_open || !tasks.is_empty() {
            tokio::select! {
                // User input first, completions wait their turn
                biased;

                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event, &mut tasks, surface),
                    None => {
                        events_open = false;
                        debug!(in_flight = tasks.len(), "Input closed, draining");
                    }
                },
                Some(joined) = tasks.join_next() => match joined {
                    Ok(completion) => self.handle_completion(completion, surface),
                    Err(e) => error!(error = %e, "Completion task failed"),
                },
            }
        }

        info!("Session finished");
        self.session
    }

    fn spawn_catalog_load(&self, tasks: &mut JoinSet<Completion>) {
        let backend = Arc::clone(&self.backend);

        tasks.spawn(async move {
            let outcome = contained(async move { CatalogLoader::load(&*backend).await })
                .await
                .unwrap_or_else(|e| Err(SessionError::LoadFailure(BackendError::Interrupted(e))));
            Completion::Catalog(outcome)
        });
    }

    fn spawn_judge(&self, submission: Submission, tasks: &mut JoinSet<Completion>) {
        let backend = Arc::clone(&self.backend);
        let request = submission.request.clone();

        tasks.spawn(async move {
            let outcome = contained(async move { backend.judge(&request).await })
                .await
                .unwrap_or_else(|e| Err(BackendError::Interrupted(e)))
                .map_err(|source| SessionError::SubmissionFailure {
                    submission: submission.id,
                    practice: submission.practice_id().clone(),
                    source,
                });
            Completion::Judge(submission, outcome)
        });
    }

    fn handle_event<S: Surface + ?Sized>(
        &mut self,
        event: SessionEvent,
        tasks: &mut JoinSet<Completion>,
        surface: &mut S,
    ) {
        let updates = match event {
            SessionEvent::Select(id) => self.session.on_select(&id).unwrap_or_default(),
            SessionEvent::EditCode(code) => {
                self.session.set_code(code);
                Vec::new()
            }
            SessionEvent::Submit => {
                if let Some(submission) = self.session.submit() {
                    self.spawn_judge(submission, tasks);
                }
                Vec::new()
            }
            SessionEvent::ShowAnswers(visible) => self.session.set_answers_visible(visible),
        };

        publish(surface, &updates);
    }

    fn handle_completion<S: Surface + ?Sized>(&mut self, completion: Completion, surface: &mut S) {
        let updates = match completion {
            Completion::Catalog(outcome) => self.session.on_catalog_loaded(outcome),
            Completion::Judge(submission, outcome) => {
                self.session.on_judge_response(&submission, outcome)
            }
        };

        publish(surface, &updates);
    }
}

/// Run `call` on its own task so a panic surfaces as a `JoinError`
async fn contained<T, F>(call: F) -> Result<T, JoinError>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    tokio::spawn(call).await
}

fn publish<S: Surface + ?Sized>(surface: &mut S, updates: &[ViewUpdate]) {
    for update in updates {
        surface.apply(update);
    }
}
