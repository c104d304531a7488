//! Audit session orchestrator and state machine.
//!
//! `AuditOrchestrator` owns the single current session behind one lock and
//! is its only writer. Every scheduled continuation (inference completion,
//! reveal tick, verdict timer) carries the generation it was created under
//! and re-validates it before touching state, so work belonging to a
//! superseded session is discarded instead of corrupting the new one.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use biasbench_core::audit::session::BACKEND_FAILURE_TEXT;
use biasbench_core::audit::{AuditSession, AuditStatus};
use biasbench_core::catalog::ModelCatalog;
use biasbench_core::collaborator::InferenceBackend;
use biasbench_core::config::BiasBenchConfig;
use biasbench_core::history::HistoryEntry;
use biasbench_core::resolver::FallbackResolver;
use biasbench_core::selection::{ModelSelection, Slot};
use tokio::sync::{RwLock, mpsc};
use tokio_util::sync::CancellationToken;

use crate::replay::HistoryReplayAdapter;
use crate::reveal::RevealChannel;
use crate::snapshot::SessionSnapshot;
use crate::surface::SurfaceEvent;

/// The one mutable shared state: the current session, its generation, and
/// the token every piece of scheduled work for that generation listens on.
pub(crate) struct CurrentSession {
    pub(crate) session: AuditSession,
    pub(crate) generation: u64,
    pub(crate) cancel: CancellationToken,
}

/// Coordinates the audit lifecycle: Idle → Dispatching → Revealing →
/// Complete, with Failed as the collaborator-failure branch.
///
/// Presentation hosts call the operations below and render `snapshot()`;
/// no error ever crosses this boundary — every failure mode resolves to a
/// renderable state.
pub struct AuditOrchestrator {
    /// Single-writer session state
    state: Arc<RwLock<CurrentSession>>,
    /// External inference collaborator
    backend: Arc<dyn InferenceBackend>,
    /// Endpoint and pacing configuration
    config: BiasBenchConfig,
    /// Sender side of the surface event channel
    events: mpsc::UnboundedSender<SurfaceEvent>,
    /// Receiver side, handed out once to the presentation host
    event_rx: StdMutex<Option<mpsc::UnboundedReceiver<SurfaceEvent>>>,
}

impl AuditOrchestrator {
    /// Creates an orchestrator in the Idle state.
    pub fn new(backend: Arc<dyn InferenceBackend>, config: BiasBenchConfig) -> Self {
        let (events, event_rx) = mpsc::unbounded_channel();
        Self {
            state: Arc::new(RwLock::new(CurrentSession {
                session: AuditSession::idle(),
                generation: 0,
                cancel: CancellationToken::new(),
            })),
            backend,
            config,
            events,
            event_rx: StdMutex::new(Some(event_rx)),
        }
    }

    /// Takes the surface event receiver. Returns `None` after the first call.
    pub fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<SurfaceEvent>> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|mut receiver| receiver.take())
    }

    /// Captures the current presentation snapshot.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.state.read().await;
        SessionSnapshot::capture(&guard.session)
    }

    /// Starts a new audit.
    ///
    /// A whitespace-only prompt is rejected before any state transition.
    /// Otherwise the previous session's pending work is cancelled and a
    /// fresh Dispatching session replaces it atomically; the inference call
    /// runs in the background and its completion is discarded if yet
    /// another session supersedes it first.
    pub async fn start_audit(&self, prompt: &str, selection: ModelSelection) {
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            tracing::warn!("[AuditOrchestrator] Ignoring audit with empty prompt");
            return;
        }

        let next = AuditSession::dispatching(prompt.clone(), selection.clone());
        let (generation, cancel) = self.supersede(next).await;
        tracing::info!(
            "[AuditOrchestrator] Dispatching audit (generation {})",
            generation
        );

        let state = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);
        let reveal = self.config.reveal.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("[AuditOrchestrator] Dispatch superseded before completion");
                    return;
                }
                result = backend.run_audit(&prompt, &selection) => result,
            };

            let mut guard = state.write().await;
            if guard.generation != generation {
                tracing::debug!("[AuditOrchestrator] Discarding stale audit response");
                return;
            }
            match result {
                Ok(raw) => {
                    let resolved = FallbackResolver::resolve(&selection, &raw);
                    let budget = reveal.verdict_budget(resolved.max_char_len());
                    guard
                        .session
                        .begin_reveal(resolved, raw.verdict, Some(deadline_timestamp(budget)));
                    drop(guard);

                    for slot in Slot::ALL {
                        RevealChannel::spawn(
                            Arc::clone(&state),
                            generation,
                            cancel.clone(),
                            slot,
                            reveal.clone(),
                            events.clone(),
                        );
                    }
                    spawn_verdict_timer(state, generation, cancel, budget);
                }
                Err(err) => {
                    tracing::warn!("[AuditOrchestrator] Audit dispatch failed: {}", err);
                    guard.session.fail(BACKEND_FAILURE_TEXT);
                }
            }
        });
    }

    /// Replaces the current session with a replay of a history entry.
    ///
    /// Reaches Complete directly from any state, with all pending work of
    /// the previous session cancelled and zero ticks scheduled.
    pub async fn load_history(&self, entry: &HistoryEntry) {
        let session = HistoryReplayAdapter::to_session(entry);
        self.supersede(session).await;
        tracing::info!("[AuditOrchestrator] Loaded history entry {}", entry.id);
    }

    /// Resets to a fresh Idle session with the default selection.
    pub async fn new_audit(&self) {
        self.supersede(AuditSession::idle()).await;
        tracing::info!("[AuditOrchestrator] Session reset");
    }

    /// Changes one slot's model while Idle.
    ///
    /// Returns whether the change was applied; the selection is frozen in
    /// every other state and unknown ids are rejected.
    pub async fn update_selection(&self, slot: Slot, model_id: &str) -> bool {
        let mut guard = self.state.write().await;
        if guard.session.status != AuditStatus::Idle {
            tracing::warn!("[AuditOrchestrator] Selection is frozen outside Idle");
            return false;
        }
        if !ModelCatalog::global().contains(model_id) {
            tracing::warn!("[AuditOrchestrator] Unknown model id '{}'", model_id);
            return false;
        }
        guard.session.selection.set(slot, model_id);
        true
    }

    /// Atomically replaces the current session.
    ///
    /// Cancelling the old token, bumping the generation, and installing the
    /// new session happen under one write guard, so readers and stale
    /// callbacks can never observe the replacement half-applied.
    async fn supersede(&self, next: AuditSession) -> (u64, CancellationToken) {
        let mut guard = self.state.write().await;
        guard.cancel.cancel();
        guard.generation += 1;
        guard.cancel = CancellationToken::new();
        guard.session = next;
        (guard.generation, guard.cancel.clone())
    }
}

/// Estimated wall-clock reveal finish time, for display purposes only; the
/// authoritative gate is the verdict timer below.
fn deadline_timestamp(budget: Duration) -> String {
    (chrono::Utc::now() + chrono::Duration::milliseconds(budget.as_millis() as i64)).to_rfc3339()
}

/// Arms the single timer that gates the verdict panel.
///
/// The deadline is an estimate derived from the longest resolved text, not
/// a join over the channels: the session completes when the budget elapses
/// even if some channel still has characters left.
fn spawn_verdict_timer(
    state: Arc<RwLock<CurrentSession>>,
    generation: u64,
    cancel: CancellationToken,
    budget: Duration,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(budget) => {}
        }
        let mut guard = state.write().await;
        if guard.generation != generation || guard.session.status != AuditStatus::Revealing {
            return;
        }
        guard.session.complete();
        tracing::info!("[AuditOrchestrator] Reveal deadline reached; session complete");
        drop(guard);
        // Any tick past this point would be invisible; stop the channels.
        cancel.cancel();
    });
}
