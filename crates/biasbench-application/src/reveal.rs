//! Per-slot streaming reveal channel.
//!
//! Each channel is one tokio task that paces the character reveal of a
//! single model column. Channels race independently; the only state they
//! share is the session behind its lock, and every tick re-validates the
//! session generation before mutating so a superseded channel can never
//! resurrect an old reveal.

use std::sync::Arc;
use std::time::Duration;

use biasbench_core::audit::AuditStatus;
use biasbench_core::config::RevealConfig;
use biasbench_core::selection::Slot;
use rand::Rng;
use tokio::sync::{RwLock, mpsc};
use tokio_util::sync::CancellationToken;

use crate::orchestrator::CurrentSession;
use crate::surface::SurfaceEvent;

pub(crate) struct RevealChannel {
    state: Arc<RwLock<CurrentSession>>,
    generation: u64,
    cancel: CancellationToken,
    slot: Slot,
    tuning: RevealConfig,
    events: mpsc::UnboundedSender<SurfaceEvent>,
}

impl RevealChannel {
    /// Spawns the tick task for one slot of the given session generation.
    pub(crate) fn spawn(
        state: Arc<RwLock<CurrentSession>>,
        generation: u64,
        cancel: CancellationToken,
        slot: Slot,
        tuning: RevealConfig,
        events: mpsc::UnboundedSender<SurfaceEvent>,
    ) -> tokio::task::JoinHandle<()> {
        let channel = Self {
            state,
            generation,
            cancel,
            slot,
            tuning,
            events,
        };
        tokio::spawn(channel.run())
    }

    async fn run(self) {
        {
            let guard = self.state.read().await;
            let stale = guard.generation != self.generation
                || guard.session.status != AuditStatus::Revealing;
            // Empty text is immediately terminal: nothing to tick.
            if stale || !guard.session.channels[self.slot.index()].is_active() {
                return;
            }
        }

        let range = self.tuning.tick_range_ms();
        loop {
            let delay = Duration::from_millis(rand::thread_rng().gen_range(range.clone()));
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            let mut guard = self.state.write().await;
            if guard.generation != self.generation
                || guard.session.status != AuditStatus::Revealing
            {
                return;
            }
            let channel = &mut guard.session.channels[self.slot.index()];
            let advanced = channel.advance();
            let exhausted = !channel.is_active();
            drop(guard);

            if advanced {
                let _ = self
                    .events
                    .send(SurfaceEvent::ScrollToBottom { slot: self.slot });
            }
            if exhausted {
                return;
            }
        }
    }
}
