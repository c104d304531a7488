//! Audit session orchestration for BiasBench.
//!
//! Coordinates one audit session at a time: dispatching the prompt to the
//! inference collaborator, pacing the per-model character reveals, gating
//! the verdict on the estimated reveal deadline, and replaying persisted
//! history without any streaming.

pub mod orchestrator;
pub mod replay;
mod reveal;
pub mod snapshot;
pub mod surface;

pub use orchestrator::AuditOrchestrator;
pub use replay::HistoryReplayAdapter;
pub use snapshot::{ChannelSnapshot, SessionSnapshot};
pub use surface::SurfaceEvent;
