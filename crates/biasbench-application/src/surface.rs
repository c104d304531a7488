//! Events emitted toward the presentation surface.

use biasbench_core::selection::Slot;
use serde::Serialize;

/// Side-effect requests the presentation layer should honor.
///
/// Delivered over an unbounded channel taken from the orchestrator; if no
/// receiver is attached the events are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// A channel revealed another character; its column should scroll to
    /// the bottom edge.
    ScrollToBottom { slot: Slot },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_tagged() {
        let event = SurfaceEvent::ScrollToBottom { slot: Slot::B };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "scroll_to_bottom");
        assert_eq!(json["slot"], "b");
    }
}
