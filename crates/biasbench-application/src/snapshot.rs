//! Read-only session snapshot for the presentation boundary.

use biasbench_core::audit::{AuditSession, AuditStatus};
use biasbench_core::selection::{ModelSelection, SELECTION_ARITY};
use biasbench_core::verdict::VerdictRecord;
use serde::Serialize;

/// What one model column should render right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnapshot {
    /// Text currently visible (revealed prefix while streaming, full
    /// text otherwise)
    pub text: String,
    /// Whether the typing cursor should be shown
    pub cursor_visible: bool,
}

/// An all-or-nothing view of the current session.
///
/// Captured under the session lock, so it always reflects a fully applied
/// transition. The verdict is withheld until the session is Complete; that
/// is the gate the verdict panel renders against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: AuditStatus,
    pub prompt: String,
    pub selection: ModelSelection,
    pub channels: [ChannelSnapshot; SELECTION_ARITY],
    pub verdict: Option<VerdictRecord>,
}

impl SessionSnapshot {
    /// Captures the presentation view of a session.
    pub fn capture(session: &AuditSession) -> Self {
        let revealing = session.status == AuditStatus::Revealing;
        let channels = std::array::from_fn(|i| {
            let channel = &session.channels[i];
            ChannelSnapshot {
                text: channel.visible_text(revealing).to_string(),
                cursor_visible: revealing && channel.cursor_visible(),
            }
        });
        Self {
            status: session.status,
            prompt: session.prompt.clone(),
            selection: session.selection.clone(),
            channels,
            verdict: if session.status == AuditStatus::Complete {
                session.verdict.clone()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biasbench_core::resolver::{FallbackResolver, RawAuditResult};

    fn revealing_session(texts: [&str; 3]) -> AuditSession {
        let selection = ModelSelection::default();
        let raw = RawAuditResult {
            responses: selection
                .ids()
                .iter()
                .zip(texts)
                .map(|(id, t)| (id.clone(), serde_json::Value::String(t.to_string())))
                .collect(),
            verdict: None,
        };
        let resolved = FallbackResolver::resolve(&selection, &raw);
        let mut session = AuditSession::dispatching("q", selection);
        session.begin_reveal(resolved, Some(VerdictRecord::default()), None);
        session
    }

    #[test]
    fn test_prefix_and_cursor_while_revealing() {
        let mut session = revealing_session(["alpha", "beta", "gamma"]);
        session.channels[0].advance();
        session.channels[0].advance();
        let snapshot = SessionSnapshot::capture(&session);
        assert_eq!(snapshot.channels[0].text, "al");
        assert!(snapshot.channels[0].cursor_visible);
        assert_eq!(snapshot.channels[1].text, "");
    }

    #[test]
    fn test_full_text_once_complete() {
        let mut session = revealing_session(["alpha", "beta", "gamma"]);
        session.channels[0].advance();
        session.complete();
        let snapshot = SessionSnapshot::capture(&session);
        assert_eq!(snapshot.channels[0].text, "alpha");
        assert!(!snapshot.channels[0].cursor_visible);
    }

    #[test]
    fn test_verdict_withheld_until_complete() {
        let mut session = revealing_session(["a", "b", "c"]);
        assert!(SessionSnapshot::capture(&session).verdict.is_none());
        session.complete();
        assert!(SessionSnapshot::capture(&session).verdict.is_some());
    }
}
