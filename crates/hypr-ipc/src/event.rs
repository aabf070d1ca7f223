//! Event line framing
//!
//! Every line on the event socket has the form `<kind>>><tail>`. The kind is
//! everything before the first `>>`; the tail is everything after it and is
//! only split further by the [`codec`](crate::codec) once the kind's shape is
//! known.

use chrono::{DateTime, Local};
use tokio_util::sync::CancellationToken;

use crate::catalog::EventKind;
use crate::HyprError;

/// Separator between the event kind and its arguments
pub const EVENT_SEPARATOR: &str = ">>";

/// One received event line, framed but not yet decoded
///
/// Created once per line and handed by reference to every registered
/// callback and observer method during dispatch.
#[derive(Debug, Clone)]
pub struct EventContext {
    raw: String,
    kind_end: usize,
    received_at: DateTime<Local>,
    cancellation: CancellationToken,
}

impl EventContext {
    /// Split a raw line into kind and tail
    ///
    /// The capture timestamp is taken here, not when the line was read from
    /// the socket.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::MalformedEvent` if the line has no `>>` separator.
    pub fn parse(line: &str) -> Result<Self, HyprError> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let kind_end = line
            .find(EVENT_SEPARATOR)
            .ok_or_else(|| HyprError::MalformedEvent {
                line: line.to_string(),
            })?;

        Ok(Self {
            raw: line.to_string(),
            kind_end,
            received_at: Local::now(),
            cancellation: CancellationToken::new(),
        })
    }

    /// Attach the cancellation token of the listening session
    pub(crate) fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// The complete line as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The kind token, verbatim
    pub fn kind(&self) -> &str {
        &self.raw[..self.kind_end]
    }

    /// Catalog entry for the kind token, if it is a known kind
    pub fn known_kind(&self) -> Option<EventKind> {
        EventKind::from_name(self.kind())
    }

    /// Everything after the first `>>`
    pub fn data(&self) -> &str {
        &self.raw[self.kind_end + EVENT_SEPARATOR.len()..]
    }

    /// Wall-clock time at which the line was framed
    pub fn received_at(&self) -> DateTime<Local> {
        self.received_at
    }

    /// Cancellation token of the `listen` call that produced this event
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Whether the listening session has been asked to stop
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_separator() {
        let ctx = EventContext::parse("workspacev2>>3,coding").unwrap();
        assert_eq!(ctx.kind(), "workspacev2");
        assert_eq!(ctx.data(), "3,coding");
        assert_eq!(ctx.raw(), "workspacev2>>3,coding");
        assert_eq!(ctx.known_kind(), Some(EventKind::WorkspaceV2));
    }

    #[test]
    fn test_parse_only_splits_once() {
        let ctx = EventContext::parse("windowtitlev2>>abc,a >> b").unwrap();
        assert_eq!(ctx.kind(), "windowtitlev2");
        assert_eq!(ctx.data(), "abc,a >> b");
    }

    #[test]
    fn test_parse_empty_tail() {
        let ctx = EventContext::parse("configreloaded>>").unwrap();
        assert_eq!(ctx.kind(), "configreloaded");
        assert_eq!(ctx.data(), "");
    }

    #[test]
    fn test_parse_kind_is_not_normalized() {
        let ctx = EventContext::parse(" Workspace>>1").unwrap();
        assert_eq!(ctx.kind(), " Workspace");
        assert_eq!(ctx.known_kind(), None);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let ctx = EventContext::parse("myplugin>>foo,bar").unwrap();
        assert_eq!(ctx.kind(), "myplugin");
        assert_eq!(ctx.known_kind(), None);
        assert_eq!(ctx.data(), "foo,bar");
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let ctx = EventContext::parse("submap>>resize\r").unwrap();
        assert_eq!(ctx.data(), "resize");
    }

    #[test]
    fn test_parse_missing_separator() {
        for line in ["workspace", "", "workspace>3", "workspace> >3"] {
            match EventContext::parse(line) {
                Err(HyprError::MalformedEvent { line: l }) => assert_eq!(l, line),
                other => panic!("Expected MalformedEvent for {:?}, got: {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_parse_stamps_time() {
        let before = Local::now();
        let ctx = EventContext::parse("bell>>").unwrap();
        let after = Local::now();
        assert!(ctx.received_at() >= before && ctx.received_at() <= after);
    }

    #[test]
    fn test_cancellation_is_inherited() {
        let token = CancellationToken::new();
        let ctx = EventContext::parse("bell>>")
            .unwrap()
            .with_cancellation(token.clone());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
