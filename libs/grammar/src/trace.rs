//! # Diagnostic Trace
//!
//! Optional trail of grammar attempts, collected by the parse context when
//! enabled through [`ParseOptions::with_trace`](crate::ParseOptions::with_trace).
//!
//! The trail is informational only and never changes a parse result. It
//! renders as indented text, one line per event:
//!
//! ```text
//! ? ("a" | "b") @ line 1, column 1 [|b]
//!   ? "a" @ line 1, column 1 [|b]
//!   - "a" @ line 1, column 1 [|b]
//!   ? "b" @ line 1, column 1 [|b]
//!   + "b" @ line 1, column 2 [b|]
//! + ("a" | "b") @ line 1, column 2 [b|]
//! ```

use crate::cursor::Cursor;
use config::constants::{TRACE_INDENT, TRACE_LABEL_WIDTH};
use std::fmt;

/// What happened to an attempted node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The node is about to run.
    Attempt,
    /// The node matched.
    Matched,
    /// The node failed and its effects were rolled back.
    Failed,
}

impl Outcome {
    fn marker(self) -> char {
        match self {
            Outcome::Attempt => '?',
            Outcome::Matched => '+',
            Outcome::Failed => '-',
        }
    }
}

/// One line of the trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Nesting depth of the attempt (0 for the outermost).
    pub depth: usize,
    /// Label of the attempted node.
    pub label: String,
    /// What happened.
    pub outcome: Outcome,
    /// Cursor after the event.
    pub cursor: Cursor,
    /// Text around the cursor.
    pub context: String,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:indent$}{} {} @ {} [{}]",
            "",
            self.outcome.marker(),
            self.label,
            self.cursor,
            self.context,
            indent = self.depth * TRACE_INDENT
        )
    }
}

/// Collected trail of attempts.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
    muted: usize,
}

impl Trace {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event unless the trail is muted.
    pub fn record(&mut self, event: TraceEvent) {
        if self.muted == 0 {
            self.events.push(event);
        }
    }

    /// Suppresses events until the matching [`Trace::unmute`].
    ///
    /// Mutes nest.
    pub fn mute(&mut self) {
        self.muted += 1;
    }

    /// Ends one [`Trace::mute`].
    pub fn unmute(&mut self) {
        self.muted = self.muted.saturating_sub(1);
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given outcome.
    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |event| event.outcome == outcome)
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

/// Cuts `label` to [`TRACE_LABEL_WIDTH`] characters, ending in `...` when
/// shortened.
pub(crate) fn truncate_label(label: String) -> String {
    if label.chars().count() <= TRACE_LABEL_WIDTH {
        return label;
    }
    let mut short: String = label.chars().take(TRACE_LABEL_WIDTH - 3).collect();
    short.push_str("...");
    short
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn event(depth: usize, outcome: Outcome) -> TraceEvent {
        TraceEvent {
            depth,
            label: "'a'".to_string(),
            outcome,
            cursor: Cursor::start(),
            context: "|a".to_string(),
        }
    }

    #[test]
    fn test_event_display_indents() {
        let line = event(2, Outcome::Matched).to_string();
        assert_eq!(line, "    + 'a' @ line 1, column 1 [|a]");
    }

    #[test]
    fn test_muted_trace_drops_events() {
        let mut trace = Trace::new();
        trace.record(event(0, Outcome::Attempt));
        trace.mute();
        trace.mute();
        trace.record(event(1, Outcome::Attempt));
        trace.unmute();
        trace.record(event(1, Outcome::Failed));
        trace.unmute();
        trace.record(event(0, Outcome::Matched));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.with_outcome(Outcome::Matched).count(), 1);
    }

    #[test]
    fn test_truncate_label() {
        let long = "x".repeat(TRACE_LABEL_WIDTH + 10);
        let short = truncate_label(long);
        assert_eq!(short.chars().count(), TRACE_LABEL_WIDTH);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_label("ab".to_string()), "ab");
    }

    #[test]
    fn test_trace_renders_one_line_per_event() {
        let mut trace = Trace::new();
        trace.record(event(0, Outcome::Attempt));
        trace.record(event(0, Outcome::Failed));
        assert_eq!(trace.to_string().lines().count(), 2);
    }
}
