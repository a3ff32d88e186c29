//! # Parse Context
//!
//! State of one in-flight parse and the backtracking protocol.
//!
//! Every grammar node runs through [`ParseContext::attempt`], which:
//!
//! 1. stops early if the parse was cancelled or nested too deep,
//! 2. remembers the cursor and the undo journal position,
//! 3. runs the node,
//! 4. on failure puts the cursor back and rolls the journal back, undoing
//!    every capture the node and its descendants made.
//!
//! Composition therefore never leaks partial state from a failed branch.

use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::journal::Journal;
use crate::sink::Sink;
use crate::source::Source;
use crate::trace::{truncate_label, Outcome, Trace, TraceEvent};
use config::constants::{
    is_whitespace, MAX_ATTEMPT_DEPTH, SNIPPET_RADIUS, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use stacker::maybe_grow;
use std::sync::Arc;
use tracing::{event, span, Level};

// =============================================================================
// OPTIONS
// =============================================================================

/// Shared switch another thread can flip to stop a parse.
///
/// A cancelled parse unwinds as if every remaining attempt failed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that is not yet raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clears a previous request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Settings for one parse.
///
/// ## Example
///
/// ```rust
/// use grammar::{CancelFlag, ParseOptions};
///
/// let options = ParseOptions::default()
///     .with_trace(true)
///     .with_cancel(CancelFlag::new())
///     .with_max_depth(64);
/// assert!(options.trace());
/// assert_eq!(options.max_depth(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    trace: bool,
    cancel: Option<CancelFlag>,
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trace: false,
            cancel: None,
            max_depth: MAX_ATTEMPT_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Collects a diagnostic [`Trace`] when `enabled`.
    #[must_use]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Stops the parse once `flag` is raised.
    #[must_use]
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Maximum nesting of attempts before the parse fails with
    /// [`GrammarError::RecursionLimit`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a trace is collected.
    pub fn trace(&self) -> bool {
        self.trace
    }

    /// Configured attempt nesting limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

// =============================================================================
// PARSE CONTEXT
// =============================================================================

/// Mutable state threaded through every attempt of a single parse.
///
/// Grammar nodes and [`Production`](crate::Production) implementations read
/// and move the cursor through the context and write captures with
/// [`ParseContext::save`], which makes them undoable.
pub struct ParseContext<'s> {
    source: &'s mut dyn Source,
    journal: Journal,
    trace: Option<Trace>,
    cancel: Option<CancelFlag>,
    cancelled: bool,
    depth: usize,
    max_depth: usize,
    furthest: Cursor,
}

impl<'s> ParseContext<'s> {
    /// Starts a parse of `source` at its current cursor.
    pub fn new(source: &'s mut dyn Source, options: ParseOptions) -> Self {
        let furthest = source.cursor();
        Self {
            source,
            journal: Journal::new(),
            trace: options.trace.then(Trace::new),
            cancel: options.cancel,
            cancelled: false,
            depth: 0,
            max_depth: options.max_depth,
            furthest,
        }
    }

    // -------------------------------------------------------------------------
    // Cursor access
    // -------------------------------------------------------------------------

    /// Character under the cursor, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.source.peek()
    }

    /// Moves one character forward.
    pub fn advance(&mut self) {
        self.source.advance();
        let cursor = self.source.cursor();
        if cursor > self.furthest {
            self.furthest = cursor;
        }
    }

    /// Returns true once the input is consumed.
    pub fn is_at_end(&self) -> bool {
        self.source.is_at_end()
    }

    /// Current position.
    pub fn cursor(&self) -> Cursor {
        self.source.cursor()
    }

    /// Moves the cursor to a position obtained from [`ParseContext::cursor`].
    pub fn restore(&mut self, cursor: Cursor) {
        self.source.restore(cursor);
    }

    /// Consumes a run of whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    /// Raw source text between two cursors.
    pub fn slice(&self, from: Cursor, to: Cursor) -> &str {
        self.source.slice(from, to)
    }

    /// Text around the cursor, for diagnostics.
    pub fn snippet(&self) -> String {
        self.source.snippet(SNIPPET_RADIUS)
    }

    /// Furthest position any attempt reached.
    pub fn furthest(&self) -> Cursor {
        self.furthest
    }

    pub(crate) fn set_furthest(&mut self, cursor: Cursor) {
        self.furthest = cursor;
    }

    // -------------------------------------------------------------------------
    // Captures
    // -------------------------------------------------------------------------

    /// Writes `value` to `sink`, undone automatically if an enclosing
    /// attempt fails.
    pub fn save<T>(&mut self, sink: &Sink<T>, value: T)
    where
        T: Clone + fmt::Display + 'static,
    {
        sink.save(value, &mut self.journal);
    }

    /// Makes every capture so far permanent.
    pub fn commit(&mut self) {
        self.journal.commit();
    }

    // -------------------------------------------------------------------------
    // Backtracking protocol
    // -------------------------------------------------------------------------

    /// Runs `grammar` under the backtracking protocol.
    ///
    /// Returns `Ok(false)` with no observable effect if the grammar does not
    /// match.
    pub fn attempt(&mut self, grammar: &Grammar) -> Result<bool, GrammarError> {
        self.attempt_with(grammar, |ctx| grammar.match_in(ctx))
    }

    /// Runs an arbitrary matcher under the backtracking protocol.
    ///
    /// `label` names the matcher in traces and log events; it is only
    /// rendered when one of them is enabled.
    pub fn attempt_with<F>(&mut self, label: &dyn fmt::Display, run: F) -> Result<bool, GrammarError>
    where
        F: FnOnce(&mut Self) -> Result<bool, GrammarError>,
    {
        let result = self.transaction(label, |ctx| Ok(run(ctx)?.then_some(())))?;
        Ok(result.is_some())
    }

    /// Runs `run` under the backtracking protocol, keeping its value.
    ///
    /// `Ok(None)` means no match: the cursor and every capture are restored.
    pub fn transaction<T, F>(&mut self, label: &dyn fmt::Display, run: F) -> Result<Option<T>, GrammarError>
    where
        F: FnOnce(&mut Self) -> Result<Option<T>, GrammarError>,
    {
        if self.poll_cancelled() {
            return Ok(None);
        }
        if self.depth >= self.max_depth {
            let error = GrammarError::recursion_limit(self.max_depth, self.cursor());
            event!(Level::WARN, error = %error, "attempt rejected");
            return Err(error);
        }

        let start = self.cursor();
        let mark = self.journal.mark();
        self.note(label, Outcome::Attempt);
        self.depth += 1;
        let result = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            run(&mut *self)
        });
        self.depth -= 1;

        match &result {
            Ok(Some(_)) => self.note(label, Outcome::Matched),
            Ok(None) | Err(_) => {
                self.restore(start);
                self.journal.rollback(mark);
                self.note(label, Outcome::Failed);
            }
        }
        result
    }

    /// Returns true once cancellation was observed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn poll_cancelled(&mut self) -> bool {
        if !self.cancelled && self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            event!(Level::DEBUG, cursor = %self.cursor(), "parse cancelled");
            self.cancelled = true;
        }
        self.cancelled
    }

    /// Current attempt nesting.
    pub fn depth(&self) -> usize {
        self.depth
    }

    // -------------------------------------------------------------------------
    // Trace
    // -------------------------------------------------------------------------

    /// Collected trace, if enabled.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Removes the collected trace.
    pub fn take_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Suppresses trace events until [`ParseContext::unmute_trace`].
    pub fn mute_trace(&mut self) {
        if let Some(trace) = self.trace.as_mut() {
            trace.mute();
        }
    }

    /// Ends one [`ParseContext::mute_trace`].
    pub fn unmute_trace(&mut self) {
        if let Some(trace) = self.trace.as_mut() {
            trace.unmute();
        }
    }

    fn note(&mut self, label: &dyn fmt::Display, outcome: Outcome) {
        let cursor = self.cursor();
        event!(
            Level::TRACE,
            depth = self.depth,
            label = %label,
            outcome = ?outcome,
            offset = cursor.offset(),
            "attempt"
        );
        if self.trace.is_none() {
            return;
        }
        let event = TraceEvent {
            depth: self.depth,
            label: truncate_label(label.to_string()),
            outcome,
            cursor,
            context: self.snippet(),
        };
        if let Some(trace) = self.trace.as_mut() {
            trace.record(event);
        }
    }
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("cursor", &self.cursor())
            .field("depth", &self.depth)
            .field("journal", &self.journal)
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

// =============================================================================
// TOP-LEVEL PARSE
// =============================================================================

/// Result of a top-level [`parse`].
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Whether the grammar matched.
    pub matched: bool,
    /// Cursor after the parse (unchanged from the start when not matched).
    pub cursor: Cursor,
    /// Furthest position any attempt reached.
    pub furthest: Cursor,
    /// Text around [`ParseOutcome::furthest`].
    pub furthest_context: String,
    /// Whether cancellation stopped the parse.
    pub cancelled: bool,
    /// Diagnostic trail, when requested.
    pub trace: Option<Trace>,
}

/// Runs `grammar` once against `source`.
///
/// On a match, captures are committed and the source is left after the
/// matched text. Otherwise the source and every sink are as they were.
///
/// ## Example
///
/// ```rust
/// use grammar::{parse, Grammar, ParseOptions, Source, TextSource};
///
/// let greeting = Grammar::literal("hi") >> Grammar::char('!');
/// let mut source = TextSource::new("hi  !");
/// let outcome = parse(&greeting, &mut source, ParseOptions::default()).unwrap();
/// assert!(outcome.matched);
/// assert!(source.is_at_end());
/// ```
pub fn parse(
    grammar: &Grammar,
    source: &mut dyn Source,
    options: ParseOptions,
) -> Result<ParseOutcome, GrammarError> {
    let span = span!(Level::DEBUG, "parse", grammar = %grammar.label());
    let _guard = span.enter();

    let mut ctx = ParseContext::new(source, options);
    let matched = match ctx.attempt(grammar) {
        Ok(matched) => matched,
        Err(error) => {
            event!(Level::WARN, error = %error, "parse aborted");
            return Err(error);
        }
    };
    if matched {
        ctx.commit();
    }

    let furthest = ctx.furthest();
    let outcome = ParseOutcome {
        matched,
        cursor: ctx.cursor(),
        furthest,
        furthest_context: crate::source::snippet_at(ctx.source.text(), furthest.offset(), SNIPPET_RADIUS),
        cancelled: ctx.is_cancelled(),
        trace: ctx.take_trace(),
    };
    event!(
        Level::DEBUG,
        matched = outcome.matched,
        cursor = %outcome.cursor,
        furthest = %outcome.furthest,
        "parse finished"
    );
    Ok(outcome)
}

// =============================================================================
// TESTS
// =============================================================================
