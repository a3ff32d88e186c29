//! # Capture Sinks
//!
//! Destinations for values recognised by grammar nodes.
//!
//! A sink is one of a fixed set of kinds:
//!
//! | Kind | On save |
//! |------|---------|
//! | [`Sink::Discard`] | nothing |
//! | [`Sink::Slot`] | overwrite the slot |
//! | [`Sink::Collect`] | append to the collection |
//! | [`Sink::Flag`] | set the flag |
//! | [`Sink::Text`] | append the value's text to a growing string |
//!
//! The destinations ([`Slot`], [`Collection`], [`Flag`], [`TextBuffer`]) are
//! cheap shared handles: the caller keeps one and hands a clone to the
//! grammar, then reads the captured values after the parse.
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Grammar, Slot, Sink};
//!
//! let word = Slot::new();
//! let grammar = Grammar::one_of("abc").one_or_more().save_text(Sink::slot(word.clone()));
//! assert!(grammar.parse_str("cab!").unwrap().matched);
//! assert_eq!(word.get().as_deref(), Some("cab"));
//! ```

use crate::journal::Journal;
use std::cell::{Cell, RefCell};
use std::fmt::{self, Write};
use std::rc::Rc;

// =============================================================================
// DESTINATIONS
// =============================================================================

/// Holds at most one captured value.
pub struct Slot<T>(Rc<RefCell<Option<T>>>);

impl<T> Slot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Removes and returns the value.
    pub fn take(&self) -> Option<T> {
        self.0.borrow_mut().take()
    }

    /// Replaces the value.
    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = Some(value);
    }

    /// Empties the slot.
    pub fn clear(&self) {
        *self.0.borrow_mut() = None;
    }

    /// Returns true if a value is held.
    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }
}

impl<T: Clone> Slot<T> {
    /// Copy of the value.
    pub fn get(&self) -> Option<T> {
        self.0.borrow().clone()
    }
}

/// Ordered list of captured values.
pub struct Collection<T>(Rc<RefCell<Vec<T>>>);

impl<T> Collection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Removes and returns every value.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Empties the collection.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl<T: Clone> Collection<T> {
    /// Copy of the values.
    pub fn to_vec(&self) -> Vec<T> {
        self.0.borrow().clone()
    }

    /// Copy of the most recent value.
    pub fn last(&self) -> Option<T> {
        self.0.borrow().last().cloned()
    }
}

/// Records whether something was saved.
#[derive(Clone, Default)]
pub struct Flag(Rc<Cell<bool>>);

impl Flag {
    /// Creates a lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once raised.
    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Lowers the flag.
    pub fn reset(&self) {
        self.0.set(false);
    }
}

/// Growing string fed one value at a time.
#[derive(Clone, Default)]
pub struct TextBuffer(Rc<RefCell<String>>);

impl TextBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the text.
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    /// Removes and returns the text.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Empties the buffer.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&*self.0.borrow()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Collection").field(&*self.0.borrow()).finish()
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flag").field(&self.get()).finish()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextBuffer").field(&*self.0.borrow()).finish()
    }
}

// =============================================================================
// SINK
// =============================================================================

/// Where a grammar node writes the value it recognised.
pub enum Sink<T> {
    /// Drops every value.
    Discard,
    /// Overwrites a [`Slot`].
    Slot(Slot<T>),
    /// Appends to a [`Collection`].
    Collect(Collection<T>),
    /// Raises a [`Flag`] on every save.
    Flag(Flag),
    /// Appends the value's display text to a [`TextBuffer`].
    Text(TextBuffer),
}

/// State of a sink's destination, enough to undo later saves.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkSnapshot<T> {
    /// Nothing to restore.
    Discard,
    /// Previous slot contents.
    Slot(Option<T>),
    /// Previous collection contents.
    Collection(Vec<T>),
    /// Previous flag state.
    Flag(bool),
    /// Previous text.
    Text(String),
}

impl<T> Sink<T> {
    /// Sink that drops values.
    pub fn discard() -> Self {
        Sink::Discard
    }

    /// Sink that overwrites `slot`.
    pub fn slot(slot: Slot<T>) -> Self {
        Sink::Slot(slot)
    }

    /// Sink that appends to `collection`.
    pub fn collect(collection: Collection<T>) -> Self {
        Sink::Collect(collection)
    }

    /// Sink that raises `flag`.
    pub fn flag(flag: Flag) -> Self {
        Sink::Flag(flag)
    }

    /// Sink that appends text to `buffer`.
    pub fn text(buffer: TextBuffer) -> Self {
        Sink::Text(buffer)
    }

    /// Returns true for [`Sink::Discard`].
    pub fn is_discard(&self) -> bool {
        matches!(self, Sink::Discard)
    }

    /// Short name of the sink kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Sink::Discard => "discard",
            Sink::Slot(_) => "slot",
            Sink::Collect(_) => "collect",
            Sink::Flag(_) => "flag",
            Sink::Text(_) => "text",
        }
    }
}

impl<T: Clone + fmt::Display + 'static> Sink<T> {
    /// Records a value, first logging in `journal` how to undo it.
    pub fn save(&self, value: T, journal: &mut Journal) {
        if self.is_discard() {
            return;
        }
        let snapshot = self.snapshot();
        let sink = self.clone();
        journal.record(move || sink.restore(snapshot));
        self.store(value);
    }

    /// Records a value without journaling it.
    pub fn store(&self, value: T) {
        match self {
            Sink::Discard => {}
            Sink::Slot(slot) => slot.set(value),
            Sink::Collect(collection) => collection.0.borrow_mut().push(value),
            Sink::Flag(flag) => flag.0.set(true),
            Sink::Text(buffer) => {
                // Writing into a String cannot fail.
                let _ = write!(buffer.0.borrow_mut(), "{value}");
            }
        }
    }

    /// Captures the destination's current state.
    pub fn snapshot(&self) -> SinkSnapshot<T> {
        match self {
            Sink::Discard => SinkSnapshot::Discard,
            Sink::Slot(slot) => SinkSnapshot::Slot(slot.get()),
            Sink::Collect(collection) => SinkSnapshot::Collection(collection.to_vec()),
            Sink::Flag(flag) => SinkSnapshot::Flag(flag.get()),
            Sink::Text(buffer) => SinkSnapshot::Text(buffer.get()),
        }
    }

    /// Puts the destination back into a state captured by [`Sink::snapshot`].
    ///
    /// The earlier contents come back exactly, even if the destination was
    /// drained with `take` or `clear` in between. A snapshot taken from a
    /// different kind of sink is ignored.
    pub fn restore(&self, snapshot: SinkSnapshot<T>) {
        match (self, snapshot) {
            (Sink::Slot(slot), SinkSnapshot::Slot(previous)) => {
                *slot.0.borrow_mut() = previous;
            }
            (Sink::Collect(collection), SinkSnapshot::Collection(previous)) => {
                *collection.0.borrow_mut() = previous;
            }
            (Sink::Flag(flag), SinkSnapshot::Flag(previous)) => flag.0.set(previous),
            (Sink::Text(buffer), SinkSnapshot::Text(previous)) => {
                *buffer.0.borrow_mut() = previous;
            }
            _ => {}
        }
    }

    /// Most recent value, for sinks that keep values.
    pub fn current_value(&self) -> Option<T> {
        match self {
            Sink::Slot(slot) => slot.get(),
            Sink::Collect(collection) => collection.last(),
            Sink::Discard | Sink::Flag(_) | Sink::Text(_) => None,
        }
    }
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        match self {
            Sink::Discard => Sink::Discard,
            Sink::Slot(slot) => Sink::Slot(slot.clone()),
            Sink::Collect(collection) => Sink::Collect(collection.clone()),
            Sink::Flag(flag) => Sink::Flag(flag.clone()),
            Sink::Text(buffer) => Sink::Text(buffer.clone()),
        }
    }
}

impl<T> Default for Sink<T> {
    fn default() -> Self {
        Sink::Discard
    }
}

impl<T> fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sink::{}", self.kind())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_overwrites() {
        let slot = Slot::new();
        let sink = Sink::slot(slot.clone());
        let mut journal = Journal::new();
        sink.save(1, &mut journal);
        sink.save(2, &mut journal);
        assert_eq!(slot.get(), Some(2));
        assert_eq!(sink.current_value(), Some(2));
    }

    #[test]
    fn test_slot_rollback_restores_previous() {
        let slot = Slot::new();
        slot.set('a');
        let sink = Sink::slot(slot.clone());
        let mut journal = Journal::new();
        let mark = journal.mark();
        sink.save('b', &mut journal);
        sink.save('c', &mut journal);
        journal.rollback(mark);
        assert_eq!(slot.get(), Some('a'));
    }

    #[test]
    fn test_collection_rollback_restores_contents() {
        let collection = Collection::new();
        let sink = Sink::collect(collection.clone());
        let mut journal = Journal::new();
        sink.save(1, &mut journal);
        let mark = journal.mark();
        for n in 2..10 {
            sink.save(n, &mut journal);
        }
        assert_eq!(collection.len(), 9);
        journal.rollback(mark);
        assert_eq!(collection.to_vec(), vec![1]);
    }

    #[test]
    fn test_flag_raised_and_undone() {
        let flag = Flag::new();
        let sink: Sink<String> = Sink::flag(flag.clone());
        let mut journal = Journal::new();
        let mark = journal.mark();
        sink.save("x".to_string(), &mut journal);
        assert!(flag.get());
        journal.rollback(mark);
        assert!(!flag.get());
    }

    #[test]
    fn test_text_appends_chars() {
        let buffer = TextBuffer::new();
        let sink = Sink::text(buffer.clone());
        let mut journal = Journal::new();
        let mark = journal.mark();
        for ch in "hey".chars() {
            sink.save(ch, &mut journal);
        }
        assert_eq!(buffer.get(), "hey");
        journal.rollback(mark);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_discard_records_nothing() {
        let sink: Sink<i32> = Sink::discard();
        let mut journal = Journal::new();
        sink.save(5, &mut journal);
        assert!(journal.is_empty());
        assert_eq!(sink.current_value(), None);
    }

    #[test]
    fn test_snapshot_restore_without_journal() {
        let collection = Collection::new();
        let sink = Sink::collect(collection.clone());
        sink.store("a".to_string());
        let snapshot = sink.snapshot();
        sink.store("b".to_string());
        sink.store("c".to_string());
        sink.restore(snapshot);
        assert_eq!(collection.to_vec(), vec!["a".to_string()]);
    }

    #[test]
    fn test_mismatched_snapshot_ignored() {
        let slot = Slot::new();
        slot.set(3);
        let sink = Sink::slot(slot.clone());
        sink.restore(SinkSnapshot::Collection(Vec::new()));
        assert_eq!(slot.get(), Some(3));
    }

    #[test]
    fn test_rollback_after_take_restores_collection() {
        let collection = Collection::new();
        collection.0.borrow_mut().extend([1, 2]);
        let sink = Sink::collect(collection.clone());
        let mut journal = Journal::new();
        let mark = journal.mark();
        sink.save(3, &mut journal);
        assert_eq!(collection.take(), vec![1, 2, 3]);
        sink.save(4, &mut journal);
        journal.rollback(mark);
        assert_eq!(collection.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_rollback_after_clear_restores_text() {
        let buffer = TextBuffer::new();
        let sink = Sink::text(buffer.clone());
        sink.store("abc".to_string());
        let mut journal = Journal::new();
        let mark = journal.mark();
        sink.save("d".to_string(), &mut journal);
        buffer.clear();
        sink.save("x".to_string(), &mut journal);
        assert_eq!(buffer.get(), "x");
        journal.rollback(mark);
        assert_eq!(buffer.get(), "abc");
    }
}
