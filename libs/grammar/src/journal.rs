//! # Undo Journal
//!
//! Log of undo actions recorded by capture sinks during a parse.
//!
//! Every sink write first records how to put the sink back the way it was.
//! The attempt protocol marks the journal before running a grammar node and
//! rolls back to the mark when the node fails, which undoes every write made
//! by the node and all of its descendants without walking the grammar tree.

use std::fmt;

/// Position in a [`Journal`] to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JournalMark(usize);

/// Stack of pending undo actions.
#[derive(Default)]
pub struct Journal {
    undo: Vec<Box<dyn FnOnce()>>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position, for a later [`Journal::rollback`].
    pub fn mark(&self) -> JournalMark {
        JournalMark(self.undo.len())
    }

    /// Records an action that reverses a write about to happen.
    pub fn record(&mut self, undo: impl FnOnce() + 'static) {
        self.undo.push(Box::new(undo));
    }

    /// Runs every action recorded after `mark`, newest first.
    pub fn rollback(&mut self, mark: JournalMark) {
        while self.undo.len() > mark.0 {
            if let Some(undo) = self.undo.pop() {
                undo();
            }
        }
    }

    /// Forgets every recorded action, making the writes permanent.
    pub fn commit(&mut self) {
        self.undo.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("pending", &self.undo.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_rollback_runs_newest_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut journal = Journal::new();
        for n in 0..3 {
            let log = Rc::clone(&log);
            journal.record(move || log.borrow_mut().push(n));
        }
        journal.rollback(JournalMark(0));
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_rollback_stops_at_mark() {
        let count = Rc::new(RefCell::new(0));
        let mut journal = Journal::new();
        let bump = |count: &Rc<RefCell<i32>>| {
            let count = Rc::clone(count);
            move || *count.borrow_mut() += 1
        };
        journal.record(bump(&count));
        let mark = journal.mark();
        journal.record(bump(&count));
        journal.record(bump(&count));
        journal.rollback(mark);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn test_commit_discards_actions() {
        let touched = Rc::new(RefCell::new(false));
        let mut journal = Journal::new();
        let flag = Rc::clone(&touched);
        journal.record(move || *flag.borrow_mut() = true);
        journal.commit();
        journal.rollback(JournalMark(0));
        assert!(!*touched.borrow());
    }
}
