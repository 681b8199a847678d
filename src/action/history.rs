use std::{collections::VecDeque, fmt};

use tracing::debug;

use crate::{
    buffer::{RenderBuffer, VecBuffer},
    winged::WingedMesh,
};


/// A user-level operation that has already been executed and can be undone
/// and redone any number of times, alternating.
pub trait Action<B: RenderBuffer = VecBuffer> {
    /// Short human readable name, used for logging.
    fn name(&self) -> &'static str;

    fn undo(&mut self, mesh: &mut WingedMesh<B>);
    fn redo(&mut self, mesh: &mut WingedMesh<B>);
}

/// The undo/redo stack.
///
/// Actions are pushed after they ran. Undoing moves the most recent action to
/// the redo stack, redoing moves it back. Pushing a new action discards
/// everything that could have been redone.
pub struct History<B: RenderBuffer = VecBuffer> {
    past: VecDeque<Box<dyn Action<B>>>,
    future: Vec<Box<dyn Action<B>>>,
    capacity: Option<usize>,
}

impl<B: RenderBuffer> History<B> {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity: None,
        }
    }

    /// Creates a history that remembers at most `capacity` undoable
    /// actions. The oldest ones are forgotten first.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity has to be positive");
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    pub fn push(&mut self, action: impl Action<B> + 'static) {
        self.push_boxed(Box::new(action));
    }

    pub fn push_boxed(&mut self, action: Box<dyn Action<B>>) {
        debug!("pushing '{}' to history", action.name());

        if !self.future.is_empty() {
            debug!("discarding {} redoable actions", self.future.len());
            self.future.clear();
        }

        self.past.push_back(action);
        if let Some(cap) = self.capacity {
            while self.past.len() > cap {
                if let Some(old) = self.past.pop_front() {
                    debug!("history full, forgetting '{}'", old.name());
                }
            }
        }
    }

    /// Undoes the most recent action. Returns `false` if there was none.
    pub fn undo(&mut self, mesh: &mut WingedMesh<B>) -> bool {
        match self.past.pop_back() {
            Some(mut action) => {
                debug!("undo '{}'", action.name());
                action.undo(mesh);
                self.future.push(action);
                true
            }
            None => false,
        }
    }

    /// Redoes the most recently undone action. Returns `false` if there was
    /// none.
    pub fn redo(&mut self, mesh: &mut WingedMesh<B>) -> bool {
        match self.future.pop() {
            Some(mut action) => {
                debug!("redo '{}'", action.name());
                action.redo(mesh);
                self.past.push_back(action);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn num_undoable(&self) -> usize {
        self.past.len()
    }

    pub fn num_redoable(&self) -> usize {
        self.future.len()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl<B: RenderBuffer> Default for History<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBuffer> fmt::Debug for History<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("History")
            .field("past", &self.past.iter().map(|a| a.name()).collect::<Vec<_>>())
            .field("future", &self.future.iter().map(|a| a.name()).collect::<Vec<_>>())
            .field("capacity", &self.capacity)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Logs calls into a shared journal.
    struct Probe {
        name: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Action for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn undo(&mut self, _: &mut WingedMesh) {
            self.journal.borrow_mut().push(format!("undo {}", self.name));
        }

        fn redo(&mut self, _: &mut WingedMesh) {
            self.journal.borrow_mut().push(format!("redo {}", self.name));
        }
    }

    fn probe(name: &'static str, journal: &Rc<RefCell<Vec<String>>>) -> Probe {
        Probe { name, journal: journal.clone() }
    }

    #[test]
    fn undo_redo_order() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut mesh: WingedMesh = WingedMesh::new();
        let mut history = History::new();

        assert!(!history.undo(&mut mesh));
        assert!(!history.redo(&mut mesh));

        history.push(probe("a", &journal));
        history.push(probe("b", &journal));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert!(history.undo(&mut mesh));
        assert!(history.undo(&mut mesh));
        assert!(!history.undo(&mut mesh));
        assert!(history.redo(&mut mesh));

        assert_eq!(*journal.borrow(), ["undo b", "undo a", "redo a"]);
        assert_eq!(history.num_undoable(), 1);
        assert_eq!(history.num_redoable(), 1);
    }

    #[test]
    fn push_discards_future() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut mesh: WingedMesh = WingedMesh::new();
        let mut history = History::new();

        history.push(probe("a", &journal));
        history.undo(&mut mesh);
        assert!(history.can_redo());

        history.push(probe("b", &journal));
        assert!(!history.can_redo());
        assert!(!history.redo(&mut mesh));
    }

    #[test]
    fn capacity_forgets_oldest() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut mesh: WingedMesh = WingedMesh::new();
        let mut history = History::with_capacity(2);

        history.push(probe("a", &journal));
        history.push(probe("b", &journal));
        history.push(probe("c", &journal));
        assert_eq!(history.num_undoable(), 2);

        while history.undo(&mut mesh) {}
        assert_eq!(*journal.borrow(), ["undo c", "undo b"]);
    }
}
