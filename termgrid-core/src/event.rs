//! Change notifications.
//!
//! Each grid owns its observer list; there is no process-wide registry, so
//! independent grids can coexist (and be tested) without shared state.
//! Events fire after the grid reached a consistent state, at most once per
//! coalesced update.

/// What changed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEvent {
    /// The buffer text differs from the previously applied snapshot.
    TextChanged,
    /// Character placements were recomputed.
    LayoutChanged,
    /// The scroll offset moved (scroll input or re-clamping).
    VisibleIndexChanged,
    /// The active selection changed or was cleared.
    SelectionChanged,
    /// The caret moved to a different grid point.
    CursorPointChanged,
}

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-grid observer list. Listeners are invoked in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn FnMut(GridEvent)>)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(GridEvent)>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns false when the id is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: GridEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_emit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let sink = Rc::clone(&seen);
        listeners.subscribe(Box::new(move |event| sink.borrow_mut().push(event)));

        listeners.emit(GridEvent::TextChanged);
        listeners.emit(GridEvent::LayoutChanged);
        assert_eq!(
            *seen.borrow(),
            vec![GridEvent::TextChanged, GridEvent::LayoutChanged]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let seen = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let sink = Rc::clone(&seen);
        let id = listeners.subscribe(Box::new(move |_| *sink.borrow_mut() += 1));

        listeners.emit(GridEvent::TextChanged);
        assert!(listeners.unsubscribe(id));
        listeners.emit(GridEvent::TextChanged);
        assert_eq!(*seen.borrow(), 1);
        assert!(!listeners.unsubscribe(id));
    }

    #[test]
    fn test_multiple_listeners_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in [1, 2] {
            let sink = Rc::clone(&seen);
            listeners.subscribe(Box::new(move |_| sink.borrow_mut().push(tag)));
        }
        listeners.emit(GridEvent::SelectionChanged);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
