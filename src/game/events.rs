use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::chess::piece::{Piece, Team};
use crate::core::square::Square;

/// Notifications the game controller fires while it mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// All 64 squares were emptied at once.
    Cleared,
    /// A whole position was swapped in from a save.
    Loaded,
    Placed { piece: Piece, square: Square },
    Removed { piece: Piece, square: Square },
    /// A king was captured; the game is over and the other team won.
    KingCaptured { team: Team, square: Square },
}

impl BoardEvent {
    /// The square the event is about, if any. Observers filter on this.
    pub fn square(&self) -> Option<Square> {
        match *self {
            BoardEvent::Placed { square, .. }
            | BoardEvent::Removed { square, .. }
            | BoardEvent::KingCaptured { square, .. } => Some(square),
            BoardEvent::Cleared | BoardEvent::Loaded => None,
        }
    }
}

/// Receiver of [`BoardEvent`]s.
///
/// Observers are called synchronously, in subscription order, and must not assume the event
/// concerns them.
pub trait GameObserver {
    fn on_event(&mut self, event: &BoardEvent);
}

/// Lets a caller keep a handle on an observer it has handed to the controller.
impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &BoardEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Observer that just records what it sees.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &BoardEvent) {
        self.events.push(*event);
    }
}

/// Handle returned by subscribing; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn GameObserver>)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &BoardEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_event(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribed_observers_stop_receiving() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut observers = Observers::default();
        let id = observers.subscribe(Box::new(Rc::clone(&log)));

        observers.notify(&BoardEvent::Cleared);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&BoardEvent::Loaded);

        assert_eq!(log.borrow().events, vec![BoardEvent::Cleared]);
        assert!(observers.is_empty());
    }
}
