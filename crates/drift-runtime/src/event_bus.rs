//! Event queue filled by input handlers and drained by the frame loop

use crate::event::FieldEvent;
use std::collections::VecDeque;

/// FIFO of field events waiting for the next frame.
///
/// Pointer moves arrive far more often than frames. A move queued directly
/// after another move replaces it, since systems only act on the latest
/// position. Moves on either side of a click stay separate so the ripple
/// still sees the pointer where the click happened.
#[derive(Default)]
pub struct EventBus {
    events: VecDeque<FieldEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, folding a finite pointer move into a trailing move
    pub fn push(&mut self, event: FieldEvent) {
        if let (FieldEvent::PointerMoved(next), Some(FieldEvent::PointerMoved(last))) =
            (&event, self.events.back_mut())
        {
            if next.is_finite() {
                *last = *next;
                return;
            }
        }
        self.events.push_back(event);
    }

    /// Take every pending event in push order.
    ///
    /// The queue is empty once the iterator is dropped, even if it was not
    /// fully consumed.
    pub fn drain(&mut self) -> impl Iterator<Item = FieldEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
