use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Pointer input reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Up { x: i32, y: i32 },
}

impl PointerEvent {
    pub fn position(&self) -> (i32, i32) {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Up { x, y } => (x, y),
        }
    }
}

/// FIFO of pending pointer events; the owner drains it on its own schedule.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    pending: VecDeque<PointerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<PointerEvent> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo() {
        let mut q = EventQueue::new();
        q.push(PointerEvent::Down { x: 1, y: 2 });
        q.push(PointerEvent::Up { x: 1, y: 2 });
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(PointerEvent::Down { x: 1, y: 2 }));
        assert_eq!(q.pop().map(|e| e.position()), Some((1, 2)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_tagged_json() {
        let e: PointerEvent = serde_json::from_str(r#"{"kind":"up","x":-1,"y":3}"#).unwrap();
        assert_eq!(e, PointerEvent::Up { x: -1, y: 3 });
    }
}
