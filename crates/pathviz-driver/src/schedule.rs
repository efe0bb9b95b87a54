//! Timed reveal events.
//!
//! A finished search is replayed to the renderer as a sequence of
//! [`RevealEvent`]s kept in a min-heap keyed by `(offset, insertion order)`.
//! Lower offsets are popped first; ties are broken by insertion order (FIFO).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use pathviz_core::Point;

/// What a reveal makes observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealKind {
    Visited,
    Path,
}

/// One cell reveal, `offset` time units after the run started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealEvent {
    pub offset: u64,
    pub pos: Point,
    pub kind: RevealKind,
}

#[derive(Debug)]
struct Entry {
    event: RevealEvent,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.event.offset == other.event.offset && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.event
            .offset
            .cmp(&other.event.offset)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Ordered queue of pending reveals.
#[derive(Debug, Default)]
pub struct RevealSchedule {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl RevealSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a run: visited cell `i` at `step * i`, then path cell `j` at
    /// `step * visited.len() + path_step * j`. Offsets saturate at `u64::MAX`.
    pub fn plan(visited: &[Point], path: &[Point], step: u64, path_step: u64) -> Self {
        let mut schedule = Self::new();
        for (i, &pos) in visited.iter().enumerate() {
            schedule.push(RevealEvent {
                offset: step.saturating_mul(i as u64),
                pos,
                kind: RevealKind::Visited,
            });
        }
        let path_start = step.saturating_mul(visited.len() as u64);
        for (j, &pos) in path.iter().enumerate() {
            schedule.push(RevealEvent {
                offset: path_start.saturating_add(path_step.saturating_mul(j as u64)),
                pos,
                kind: RevealKind::Path,
            });
        }
        schedule
    }

    pub fn push(&mut self, event: RevealEvent) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { event, seq }));
    }

    /// Pop the earliest event (ties broken FIFO).
    pub fn pop(&mut self) -> Option<RevealEvent> {
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    /// The earliest event, without removing it.
    pub fn peek(&self) -> Option<&RevealEvent> {
        self.heap.peek().map(|Reverse(entry)| &entry.event)
    }

    /// Pop every event whose offset is at most `now`, in order.
    pub fn pop_due(&mut self, now: u64) -> Vec<RevealEvent> {
        let mut due = Vec::new();
        while self.peek().is_some_and(|e| e.offset <= now) {
            if let Some(event) = self.pop() {
                due.push(event);
            }
        }
        due
    }

    /// Offset of the last pending event.
    pub fn end(&self) -> Option<u64> {
        self.heap.iter().map(|Reverse(entry)| entry.event.offset).max()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl Iterator for RevealSchedule {
    type Item = RevealEvent;

    fn next(&mut self) -> Option<RevealEvent> {
        self.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let event = RevealEvent {
            offset: 90,
            pos: Point::new(3, 4),
            kind: RevealKind::Path,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: RevealEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
