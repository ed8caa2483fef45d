use super::event::Event;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub event: Event,
    pub sequence_num: u64,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal times fall back to insertion order
        self.event
            .time
            .total_cmp(&other.event.time)
            .then_with(|| self.sequence_num.cmp(&other.sequence_num))
    }
}

/// Pending events, always sorted ascending by time.
///
/// Unlike a heap, every position is visible: the scheduler walks the whole
/// queue front to back looking for the first event whose transition can run.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
    sequence_counter: u64,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            sequence_counter: 0,
        }
    }

    /// Insert an event at its sorted position, returns its sequence number
    pub fn push(&mut self, event: Event) -> u64 {
        let scheduled = ScheduledEvent {
            event,
            sequence_num: self.sequence_counter,
        };
        self.sequence_counter += 1;

        // Sequence numbers only grow, so the new entry goes after every equal-time one
        let index = self.events.partition_point(|existing| existing <= &scheduled);
        self.events.insert(index, scheduled);
        scheduled.sequence_num
    }

    /// Remove the event at `index`, keeping the rest in order
    pub fn remove_at(&mut self, index: usize) -> Option<ScheduledEvent> {
        if index < self.events.len() {
            Some(self.events.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&ScheduledEvent> {
        self.events.get(index)
    }

    /// Current index of the event carrying `sequence_num`
    pub fn position(&self, sequence_num: u64) -> Option<usize> {
        self.events
            .iter()
            .position(|scheduled| scheduled.sequence_num == sequence_num)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate pending events in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }

    /// Time of the earliest pending event
    pub fn peek_next_time(&self) -> Option<f64> {
        self.events.first().map(|scheduled| scheduled.event.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ShipId, Transition};

    fn event(time: f64, ship: usize) -> Event {
        Event::new(time, ShipId::new(ship), Transition::Move)
    }

    #[test]
    fn test_push_keeps_time_order() {
        let mut queue = EventQueue::new();
        queue.push(event(5.0, 0));
        queue.push(event(1.0, 1));
        queue.push(event(3.0, 2));
        queue.push(event(0.5, 3));

        let times: Vec<f64> = queue.iter().map(|s| s.event.time).collect();
        assert_eq!(times, vec![0.5, 1.0, 3.0, 5.0]);
        assert_eq!(queue.peek_next_time(), Some(0.5));
    }

    #[test]
    fn test_equal_times_keep_insertion_order() {
        let mut queue = EventQueue::new();
        queue.push(event(2.0, 0));
        queue.push(event(2.0, 1));
        queue.push(event(1.0, 2));
        queue.push(event(2.0, 3));

        let ships: Vec<usize> = queue.iter().map(|s| s.event.ship.index()).collect();
        assert_eq!(ships, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_remove_at_and_position() {
        let mut queue = EventQueue::new();
        let first = queue.push(event(1.0, 0));
        let second = queue.push(event(2.0, 1));
        let third = queue.push(event(3.0, 2));

        assert_eq!(queue.position(second), Some(1));
        let removed = queue.remove_at(1).unwrap();
        assert_eq!(removed.sequence_num, second);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.position(first), Some(0));
        assert_eq!(queue.position(third), Some(1));
        assert_eq!(queue.position(second), None);
        assert!(queue.remove_at(7).is_none());
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_next_time(), None);
        assert!(queue.get(0).is_none());

        queue.push(event(1.0, 0));
        assert!(!queue.is_empty());
        queue.remove_at(0);
        assert!(queue.is_empty());
    }
}
