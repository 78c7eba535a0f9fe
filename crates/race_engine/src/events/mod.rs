//! Event queue with immediate and deferred delivery
//! Key principles:
//! - Typed events (the game defines its own event enum)
//! - Queuing support (immediate + deferred delivery)
//! - Deferred events fire once their delivery time has been reached
//! - Draining hands events back to the caller, who owns the state they mutate

/// Event queue with immediate and time-deferred delivery
#[derive(Debug)]
pub struct EventQueue<E> {
    immediate_queue: Vec<E>,
    deferred_queue: Vec<(f64, E)>,
    current_time: f64,
}

impl<E> EventQueue<E> {
    /// Create a new empty event queue
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Current time as last set by `update_time`
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Send event for handling on the next drain
    pub fn send(&mut self, event: E) {
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: E) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Post event for delivery `delay` seconds after the current time
    pub fn post_in(&mut self, delay: f64, event: E) {
        self.post(self.current_time + delay, event);
    }

    /// Take all pending events
    /// Returns the immediate queue first, then due deferred events in delivery order
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = std::mem::take(&mut self.immediate_queue);

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_time {
                due.push(self.deferred_queue.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        events.extend(due.into_iter().map(|(_, event)| event));
        events
    }

    /// Number of events still waiting for their delivery time
    pub fn pending_deferred(&self) -> usize {
        self.deferred_queue.len()
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEvent {
        Clicked(u32),
        Tick,
    }

    #[test]
    fn test_immediate_dispatch() {
        let mut queue = EventQueue::new();
        queue.send(TestEvent::Clicked(42));

        assert_eq!(queue.drain(), vec![TestEvent::Clicked(42)]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut queue = EventQueue::new();
        queue.update_time(0.0);
        queue.post(1.0, TestEvent::Tick);

        // Event should not dispatch at t=0.5
        queue.update_time(0.5);
        assert!(queue.drain().is_empty());
        assert_eq!(queue.pending_deferred(), 1);

        // Event should dispatch at t=1.0
        queue.update_time(1.0);
        assert_eq!(queue.drain(), vec![TestEvent::Tick]);
        assert_eq!(queue.pending_deferred(), 0);
    }

    #[test]
    fn test_due_events_in_delivery_order() {
        let mut queue = EventQueue::new();
        queue.post(2.0, TestEvent::Clicked(2));
        queue.post(1.0, TestEvent::Clicked(1));
        queue.send(TestEvent::Tick);

        queue.update_time(3.0);
        assert_eq!(
            queue.drain(),
            vec![TestEvent::Tick, TestEvent::Clicked(1), TestEvent::Clicked(2)]
        );
    }

    #[test]
    fn test_post_in_is_relative() {
        let mut queue = EventQueue::new();
        queue.update_time(10.0);
        queue.post_in(3.5, TestEvent::Tick);

        queue.update_time(13.4);
        assert!(queue.drain().is_empty());
        queue.update_time(13.5);
        assert_eq!(queue.drain().len(), 1);
    }
}
