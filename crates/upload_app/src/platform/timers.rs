use std::time::{Duration, Instant};

use upload_core::Timer;

/// Deadline queue standing in for `setTimeout`; drained on every tick.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<(Instant, Timer)>,
}

impl TimerQueue {
    pub fn schedule(&mut self, now: Instant, delay: Duration, timer: Timer) {
        self.entries.push((now + delay, timer));
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<Timer> {
        let mut due: Vec<(Instant, Timer)> = Vec::new();
        self.entries.retain(|(deadline, timer)| {
            if *deadline <= now {
                due.push((*deadline, *timer));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, timer)| timer).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_timer_fires_at_five_seconds() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::default();
        queue.schedule(
            t0,
            Duration::from_millis(5000),
            Timer::DismissError { generation: 1 },
        );

        assert!(queue.drain_due(t0 + Duration::from_millis(4999)).is_empty());
        assert_eq!(
            queue.drain_due(t0 + Duration::from_millis(5000)),
            vec![Timer::DismissError { generation: 1 }]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::default();
        queue.schedule(t0, Duration::from_millis(800), Timer::Finalize { attempt: 1 });
        queue.schedule(t0, Duration::from_millis(500), Timer::Reveal { attempt: 1 });
        queue.schedule(t0, Duration::from_secs(5), Timer::DismissError { generation: 2 });

        assert_eq!(
            queue.drain_due(t0 + Duration::from_secs(1)),
            vec![Timer::Reveal { attempt: 1 }, Timer::Finalize { attempt: 1 }]
        );
        assert!(!queue.is_empty());
    }
}
