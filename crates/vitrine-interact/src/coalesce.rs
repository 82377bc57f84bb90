//! Rate limiting for bursty host signals.
//!
//! A [`CoalescingTimer`] never calls anything itself. Signals are fed in with
//! [`CoalescingTimer::signal`], and the owner polls it from its frame/tick
//! loop; `poll` reports at most one firing per burst. The reaction reads
//! state fresh when it runs, so nothing is captured at signal time.

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoalescePolicy {
    /// The first signal opens a window; signals inside it are absorbed and
    /// one firing happens at the window's trailing edge.
    Throttle,
    /// Every signal pushes the deadline a full window out; fires once the
    /// stream has been quiet for the window.
    Debounce,
}

#[derive(Clone, Debug)]
pub struct CoalescingTimer {
    policy: CoalescePolicy,
    window: Duration,
    deadline: Option<Instant>,
}

impl CoalescingTimer {
    pub fn new(policy: CoalescePolicy, window: Duration) -> Self {
        Self {
            policy,
            window,
            deadline: None,
        }
    }

    pub fn throttle(window: Duration) -> Self {
        Self::new(CoalescePolicy::Throttle, window)
    }

    pub fn debounce(window: Duration) -> Self {
        Self::new(CoalescePolicy::Debounce, window)
    }

    pub fn policy(&self) -> CoalescePolicy {
        self.policy
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn signal(&mut self, now: Instant) {
        match (self.policy, self.deadline) {
            (CoalescePolicy::Throttle, Some(_)) => {}
            _ => self.deadline = Some(now + self.window),
        }
    }

    /// `true` exactly once per burst, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Duration = Duration::from_millis(166);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn throttle_fires_at_trailing_edge_of_first_window() {
        let t0 = Instant::now();
        let mut t = CoalescingTimer::throttle(W);
        t.signal(t0);
        t.signal(t0 + ms(50));
        t.signal(t0 + ms(150));

        assert!(!t.poll(t0 + ms(165)));
        assert!(t.poll(t0 + ms(166)));
        assert!(!t.poll(t0 + ms(400)));
    }

    #[test]
    fn throttle_keeps_firing_during_a_continuous_stream() {
        let t0 = Instant::now();
        let mut t = CoalescingTimer::throttle(W);
        let mut fired = 0;
        for step in 0..100u64 {
            let now = t0 + ms(step * 10);
            t.signal(now);
            if t.poll(now) {
                fired += 1;
            }
        }
        // ~990ms of signals with a 166ms window
        assert!((5..=6).contains(&fired), "fired {fired}");
    }

    #[test]
    fn debounce_resets_on_activity() {
        let t0 = Instant::now();
        let mut t = CoalescingTimer::debounce(W);
        t.signal(t0);
        t.signal(t0 + ms(100));
        assert!(!t.poll(t0 + ms(200)));
        assert_eq!(t.deadline(), Some(t0 + ms(266)));
        assert!(t.poll(t0 + ms(266)));
        assert!(!t.is_pending());
    }

    #[test]
    fn cancel_drops_pending_firing() {
        let t0 = Instant::now();
        let mut t = CoalescingTimer::debounce(W);
        t.signal(t0);
        t.cancel();
        assert!(!t.poll(t0 + ms(1000)));
    }

    #[test]
    fn zero_window_fires_on_next_poll() {
        let t0 = Instant::now();
        let mut t = CoalescingTimer::throttle(Duration::ZERO);
        t.signal(t0);
        assert!(t.poll(t0));
    }
}
