//! Quiet-interval debounce for text input.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest pushed value until no new value has arrived for `interval`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet interval from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.interval));
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_after_quiet_interval() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut d = Debouncer::new(ms(300));
        d.push("i", t0);
        d.push("iv", t0 + ms(100));
        d.push("iva", t0 + ms(200));
        assert_eq!(d.poll(t0 + ms(400)), None);
        assert_eq!(d.poll(t0 + ms(500)), Some("iva"));
        assert_eq!(d.poll(t0 + ms(900)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push(1, t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
        assert_eq!(d.deadline(), None);
    }
}
