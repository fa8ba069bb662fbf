//! Query input debouncing
//!
//! Rapid keystrokes restart a quiet period; a search fires only once the
//! input has been still for the whole period, and at most once per burst.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::TableViewConfig;

/// Coalesces query input into at most one search per quiet period
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &TableViewConfig) -> Self {
        Self::new(config.debounce())
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record the latest input and restart the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// When the pending input becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending input once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    /// Take the pending input regardless of the deadline.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }
}

/// Drive [`Debouncer`] from a channel of raw query input.
///
/// `on_fire` runs once per quiet period with the latest text. When the
/// sender side closes, input still pending fires immediately and the
/// function returns.
pub async fn debounce_queries<F>(mut rx: mpsc::Receiver<String>, delay: Duration, mut on_fire: F)
where
    F: FnMut(String),
{
    let mut debouncer = Debouncer::new(delay);

    loop {
        let Some(deadline) = debouncer.deadline() else {
            match rx.recv().await {
                Some(text) => debouncer.input(text, now()),
                None => return,
            }
            continue;
        };

        tokio::select! {
            received = rx.recv() => match received {
                Some(text) => debouncer.input(text, now()),
                None => {
                    if let Some(text) = debouncer.flush() {
                        on_fire(text);
                    }
                    return;
                }
            },
            () = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                if let Some(text) = debouncer.poll(now()) {
                    on_fire(text);
                }
            }
        }
    }
}

/// Current time on the tokio clock, so paused-time tests drive the policy.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(150));

        debouncer.input("c", start);
        debouncer.input("ca", start + Duration::from_millis(50));
        debouncer.input("caf", start + Duration::from_millis(100));

        assert_eq!(debouncer.poll(start + Duration::from_millis(200)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(250)),
            Some("caf".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn deadline_tracks_latest_input() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert_eq!(debouncer.deadline(), None);
        debouncer.input("x", start + Duration::from_millis(30));
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(130)));
    }
}
