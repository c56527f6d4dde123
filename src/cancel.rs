use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Cooperative cancellation signal for long clustering runs.
///
/// Checked once per Lloyd iteration, never mid-iteration. Clones share the
/// same flag, so one handle can stop every trial of a robustness test or
/// every entry of a k-sweep. An optional wall-clock deadline trips the
/// signal without anyone calling [`Cancel::cancel`].
#[derive(Debug, Clone, Default)]
pub struct Cancel {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancel {
    /// A signal that only trips when [`Cancel::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }
    /// A signal that also trips once `budget` has elapsed from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Some(Instant::now() + budget),
        }
    }
    /// Request that every run sharing this signal stops at its next check.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
    /// Whether cancellation was requested or the deadline has passed.
    pub fn interrupted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .deadline
                .map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(Duration::from_secs(value)),
        "m" => Some(Duration::from_secs(value * 60)),
        "h" => Some(Duration::from_secs(value * 3600)),
        "d" => Some(Duration::from_secs(value * 86400)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let cancel = Cancel::new();
        let clone = cancel.clone();
        assert!(!clone.interrupted());
        cancel.cancel();
        assert!(clone.interrupted());
    }

    #[test]
    fn expired_deadline_interrupts() {
        assert!(Cancel::after(Duration::ZERO).interrupted());
        assert!(!Cancel::after(Duration::from_secs(3600)).interrupted());
    }

    #[test]
    fn durations_parse_with_unit_suffix() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("2x"), None);
        assert_eq!(parse_duration(""), None);
    }
}
