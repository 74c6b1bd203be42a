//! Simulated processing latency
//!
//! The assistant fakes "thinking time" proportional to the length of the
//! user's input. The delay is computed once per send, before routing, and is
//! not cancellable.

use crate::config::LatencyConfig;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Computes and applies the artificial thinking delay
///
/// The delay is `clamp(chars * per_char_ms, min_ms, max_ms)` with defaults of
/// 50ms per character bounded to [800ms, 2500ms].
///
/// # Examples
///
/// ```
/// use pulsechat::config::LatencyConfig;
/// use pulsechat::latency::LatencySimulator;
///
/// let simulator = LatencySimulator::new(LatencyConfig::default());
/// assert_eq!(simulator.delay_ms(""), 800);
/// assert_eq!(simulator.delay_ms(&"x".repeat(100)), 2500);
/// ```
#[derive(Debug, Clone)]
pub struct LatencySimulator {
    config: LatencyConfig,
}

impl LatencySimulator {
    /// Creates a simulator with the given bounds
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    /// Returns the simulated delay for the given input, in milliseconds
    pub fn delay_ms(&self, text: &str) -> u64 {
        let raw = text.chars().count() as u64 * self.config.per_char_ms;
        raw.clamp(self.config.min_ms, self.config.max_ms)
    }

    /// Suspends the caller for the simulated thinking time
    pub async fn delay(&self, text: &str) {
        let ms = self.delay_ms(text);
        debug!(delay_ms = ms, "Simulating processing latency");
        sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_clamps_to_minimum() {
        let simulator = LatencySimulator::default();
        assert_eq!(simulator.delay_ms(""), 800);
    }

    #[test]
    fn test_short_input_clamps_up() {
        // 10 chars * 50ms = 500ms, clamped up to 800ms
        let simulator = LatencySimulator::default();
        assert_eq!(simulator.delay_ms(&"x".repeat(10)), 800);
    }

    #[test]
    fn test_mid_length_input_is_proportional() {
        // 40 chars * 50ms = 2000ms, inside the bounds
        let simulator = LatencySimulator::default();
        assert_eq!(simulator.delay_ms(&"x".repeat(40)), 2000);
    }

    #[test]
    fn test_long_input_clamps_down() {
        // 100 chars * 50ms = 5000ms, clamped down to 2500ms
        let simulator = LatencySimulator::default();
        assert_eq!(simulator.delay_ms(&"x".repeat(100)), 2500);
    }

    #[test]
    fn test_custom_bounds() {
        let simulator = LatencySimulator::new(LatencyConfig {
            per_char_ms: 10,
            min_ms: 5,
            max_ms: 50,
        });
        assert_eq!(simulator.delay_ms(""), 5);
        assert_eq!(simulator.delay_ms("ab"), 20);
        assert_eq!(simulator.delay_ms(&"x".repeat(100)), 50);
    }

    #[test]
    fn test_multibyte_input_counts_chars_not_bytes() {
        let simulator = LatencySimulator::new(LatencyConfig {
            per_char_ms: 50,
            min_ms: 0,
            max_ms: 100_000,
        });
        // 4 characters regardless of UTF-8 width
        assert_eq!(simulator.delay_ms("日本語だ"), 200);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_sleeps_for_computed_duration() {
        let simulator = LatencySimulator::default();
        let start = tokio::time::Instant::now();
        simulator.delay(&"x".repeat(40)).await;
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
    }
}
