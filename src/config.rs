//! Watcher configuration.

use std::time::Duration;

/// Snapshot resource published by the directory service.
pub const DEFAULT_URL: &str = "http://yp.ladio.net/stats/list.v2.zdat";

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// URL of the compressed snapshot resource
    pub url: String,
    /// Payload text encoding, as an encoding label such as "shift_jis"
    pub encoding: String,
    /// Delay between poll cycles (default: 15 seconds)
    pub poll_interval: Duration,
    /// Timeout for one snapshot fetch (default: 1000 seconds)
    pub fetch_timeout: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            encoding: "shift_jis".to_string(),
            poll_interval: Duration::from_millis(15_000),
            fetch_timeout: Duration::from_secs(1000),
        }
    }
}

impl WatcherConfig {
    /// Parse an interval string like "15s", "500ms", "2m", "1h"
    pub fn parse_interval(s: &str) -> Result<Duration, String> {
        let s = s.trim().to_lowercase();

        if let Some(millis) = s.strip_suffix("ms") {
            millis
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| format!("Invalid milliseconds: {}", millis))
        } else if let Some(hours) = s.strip_suffix('h') {
            hours
                .parse::<u64>()
                .map(|h| Duration::from_secs(h * 3600))
                .map_err(|_| format!("Invalid hours: {}", hours))
        } else if let Some(minutes) = s.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| format!("Invalid minutes: {}", minutes))
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| format!("Invalid seconds: {}", secs))
        } else {
            // Try parsing as raw seconds
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| format!("Invalid interval: {}. Use format like '15s', '500ms', '1m'", s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            WatcherConfig::parse_interval("15s").unwrap(),
            Duration::from_secs(15)
        );
        assert_eq!(
            WatcherConfig::parse_interval("500ms").unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(
            WatcherConfig::parse_interval("2m").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            WatcherConfig::parse_interval("1h").unwrap(),
            Duration::from_secs(3600)
        );
        assert_eq!(
            WatcherConfig::parse_interval("30").unwrap(),
            Duration::from_secs(30)
        );
        assert!(WatcherConfig::parse_interval("soon").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(15_000));
        assert_eq!(config.fetch_timeout, Duration::from_secs(1000));
        assert_eq!(config.encoding, "shift_jis");
        assert_eq!(config.url, DEFAULT_URL);
    }
}
