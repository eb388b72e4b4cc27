use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One currently-broadcasting program from the directory listing.
///
/// Two values refer to the same logical program iff `detail_url` and
/// `start_time` match; every other field may change between snapshots
/// without affecting identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub dj: String,
    pub genre: String,
    pub description: String,
    pub related_url: String,
    pub mount: String,
    /// Broadcast start, local wall-clock time as reported upstream.
    pub start_time: NaiveDateTime,
    /// Current listener count.
    pub listeners: u32,
    /// Cumulative listener count since broadcast start.
    pub total_listeners: u32,
    /// Peak listener count.
    pub max_listeners: u32,
    pub bit_rate: u32,
    pub sample_rate: u32,
    pub channels: u32,
    /// Audio format, e.g. "ogg" or "mp3".
    pub format: String,
    /// Song currently playing, if announced.
    pub song: String,
    /// URL of the program's detail page. Half of the identity key.
    pub detail_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Program {
    /// URL of the playable stream playlist.
    pub fn stream_url(&self) -> String {
        format!(
            "http://{}:{}{}.m3u",
            self.server_host, self.server_port, self.mount
        )
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.detail_url == other.detail_url && self.start_time == other.start_time
    }
}

impl Eq for Program {}

impl Hash for Program {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.detail_url.hash(state);
        self.start_time.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample(detail_url: &str, start: &str) -> Program {
        Program {
            title: "Test Show".into(),
            dj: "dj".into(),
            genre: String::new(),
            description: String::new(),
            related_url: String::new(),
            mount: "/test".into(),
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
            listeners: 0,
            total_listeners: 0,
            max_listeners: 0,
            bit_rate: 0,
            sample_rate: 0,
            channels: 0,
            format: String::new(),
            song: String::new(),
            detail_url: detail_url.into(),
            server_host: "std1.ladio.net".into(),
            server_port: 8000,
        }
    }

    #[test]
    fn test_identity_ignores_mutable_fields() {
        let a = sample("http://x/1", "2024-01-01 10:00:00");
        let mut b = a.clone();
        b.title = "Renamed".into();
        b.listeners = 42;
        b.song = "another song".into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_differs_on_url_or_start() {
        let a = sample("http://x/1", "2024-01-01 10:00:00");
        let b = sample("http://x/2", "2024-01-01 10:00:00");
        let c = sample("http://x/1", "2024-01-01 11:00:00");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_consistent_with_identity() {
        let a = sample("http://x/1", "2024-01-01 10:00:00");
        let mut b = a.clone();
        b.listeners = 100;

        let mut set = HashSet::new();
        set.insert(a);
        // Same identity, different fields: no second entry.
        assert!(!set.insert(b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stream_url() {
        let p = sample("http://x/1", "2024-01-01 10:00:00");
        assert_eq!(p.stream_url(), "http://std1.ladio.net:8000/test.m3u");
    }
}
