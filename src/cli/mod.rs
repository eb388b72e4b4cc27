pub mod console;

use clap::Parser;
use url::Url;

use crate::config::{WatcherConfig, DEFAULT_URL};

#[derive(Parser)]
#[command(name = "ladiowatch")]
#[command(about = "Watch the net radio directory for programs going on and off the air", long_about = None)]
pub struct Cli {
    /// URL of the compressed program listing
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Payload text encoding label
    #[arg(long, default_value = "shift_jis")]
    pub encoding: String,

    /// Poll interval (e.g., "15s", "500ms", "1m")
    #[arg(short, long, default_value = "15s")]
    pub interval: String,

    /// Fetch timeout (e.g., "1000s")
    #[arg(long, default_value = "1000s")]
    pub timeout: String,
}

impl Cli {
    pub fn into_config(self) -> Result<WatcherConfig, String> {
        let url = Url::parse(&self.url).map_err(|e| format!("Invalid URL {}: {}", self.url, e))?;

        Ok(WatcherConfig {
            url: url.into(),
            encoding: self.encoding,
            poll_interval: WatcherConfig::parse_interval(&self.interval)?,
            fetch_timeout: WatcherConfig::parse_interval(&self.timeout)?,
        })
    }
}
