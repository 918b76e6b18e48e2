//! CLI runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for the demo host that do not belong to inventory content.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Buffered packets on the host-to-replica link.
    pub link_buffer: usize,
    pub toast_capacity: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            session_id: None,
            log_dir: None,
            link_buffer: 16,
            toast_capacity: 64,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `INVENTORY_DATA_DIR` - Directory holding `items.ron` and `config.toml`
    /// - `INVENTORY_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `INVENTORY_LOG_DIR` - Directory for log files (default: platform cache dir)
    /// - `INVENTORY_LINK_BUFFER` - Replication link capacity (default: 16)
    /// - `INVENTORY_TOAST_CAPACITY` - Toasts kept per feed (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var_os("INVENTORY_DATA_DIR").map(PathBuf::from);
        config.session_id = env::var("INVENTORY_SESSION_ID").ok();
        config.log_dir = env::var_os("INVENTORY_LOG_DIR").map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("INVENTORY_LINK_BUFFER") {
            config.link_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("INVENTORY_TOAST_CAPACITY") {
            config.toast_capacity = capacity.max(1);
        }

        config
    }

    /// Content directory, falling back to the catalog shipped with the
    /// workspace.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../game/content/data")
        })
    }

    /// Platform log directory (`~/.cache/inventory/logs` on Linux).
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "inventory")
                .map(|dirs| dirs.cache_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("/tmp/inventory/logs"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
