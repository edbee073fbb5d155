use derive_new::new;
use parcheat_lib::ParVariant;
use serde::Deserialize;
use tokio::fs::read_to_string;

pub const DEFAULT_SETTINGS_PATH: &str = "parcheat.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub variant: Option<ParVariant>,
    pub interval_ms: Option<u64>,
    pub cycles: Option<u32>,
    pub base_address: Option<usize>,
    pub log_dir: Option<String>,
}

#[derive(new)]
pub struct SettingsRepo {
    path: String,
}

impl SettingsRepo {
    /// A missing or unreadable file yields the defaults.
    pub async fn load(&self) -> Settings {
        let text = read_to_string(&self.path).await.unwrap_or_default();
        toml::from_str(&text).unwrap_or_default()
    }
}
