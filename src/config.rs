use crate::{
    app::backend::PreferenceStore,
    items::{ProfileId, DEFAULT_PROFILE_ID},
    storage::{self, StorageManager},
};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_BROWSER_DIR: &str = "browser";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Show the browser's own favicon for tabs instead of a generated one
    #[serde(default)]
    pub use_original_favicon: bool,

    /// Profile whose history and bookmarks are searched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<ProfileId>,

    /// Also match non-latin titles by their romanization (e.g. pinyin)
    #[serde(default = "default_romanize_titles")]
    pub romanize_titles: bool,

    /// Where exported browser data lives, defaults to `<base>/browser`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_data_dir: Option<String>,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_original_favicon: false,
            selected_profile: None,
            romanize_titles: default_romanize_titles(),
            browser_data_dir: None,
            base_path: PathBuf::new(),
        }
    }
}

fn default_romanize_titles() -> bool {
    true
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(profile) = &self.selected_profile {
            if profile.trim().is_empty() {
                bail!("selected_profile cannot be empty");
            }
            if profile.contains(&['/', '\\'][..]) || profile == ".." {
                bail!("selected_profile {profile:?} is not a valid profile id");
            }
        }
        if let Some(dir) = &self.browser_data_dir {
            if dir.trim().is_empty() {
                bail!("browser_data_dir cannot be empty");
            }
        }
        Ok(())
    }

    pub fn load_with(base_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let base_path = base_path.into();
        let store = storage::BackendLocal::new(&base_path)
            .with_context(|| format!("failed to open config dir {}", base_path.display()))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("Creating default config at {}", base_path.display());
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str =
            String::from_utf8(store.read(CONFIG_FILE)?).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path;

        config.validate()?;

        // resave in case config version needs an upgrade
        let current: serde_yml::Value = serde_yml::from_str(&config_str)?;
        let upgraded = serde_yml::to_value(&config)?;
        if current != upgraded {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    pub fn browser_data_dir(&self) -> PathBuf {
        match &self.browser_data_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.base_path.join(DEFAULT_BROWSER_DIR),
        }
    }
}

impl PreferenceStore for Config {
    fn use_original_favicon(&self) -> bool {
        self.use_original_favicon
    }

    fn selected_profile(&self) -> ProfileId {
        self.selected_profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_ID.to_string())
    }

    fn romanize_titles(&self) -> bool {
        self.romanize_titles
    }
}
