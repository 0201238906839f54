//! Layered settings.
//!
//! Built-in defaults, then `canteen.toml` (or an explicit file), then
//! `CANTEEN_*` environment variables with `__` separating nested keys,
//! e.g. `CANTEEN_SUGGEST__THRESHOLD=0.6`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "canteen.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: PathBuf,
    pub map: MapSettings,
    pub suggest: SuggestSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Reference campus image drawn beneath pins.
    pub image: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Where rendered overlays are written.
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestSettings {
    pub threshold: f64,
    /// Upper bound on accepted suggestions in one keyword search.
    pub max_rounds: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/canteens.jsonl"),
            map: MapSettings::default(),
            suggest: SuggestSettings::default(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            image: PathBuf::from("data/campus.jpg"),
            width: 620,
            height: 750,
            output: PathBuf::from("nearest.svg"),
        }
    }
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self { threshold: 0.5, max_rounds: 3 }
    }
}

impl Settings {
    /// Load from `canteen.toml` in the working directory, or from `file` when given.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let file = file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("CANTEEN_").split("__"));
        let settings: Settings = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load settings from {}: {}", file.display(), e))?;
        settings.validate()?;
        Ok(settings.expanded())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.suggest.threshold) {
            anyhow::bail!("suggest.threshold must lie in [0, 1], got {}", self.suggest.threshold);
        }
        if self.map.width == 0 || self.map.height == 0 {
            anyhow::bail!("map size must be non-zero, got {}x{}", self.map.width, self.map.height);
        }
        Ok(())
    }

    fn expanded(mut self) -> Self {
        self.dataset = expand_path(&self.dataset);
        self.map.image = expand_path(&self.map.image);
        self.map.output = expand_path(&self.map.output);
        self
    }
}

/// Expand a leading `~` and `$VAR`/`${VAR}` references. Unknown variables
/// leave the path untouched.
pub fn expand_path(path: &Path) -> PathBuf {
    let lossy = path.to_string_lossy();
    let s: &str = &lossy;
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("custom.toml");
        fs::write(&file, "dataset = \"/srv/stalls.json\"\n[suggest]\nthreshold = 0.7\n").unwrap();

        let settings = Settings::load(Some(file.as_path())).unwrap();
        assert_eq!(settings.dataset, PathBuf::from("/srv/stalls.json"));
        assert_eq!(settings.suggest.threshold, 0.7);
        assert_eq!(settings.suggest.max_rounds, 3);
        assert_eq!(settings.map.width, 620);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bad.toml");
        fs::write(&file, "[suggest]\nthreshold = 1.5\n").unwrap();
        assert!(Settings::load(Some(file.as_path())).is_err());
    }
}
