use std::error::Error;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::paths::PATH_APP;
use crate::traits::TRAIT_NAMES;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    /// How many traits a creature must end up with. Read once at startup;
    /// the quota never changes while the screen is open.
    pub max_traits: usize,
    /// Overrides the default parts library location.
    pub parts_dir: Option<String>,
    /// Write a flattened portrait PNG next to the save when finishing.
    pub export_portrait: bool,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            max_traits: 4,
            parts_dir: None,
            export_portrait: true,
        }
    }
}

/// Reads the config, falling back to defaults when the file is missing or
/// malformed. A quota larger than half the trait catalog could never be
/// filled (each pick locks out its opposite), so it is clamped.
pub fn load_cfg() -> MakerConfig {
    let path = PATH_APP.join("config.json");
    let mut cfg: MakerConfig = match fs::read_to_string(&path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
        Err(_) => MakerConfig::default(),
    };
    cfg.max_traits = cfg.max_traits.clamp(1, TRAIT_NAMES.len() / 2);
    cfg
}

pub fn save_cfg(cfg: &MakerConfig) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&*PATH_APP)?;
    fs::write(
        PATH_APP.join("config.json"),
        serde_json::to_string_pretty(cfg)?,
    )?;
    Ok(())
}
