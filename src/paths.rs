use std::path::PathBuf;
use std::sync::LazyLock;

/// Root directory for Monster Maker data (config, saved creatures, exported
/// portraits). `MONSTER_MAKER_HOME` overrides the default location so tests
/// and portable installs can redirect everything.
pub static PATH_APP: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(path) = std::env::var("MONSTER_MAKER_HOME") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/share/monster-maker")
});

/// Default location of the body-part sprite library. Each subdirectory is one
/// category of parts; see `parts::PartsCatalog`.
pub static PATH_PARTS: LazyLock<PathBuf> = LazyLock::new(|| PATH_APP.join("parts"));
