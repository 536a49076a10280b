//! Persisted user preferences.
//!
//! A single `key: value` text file under the config dir, read once at
//! startup and rewritten on every change. The format is a plain line
//! parser — comments and unknown keys are tolerated so the file survives
//! older and newer builds alike.

use std::path::Path;

/// File name of the preferences file inside the config dir.
pub const PREFS_FILE: &str = "prefs.conf";

/// The fixed key the sound flag is stored under.
pub const SOUND_ENABLED_KEY: &str = "sound_enabled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Whether interface sounds are enabled.
    pub sound_enabled: bool,
}

/// Returns the defaults for all preference fields.
pub fn default_preferences() -> Preferences {
    Preferences { sound_enabled: true }
}

/// Load preferences from `path`.
pub fn load(path: &Path) -> Result<Preferences, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse(&content)
}

/// Load preferences, falling back to defaults when the file is missing.
pub fn load_or_default(path: &Path) -> Preferences {
    load(path).unwrap_or_else(|_| default_preferences())
}

/// Save preferences to `path`.
pub fn save(path: &Path, prefs: &Preferences) -> Result<(), String> {
    std::fs::write(path, serialize(prefs))
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))
}

/// Parse preferences from text. Unknown keys are ignored.
pub fn parse(content: &str) -> Result<Preferences, String> {
    let mut prefs = default_preferences();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(colon_pos) = line.find(':') else {
            continue;
        };
        let key = line[..colon_pos].trim();
        let val = line[colon_pos + 1..].trim();

        if key == SOUND_ENABLED_KEY {
            prefs.sound_enabled = parse_bool(key, val)?;
        }
        // Unknown keys are silently ignored for forward-compatibility.
    }

    Ok(prefs)
}

/// Serialize preferences to text.
pub fn serialize(prefs: &Preferences) -> String {
    format!("{}: {}\n", SOUND_ENABLED_KEY, prefs.sound_enabled)
}

fn parse_bool(key: &str, val: &str) -> Result<bool, String> {
    match val.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(format!("invalid bool for {}: {}", key, val)),
    }
}
