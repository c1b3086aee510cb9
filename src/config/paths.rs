//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout (config dir, settings + user dictionary):
//!
//!   Windows: %APPDATA%\voice-translator\
//!   macOS:   ~/Library/Application Support/voice-translator/
//!   Linux:   ~/.config/voice-translator/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `user-dictionary.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `user-dictionary.json`.
    pub user_dictionary_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voice-translator";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard config path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let user_dictionary_file = config_dir.join("user-dictionary.json");

        Self {
            config_dir,
            settings_file,
            user_dictionary_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_config_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with("voice-translator"));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .user_dictionary_file
            .file_name()
            .is_some_and(|n| n == "user-dictionary.json"));
        assert!(paths.settings_file.starts_with(&paths.config_dir));
    }
}
