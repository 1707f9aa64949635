//! Rime user directory detection and the paths derived from it.

use std::path::{Path, PathBuf};

use crate::core::constants::files;

/// Candidate user directories for `os`, in order of preference.
///
/// `home` and `data_dir` are passed in so detection stays testable; `os` uses
/// the values of `std::env::consts::OS`.
pub fn candidate_dirs(os: &str, home: Option<&Path>, data_dir: Option<&Path>) -> Vec<PathBuf> {
    match os {
        "windows" => data_dir.map(|d| vec![d.join("Rime")]).unwrap_or_default(),
        "macos" => home
            .map(|h| vec![h.join("Library").join("Rime")])
            .unwrap_or_default(),
        _ => home
            .map(|h| {
                let config = h.join(".config");
                vec![
                    config.join("rime"),
                    config.join("fcitx").join("rime"),
                    config.join("fcitx5").join("rime"),
                    config.join("ibus").join("rime"),
                ]
            })
            .unwrap_or_default(),
    }
}

/// Detect the Rime user directory of the current user.
///
/// Returns the first candidate that exists as a directory.
pub fn detect_user_dir() -> Option<PathBuf> {
    let home = dirs::home_dir();
    let data_dir = dirs::data_dir();
    candidate_dirs(std::env::consts::OS, home.as_deref(), data_dir.as_deref())
        .into_iter()
        .find(|dir| dir.is_dir())
}

/// The configured user directory, or the detected one when none is configured.
///
/// A configured directory is returned as given, even if it does not exist.
pub fn resolve_user_dir(configured: Option<PathBuf>) -> Option<PathBuf> {
    configured.or_else(detect_user_dir)
}

/// Well-known locations inside a Rime user directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RimePaths {
    user_dir: PathBuf,
    schema_file: String,
}

impl RimePaths {
    pub fn new(user_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
            schema_file: files::SCHEMA_FILE.to_string(),
        }
    }

    pub fn with_schema_file(mut self, schema_file: impl Into<String>) -> Self {
        self.schema_file = schema_file.into();
        self
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn lua_dir(&self) -> PathBuf {
        self.user_dir.join(files::LUA_DIR)
    }

    pub fn logger_script(&self) -> PathBuf {
        self.lua_dir().join(files::LOGGER_SCRIPT)
    }

    pub fn config_script(&self) -> PathBuf {
        self.lua_dir().join(files::CONFIG_SCRIPT)
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_file
    }

    pub fn schema_file(&self) -> PathBuf {
        self.user_dir.join(&self.schema_file)
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.user_dir.join(files::DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_dirs_linux() {
        let home = PathBuf::from("/home/user");
        let dirs = candidate_dirs("linux", Some(&home), None);

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/home/user/.config/rime"),
                PathBuf::from("/home/user/.config/fcitx/rime"),
                PathBuf::from("/home/user/.config/fcitx5/rime"),
                PathBuf::from("/home/user/.config/ibus/rime"),
            ]
        );
    }

    #[test]
    fn test_candidate_dirs_macos() {
        let home = PathBuf::from("/Users/me");
        let dirs = candidate_dirs("macos", Some(&home), None);
        assert_eq!(dirs, vec![PathBuf::from("/Users/me/Library/Rime")]);
    }

    #[test]
    fn test_candidate_dirs_windows_uses_roaming_app_data() {
        let roaming = PathBuf::from("C:/Users/me/AppData/Roaming");
        let dirs = candidate_dirs("windows", None, Some(&roaming));
        assert_eq!(dirs, vec![roaming.join("Rime")]);
    }

    #[test]
    fn test_candidate_dirs_without_home() {
        assert!(candidate_dirs("linux", None, None).is_empty());
        assert!(candidate_dirs("macos", None, None).is_empty());
        assert!(candidate_dirs("windows", None, None).is_empty());
    }

    #[test]
    fn test_resolve_user_dir_prefers_configured() {
        let configured = PathBuf::from("/does/not/exist/rime");
        assert_eq!(
            resolve_user_dir(Some(configured.clone())),
            Some(configured)
        );
    }

    #[test]
    fn test_rime_paths_layout() {
        let paths = RimePaths::new("/rime");

        assert_eq!(paths.lua_dir(), PathBuf::from("/rime/lua"));
        assert_eq!(
            paths.logger_script(),
            PathBuf::from("/rime/lua/input_habit_logger.lua")
        );
        assert_eq!(
            paths.config_script(),
            PathBuf::from("/rime/lua/input_habit_logger_config.lua")
        );
        assert_eq!(
            paths.schema_file(),
            PathBuf::from("/rime/wanxiang.schema.yaml")
        );
        assert_eq!(
            paths.default_log_file(),
            PathBuf::from("/rime/input_habit_log_structured.jsonl")
        );
    }

    #[test]
    fn test_rime_paths_custom_schema() {
        let paths = RimePaths::new("/rime").with_schema_file("luna_pinyin.schema.yaml");
        assert_eq!(paths.schema_name(), "luna_pinyin.schema.yaml");
        assert_eq!(
            paths.schema_file(),
            PathBuf::from("/rime/luna_pinyin.schema.yaml")
        );
    }
}
