//! Reading and rewriting the logger's Lua configuration script.
//!
//! The script selects a preset with `local preset_choice = "<name>"` and
//! defines one table per preset, for example:
//!
//! ```lua
//! local preset_choice = "normal"
//! local presets = {
//!     normal = {
//!         log_file_path = "C:\\Users\\me\\habit.jsonl",
//!     },
//! }
//! ```

use regex::{NoExpand, Regex};
use std::path::PathBuf;

use crate::core::error::Result;
use crate::core::types::Preset;

const PRESET_CHOICE: &str = r#"local\s+preset_choice\s*=\s*"([^"]*)""#;
const LOG_FILE_PATH: &str = r#"(?m)^[ \t]*log_file_path\s*=\s*"([^"]+)""#;

/// Name of the preset selected by `preset_choice`, if any
pub fn active_preset(content: &str) -> Result<Option<String>> {
    let choice = Regex::new(PRESET_CHOICE)?;
    Ok(choice
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty()))
}

/// Custom log path configured in the active preset's block.
///
/// Commented-out assignments are ignored and doubled backslashes are
/// unescaped. Returns `None` when the script does not override the path.
pub fn preset_log_path(content: &str) -> Result<Option<PathBuf>> {
    let Some(preset) = active_preset(content)? else {
        return Ok(None);
    };

    let block = Regex::new(&format!(
        r"(?ms)^[ \t]*{}\s*=\s*\{{(.*?)\n[ \t]*\}}",
        regex::escape(&preset)
    ))?;
    let Some(body) = block.captures(content).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    let log_file_path = Regex::new(LOG_FILE_PATH)?;
    Ok(log_file_path
        .captures(body.as_str())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(r"\\", r"\"))
        .filter(|path| !path.is_empty())
        .map(PathBuf::from))
}

/// Rewrite every `preset_choice` assignment to select `preset`.
///
/// Returns `None` when the script has no `preset_choice` line.
pub fn set_preset(content: &str, preset: Preset) -> Result<Option<String>> {
    let choice = Regex::new(PRESET_CHOICE)?;
    if !choice.is_match(content) {
        return Ok(None);
    }
    let replacement = format!(r#"local preset_choice = "{}""#, preset.as_str());
    Ok(Some(
        choice
            .replace_all(content, NoExpand(&replacement))
            .into_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"-- Input habit logger configuration
local preset_choice = "developer"

local presets = {
    normal = {
        log_file_path = "/tmp/normal.jsonl",
        log_raw_input = false,
    },
    developer = {
        -- log_file_path = "/tmp/commented.jsonl",
        log_file_path = "C:\\Users\\me\\Rime\\dev.jsonl",
        log_candidates = true,
    },
    advanced = {
        log_candidates = true,
    },
}

return presets[preset_choice]
"#;

    #[test]
    fn test_active_preset() -> Result<()> {
        assert_eq!(active_preset(SCRIPT)?.as_deref(), Some("developer"));
        assert_eq!(active_preset("return {}")?, None);
        assert_eq!(active_preset(r#"local preset_choice = """#)?, None);
        Ok(())
    }

    #[test]
    fn test_preset_log_path_reads_active_block() -> Result<()> {
        let path = preset_log_path(SCRIPT)?;
        assert_eq!(path, Some(PathBuf::from(r"C:\Users\me\Rime\dev.jsonl")));
        Ok(())
    }

    #[test]
    fn test_preset_log_path_other_preset() -> Result<()> {
        let script = SCRIPT.replace(
            r#"preset_choice = "developer""#,
            r#"preset_choice = "normal""#,
        );
        assert_eq!(
            preset_log_path(&script)?,
            Some(PathBuf::from("/tmp/normal.jsonl"))
        );
        Ok(())
    }

    #[test]
    fn test_preset_log_path_absent_in_block() -> Result<()> {
        let script = SCRIPT.replace(
            r#"preset_choice = "developer""#,
            r#"preset_choice = "advanced""#,
        );
        assert_eq!(preset_log_path(&script)?, None);
        Ok(())
    }

    #[test]
    fn test_preset_log_path_unknown_preset() -> Result<()> {
        let script = SCRIPT.replace(
            r#"preset_choice = "developer""#,
            r#"preset_choice = "missing""#,
        );
        assert_eq!(preset_log_path(&script)?, None);
        Ok(())
    }

    #[test]
    fn test_preset_log_path_only_commented_assignment() -> Result<()> {
        let script = r#"local preset_choice = "normal"
local presets = {
    normal = {
        -- log_file_path = "/tmp/ignored.jsonl",
    },
}
"#;
        assert_eq!(preset_log_path(script)?, None);
        Ok(())
    }

    #[test]
    fn test_set_preset_rewrites_choice() -> Result<()> {
        let updated = set_preset(SCRIPT, Preset::Advanced)?.unwrap();

        assert_eq!(active_preset(&updated)?.as_deref(), Some("advanced"));
        assert!(updated.contains(r"C:\\Users\\me\\Rime\\dev.jsonl"));
        Ok(())
    }

    #[test]
    fn test_set_preset_without_choice_line() -> Result<()> {
        assert_eq!(set_preset("return {}", Preset::Normal)?, None);
        Ok(())
    }
}
