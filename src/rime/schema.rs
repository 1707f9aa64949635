//! Registering and unregistering the logger processor in a Rime schema.
//!
//! The schema is edited as plain text so comments and formatting survive:
//! the processor line is inserted after the first `- ...punctuator...`
//! list entry, reusing that entry's indentation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::schema;
use crate::core::error::{Result, RimeLogError};

/// Result of an install or uninstall edit on the schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    /// The schema already was in the requested state
    Unchanged,
    /// The schema was rewritten after saving a backup
    Updated { backup: PathBuf },
    /// Uninstall only: the schema file does not exist
    Missing,
}

/// Whether the logger processor is present in the schema text
pub fn is_configured(content: &str) -> bool {
    let entry = schema::PROCESSOR_LINE.trim();
    content.lines().any(|line| line.contains(entry))
}

/// Outcome of inserting the processor line into schema text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    AlreadyConfigured,
    Inserted(String),
    /// No `- ...punctuator...` entry to insert after
    NoAnchor,
}

/// Insert the logger processor after the punctuator entry.
pub fn insert_processor(content: &str) -> Insertion {
    if is_configured(content) {
        return Insertion::AlreadyConfigured;
    }

    let mut lines: Vec<&str> = content.split('\n').collect();
    let Some(anchor) = lines
        .iter()
        .position(|line| line.trim_start().starts_with('-') && line.contains(schema::ANCHOR))
    else {
        return Insertion::NoAnchor;
    };

    let anchor_line = lines[anchor];
    let indent_len = anchor_line.len() - anchor_line.trim_start().len();
    let new_line = format!(
        "{}{}",
        &anchor_line[..indent_len],
        schema::PROCESSOR_LINE.trim()
    );

    lines.insert(anchor + 1, &new_line);
    Insertion::Inserted(lines.join("\n"))
}

/// Remove every line registering the logger processor.
///
/// Returns `None` when no such line exists.
pub fn remove_processor(content: &str) -> Option<String> {
    let entry = schema::PROCESSOR_LINE.trim();
    let lines: Vec<&str> = content.split('\n').collect();
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.contains(entry))
        .collect();

    if kept.len() == lines.len() {
        None
    } else {
        Some(kept.join("\n"))
    }
}

/// Register the logger in the schema file at `path`, keeping a `.bak` copy.
pub fn patch_schema_file(path: &Path) -> Result<SchemaChange> {
    if !path.is_file() {
        return Err(RimeLogError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    match insert_processor(&content) {
        Insertion::AlreadyConfigured => Ok(SchemaChange::Unchanged),
        Insertion::NoAnchor => Err(RimeLogError::SchemaAnchorMissing(
            path.display().to_string(),
        )),
        Insertion::Inserted(updated) => {
            let backup = backup_path(path, schema::INSTALL_BACKUP_SUFFIX);
            fs::copy(path, &backup)?;
            fs::write(path, updated)?;
            Ok(SchemaChange::Updated { backup })
        }
    }
}

/// Unregister the logger from the schema file at `path`, keeping a
/// `.uninstall.bak` copy. A missing schema file is not an error.
pub fn revert_schema_file(path: &Path) -> Result<SchemaChange> {
    if !path.is_file() {
        return Ok(SchemaChange::Missing);
    }

    let content = fs::read_to_string(path)?;
    match remove_processor(&content) {
        None => Ok(SchemaChange::Unchanged),
        Some(updated) => {
            let backup = backup_path(path, schema::UNINSTALL_BACKUP_SUFFIX);
            fs::copy(path, &backup)?;
            fs::write(path, updated)?;
            Ok(SchemaChange::Updated { backup })
        }
    }
}

fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = "schema:\n  schema_id: wanxiang\nengine:\n  processors:\n    - ascii_composer\n    - recognizer\n    - punctuator\n    - selector\n    - express_editor\n";

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn inserted(content: &str) -> String {
        match insert_processor(content) {
            Insertion::Inserted(updated) => updated,
            other => panic!("Expected insertion, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_processor_after_punctuator() {
        let updated = inserted(SCHEMA);
        let lines: Vec<&str> = updated.lines().collect();

        assert_eq!(lines[6], "    - punctuator");
        assert_eq!(
            lines[7],
            "    - lua_processor@*input_habit_logger #输入习惯记录器 - 记录用户输入习惯"
        );
        assert_eq!(lines[8], "    - selector");
        assert!(updated.ends_with('\n'));
        assert!(is_configured(&updated));
    }

    #[test]
    fn test_insert_processor_is_idempotent() {
        let updated = inserted(SCHEMA);
        assert_eq!(insert_processor(&updated), Insertion::AlreadyConfigured);
    }

    #[test]
    fn test_insert_processor_ignores_non_list_mentions() {
        let schema = "# punctuator settings below\npunctuator:\n  import_preset: symbols\nprocessors:\n\t- punctuator\n";
        let updated = inserted(schema);
        let lines: Vec<&str> = updated.lines().collect();

        assert_eq!(lines[4], "\t- punctuator");
        assert!(lines[5].starts_with("\t- lua_processor@*input_habit_logger"));
    }

    #[test]
    fn test_insert_processor_without_anchor() {
        let schema = "engine:\n  processors:\n    - selector\n";
        assert_eq!(insert_processor(schema), Insertion::NoAnchor);
    }

    #[test]
    fn test_remove_processor() {
        let installed = inserted(SCHEMA);
        let reverted = remove_processor(&installed).unwrap();

        assert_eq!(reverted, SCHEMA);
        assert!(!is_configured(&reverted));
        assert_eq!(remove_processor(SCHEMA), None);
    }

    #[test]
    fn test_patch_and_revert_schema_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("wanxiang.schema.yaml");
        fs::write(&path, SCHEMA)?;

        let change = patch_schema_file(&path)?;
        let backup = dir.path().join("wanxiang.schema.yaml.bak");
        assert_eq!(
            change,
            SchemaChange::Updated {
                backup: backup.clone()
            }
        );
        assert_eq!(fs::read_to_string(&backup)?, SCHEMA);
        assert!(is_configured(&fs::read_to_string(&path)?));

        assert_eq!(patch_schema_file(&path)?, SchemaChange::Unchanged);

        let change = revert_schema_file(&path)?;
        let uninstall_backup = dir.path().join("wanxiang.schema.yaml.uninstall.bak");
        assert_eq!(
            change,
            SchemaChange::Updated {
                backup: uninstall_backup.clone()
            }
        );
        assert!(is_configured(&fs::read_to_string(&uninstall_backup)?));
        assert_eq!(fs::read_to_string(&path)?, SCHEMA);

        assert_eq!(revert_schema_file(&path)?, SchemaChange::Unchanged);
        Ok(())
    }

    #[test]
    fn test_patch_schema_file_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("absent.schema.yaml");

        assert!(matches!(
            patch_schema_file(&path),
            Err(RimeLogError::FileNotFound(_))
        ));
        assert_eq!(revert_schema_file(&path)?, SchemaChange::Missing);
        Ok(())
    }

    #[test]
    fn test_patch_schema_file_without_anchor_leaves_file_untouched() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("wanxiang.schema.yaml");
        let content = "engine:\n  processors:\n    - selector\n";
        fs::write(&path, content)?;

        assert!(matches!(
            patch_schema_file(&path),
            Err(RimeLogError::SchemaAnchorMissing(_))
        ));
        assert_eq!(fs::read_to_string(&path)?, content);
        assert!(!dir.path().join("wanxiang.schema.yaml.bak").exists());
        Ok(())
    }
}
