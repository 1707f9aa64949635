//! CSV export of the mis-prediction report.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analysis::MissRow;
use crate::core::constants::{files, report};
use crate::core::error::{Result, RimeLogError};

/// What an export wrote and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows_written: usize,
    pub path: PathBuf,
}

/// Default report destination: `<home>/rime_mispredictions_report.csv`
pub fn default_report_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(files::REPORT_FILE))
        .ok_or_else(|| RimeLogError::Config("Could not determine the home directory".to_string()))
}

/// Write `rows` to `path` as a UTF-8 (with BOM) CSV file.
///
/// The report is written next to the destination first and renamed over it
/// once complete. On failure the temporary file is removed and any existing
/// report at `path` is left untouched.
pub fn write_miss_report<P: AsRef<Path>>(rows: &[MissRow], path: P) -> Result<ExportSummary> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(RimeLogError::InvalidArgument(format!(
            "report path '{}' is a directory",
            path.display()
        )));
    }
    let partial = partial_path(path);

    let written = write_rows(rows, &partial)
        .and_then(|()| fs::rename(&partial, path).map_err(RimeLogError::from));
    if let Err(err) = written {
        let _ = fs::remove_file(&partial);
        return Err(RimeLogError::Export {
            destination: path.display().to_string(),
            temporary: partial.display().to_string(),
            source: Box::new(err),
        });
    }

    Ok(ExportSummary {
        rows_written: rows.len(),
        path: path.to_path_buf(),
    })
}

fn write_rows(rows: &[MissRow], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(report::UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(report::HEADERS)?;
    for row in rows {
        let rank = row.selected_rank.to_string();
        let frequency = row.miss_frequency.to_string();
        writer.write_record([
            row.user_input.as_deref().unwrap_or_default(),
            row.selected_text.as_deref().unwrap_or_default(),
            row.predicted_text.as_deref().unwrap_or_default(),
            rank.as_str(),
            frequency.as_str(),
        ])?;
    }

    let mut out = writer.into_inner().map_err(|err| {
        RimeLogError::Io(std::io::Error::new(err.error().kind(), err.error().to_string()))
    })?;
    out.flush()?;
    out.get_ref().sync_all()?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| files::REPORT_FILE.into());
    name.push(report::PARTIAL_SUFFIX);
    path.with_file_name(name)
}
