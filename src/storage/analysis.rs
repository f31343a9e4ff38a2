//! Analysis snapshot store backed by one `analisis_MM.txt` file per month

use crate::config::paths::KantongPaths;
use crate::error::KantongResult;
use crate::models::{Month, MonthlyAnalysis};

use super::codec::{decode_all, format_line, ParseMode};
use super::file_io::{read_lines, write_lines_atomic};

/// Repository for monthly analysis snapshots
pub struct AnalysisStore {
    paths: KantongPaths,
    mode: ParseMode,
}

impl AnalysisStore {
    pub fn new(paths: KantongPaths, mode: ParseMode) -> Self {
        Self { paths, mode }
    }

    pub fn exists(&self, month: Month) -> bool {
        self.paths.analysis_file(month).exists()
    }

    /// Load the stored snapshot, if any
    ///
    /// Only the first decodable line is used.
    pub fn load(&self, month: Month) -> KantongResult<Option<MonthlyAnalysis>> {
        let lines = read_lines(self.paths.analysis_file(month))?;
        Ok(decode_all::<MonthlyAnalysis>(&lines, self.mode)?
            .into_iter()
            .next())
    }

    /// Overwrite the month's snapshot
    pub fn save(&self, month: Month, analysis: &MonthlyAnalysis) -> KantongResult<()> {
        write_lines_atomic(self.paths.analysis_file(month), &[format_line(analysis)])
    }

    /// Write a zeroed snapshot if the month has none
    pub fn init_month(&self, month: Month) -> KantongResult<()> {
        if self.exists(month) {
            return Ok(());
        }
        self.save(month, &MonthlyAnalysis::default())
    }
}
