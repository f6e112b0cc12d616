use std::path::PathBuf;

use serde::Serialize;

/// Sentinel year used so specimen papers sort ahead of every dated entry.
pub const SPECIMEN_YEAR: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    June,
    November,
    Specimen,
}

impl Season {
    /// Display form used in exam labels.
    pub fn label(self) -> &'static str {
        match self {
            Self::June => "June",
            Self::November => "Nov.",
            Self::Specimen => "Specimen",
        }
    }

    /// Directory name used in the on-disk year/season layout.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::June => "June",
            Self::November => "November",
            Self::Specimen => "Specimen",
        }
    }

    /// June sorts before November within a year.
    pub fn sort_rank(self) -> u8 {
        match self {
            Self::June => 0,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    Ms,
    Qp,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ms => "MS",
            Self::Qp => "QP",
        }
    }

    pub const ALL: [DocType; 2] = [DocType::Ms, DocType::Qp];
}

/// One validated paper discovered under the archive tree. Immutable after the
/// scan; the merge input list and the index offsets are both derived from the
/// same ordered list of these.
#[derive(Debug, Clone)]
pub struct PaperEntry {
    pub year: u32,
    pub season: Season,
    pub label: String,
    pub page_count: usize,
    pub path: PathBuf,
    pub is_specimen: bool,
}

/// One row of the generated page index for a merged volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub sequence_number: usize,
    pub exam_label: String,
    pub start_page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadedFile {
    pub filename: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadSummary {
    pub manifest_version: u32,
    pub generated_at: String,
    pub subject: String,
    pub base_url: String,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<DownloadedFile>,
}

/// Result of a health-check pass, returned from the scan rather than kept as
/// process-wide counters so repeated runs need no reset step.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CheckStats {
    pub total_files: usize,
    pub healthy_files: usize,
    pub damaged_files: usize,
    pub moved_files: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanStats {
    pub total: usize,
    pub cleaned: usize,
    pub failed: usize,
}
