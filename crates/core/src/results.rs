//! Filterable views over the final result list.
//!
//! Active once a session completes: a fixed set of named filter tabs,
//! each with a live count derived from the current result snapshot, and
//! the filtered row view for the selected tab. Upload kinds whose
//! servers report only failed rows get the reduced tab pair.

use crate::kind::UploadKind;
use crate::record::{RowResult, RowStatus};

/// A named result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFilter {
    All,
    Created,
    Updated,
    Skipped,
    Failed,
    /// "All Failed" tab of failed-only uploads (every reported row).
    AllFailed,
}

impl ResultFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Skipped => "Skipped",
            Self::Failed => "Failed",
            Self::AllFailed => "All Failed",
        }
    }

    /// Whether a row belongs to this category.
    pub fn matches(&self, row: &RowResult) -> bool {
        match self {
            Self::All | Self::AllFailed => true,
            Self::Created => row.status == RowStatus::Created,
            Self::Updated => row.status == RowStatus::Updated,
            Self::Skipped => row.status == RowStatus::Skipped,
            Self::Failed => row.status == RowStatus::Failed,
        }
    }
}

/// One filter tab with its live count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTab {
    pub filter: ResultFilter,
    pub count: usize,
}

impl FilterTab {
    pub fn label(&self) -> &'static str {
        self.filter.label()
    }
}

/// Build the tab set for an upload kind from the current results.
pub fn filter_tabs(kind: UploadKind, results: &[RowResult]) -> Vec<FilterTab> {
    let count_of = |status: RowStatus| results.iter().filter(|r| r.status == status).count();

    if kind.failed_only_results() {
        vec![
            FilterTab {
                filter: ResultFilter::AllFailed,
                count: results.len(),
            },
            FilterTab {
                filter: ResultFilter::Failed,
                count: count_of(RowStatus::Failed),
            },
        ]
    } else {
        vec![
            FilterTab {
                filter: ResultFilter::All,
                count: results.len(),
            },
            FilterTab {
                filter: ResultFilter::Created,
                count: count_of(RowStatus::Created),
            },
            FilterTab {
                filter: ResultFilter::Updated,
                count: count_of(RowStatus::Updated),
            },
            FilterTab {
                filter: ResultFilter::Skipped,
                count: count_of(RowStatus::Skipped),
            },
            FilterTab {
                filter: ResultFilter::Failed,
                count: count_of(RowStatus::Failed),
            },
        ]
    }
}

/// The rows belonging to the selected category.
pub fn filtered<'a>(results: &'a [RowResult], filter: ResultFilter) -> Vec<&'a RowResult> {
    results.iter().filter(|r| filter.matches(r)).collect()
}
