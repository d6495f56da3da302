//! Run report for a compile.
//!
//! Issues are warnings only: the documented quirks that the compiler lets
//! through instead of aborting. Hard failures are [`PrepError`](crate::PrepError)s.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, Default, Serialize)]
pub struct PrepReport {
    pub counts: PrepCounts,
    pub issues: Vec<PrepIssue>,
}

impl PrepReport {
    pub fn add(&mut self, issue: PrepIssue) {
        self.issues.push(issue);
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issue(&self, code: PrepIssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

impl fmt::Display for PrepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = &self.counts;
        writeln!(
            f,
            "  {} rows, {} images, {} classes",
            counts.rows, counts.images, counts.classes
        )?;
        writeln!(f, "  split: {} train, {} test", counts.train, counts.test)?;

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrepCounts {
    pub rows: usize,
    pub images: usize,
    pub classes: usize,
    pub train: usize,
    pub test: usize,
    pub out_of_bounds_boxes: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct PrepIssue {
    pub code: PrepIssueCode,
    pub message: String,
}

impl PrepIssue {
    pub fn new(code: PrepIssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Stable issue codes; part of the JSON report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepIssueCode {
    /// Boxes extending past the image edge were written unclamped.
    BoxOutOfBounds,
    /// An image's rows were not adjacent; its label file holds only the last group.
    NonContiguousImage,
    /// Every image went to the test split.
    EmptyTrainSplit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_warnings() {
        let report = PrepReport::default();
        assert_eq!(report.warning_count(), 0);
        assert!(!report.has_issue(PrepIssueCode::EmptyTrainSplit));
    }

    #[test]
    fn report_display_lists_warnings() {
        let mut report = PrepReport::default();
        report.counts.rows = 3;
        report.counts.images = 2;
        report.add(PrepIssue::new(
            PrepIssueCode::EmptyTrainSplit,
            "all 2 images went to the test split",
        ));

        let text = report.to_string();
        assert!(text.contains("3 rows, 2 images"));
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("all 2 images went to the test split"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = PrepReport::default();
        report.add(PrepIssue::new(
            PrepIssueCode::NonContiguousImage,
            "image 'a.jpg' reappears",
        ));

        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("\"code\":\"non_contiguous_image\""));
        assert!(json.contains("\"out_of_bounds_boxes\":0"));
    }
}
