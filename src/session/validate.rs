use std::collections::HashSet;

use crate::{
    geometry::grid::GridConfig,
    session::rounds::{RoundData, RoundsMap},
};

/// Overall verdict severity. Ordered: `Valid < Warning < Error`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No issues found.
    #[default]
    Valid,
    /// Recoverable problems (missing metadata, empty rounds); export can proceed.
    Warning,
    /// Structurally impossible data; export should be blocked.
    Error,
}

impl ValidationStatus {
    /// Raise to `to` if that is more severe. Never lowers.
    pub fn escalate(&mut self, to: ValidationStatus) {
        if to > *self {
            *self = to;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub total_rounds: usize,
    pub total_images: usize,
    pub images_per_round: Vec<usize>,
    /// Unique cells with content, per round.
    pub cell_coverage: Vec<usize>,
}

/// Result of [`validate_session`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    /// Human-readable issues in detection order.
    pub issues: Vec<String>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    /// `false` only for [`ValidationStatus::Error`].
    pub fn is_exportable(&self) -> bool {
        self.status != ValidationStatus::Error
    }

    fn raise(&mut self, status: ValidationStatus, issue: String) {
        self.status.escalate(status);
        self.issues.push(issue);
    }
}

/// Check recorded rounds for completeness and structural consistency before export.
///
/// Never fails and never mutates its inputs: every problem found is collected into the returned
/// [`ValidationResult`], whose status is the most severe problem seen.
#[tracing::instrument(skip_all, fields(rounds = rounds.len()))]
pub fn validate_session(rounds: &RoundsMap, grid: &GridConfig) -> ValidationResult {
    let mut out = ValidationResult {
        stats: ValidationStats {
            total_rounds: rounds.len(),
            ..ValidationStats::default()
        },
        ..ValidationResult::default()
    };
    let max_cells = grid.max_possible_cells();

    for (ts, round) in rounds.iter() {
        check_round(ts, round, max_cells, &mut out);
    }

    if out.stats.total_rounds > 0
        && out.stats.total_images == 0
        && out.status == ValidationStatus::Valid
    {
        out.raise(
            ValidationStatus::Warning,
            "Session contains rounds, but no valid images were found in any round.".to_string(),
        );
    }

    tracing::debug!(
        target: "writepad::validate",
        status = ?out.status,
        issues = out.issues.len(),
        total_images = out.stats.total_images,
        "session validated"
    );
    out
}

fn check_round(ts: &str, round: &RoundData, max_cells: u64, out: &mut ValidationResult) {
    let images = &round.images;
    if images.is_empty() {
        out.raise(ValidationStatus::Warning, format!("Round {ts} has no images"));
        out.stats.images_per_round.push(0);
        out.stats.cell_coverage.push(0);
        return;
    }

    let mut unique_cells = HashSet::new();
    for drawing in images {
        match drawing.metadata.as_ref().and_then(|m| m.cell()) {
            Some(cell) => {
                unique_cells.insert(cell);
            }
            None => out.raise(
                ValidationStatus::Warning,
                format!("Round {ts} has an image missing row/col metadata."),
            ),
        }
    }

    out.stats.images_per_round.push(images.len());
    out.stats.total_images += images.len();
    out.stats.cell_coverage.push(unique_cells.len());

    let unique = unique_cells.len() as u64;
    let count = images.len() as u64;
    if unique > max_cells {
        out.raise(
            ValidationStatus::Error,
            format!(
                "Round {ts} has more unique drawing cells ({unique}) than the grid allows ({max_cells})"
            ),
        );
    } else if count > max_cells {
        // Several images may legitimately share one cell.
        out.raise(
            ValidationStatus::Warning,
            format!(
                "Round {ts} has more images ({count}) than available cells ({max_cells}). This might indicate duplicates or unexpected data."
            ),
        );
    }

    let all_have_dimensions = images.iter().all(|d| {
        d.metadata
            .as_ref()
            .is_some_and(|m| m.has_cell_dimensions())
    });
    if !all_have_dimensions {
        out.raise(
            ValidationStatus::Warning,
            format!("Round {ts} has images missing cell dimension metadata"),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/validate.rs"]
mod tests;
