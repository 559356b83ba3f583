// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Board state management.
//!
//! A board is one wall photograph together with the holds outlined on it
//! and the problems set using those holds. This is the persisted side of
//! the application: the editors hand their results here.

use super::hold::{Hold, HoldDraft, HoldId, HoldValidationError};
use super::problem::{Problem, ProblemHold, ProblemId, ProblemSubmission};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors raised when applying edits to a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("hold {index} is invalid: {source}")]
    InvalidHold {
        index: usize,
        #[source]
        source: HoldValidationError,
    },
    #[error("hold {0} does not exist on this board")]
    UnknownHold(HoldId),
    #[error("hold {0} appears more than once")]
    DuplicateHold(HoldId),
    #[error("hold {hold} is used by published problem '{problem}'")]
    HoldInPublishedProblem { hold: HoldId, problem: String },
    #[error("problem {0:?} not found")]
    ProblemNotFound(ProblemId),
    #[error("can only edit problems in draft status")]
    NotDraft,
}

/// Complete board data for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub image_file: String,
    #[serde(default)]
    pub holds: Vec<Hold>,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    next_hold_id: u32,
    #[serde(default)]
    next_problem_id: u32,
}

impl Board {
    /// Create a new, empty board for the given image file.
    pub fn new(name: String, image_file: String) -> Self {
        Self {
            name,
            image_file,
            holds: Vec::new(),
            problems: Vec::new(),
            next_hold_id: 1,
            next_problem_id: 1,
        }
    }

    pub fn hold(&self, id: HoldId) -> Option<&Hold> {
        self.holds.iter().find(|h| h.id == id)
    }

    pub fn problem(&self, id: ProblemId) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    /// Replace the board's holds with the editor's output.
    ///
    /// Drafts carrying an id keep it, new drafts get a fresh id. Holds that
    /// are no longer present are removed from every draft problem; removing
    /// a hold a published problem uses is refused. The board is left
    /// untouched if any draft is invalid.
    pub fn apply_hold_edits(&mut self, drafts: Vec<HoldDraft>) -> Result<(), BoardError> {
        let drafts: Vec<HoldDraft> = drafts
            .into_iter()
            .map(|d| HoldDraft {
                id: d.id,
                vertices: d.vertices.into_iter().map(|p| p.clamped()).collect(),
            })
            .collect();

        for (index, draft) in drafts.iter().enumerate() {
            draft
                .validate()
                .map_err(|source| BoardError::InvalidHold { index, source })?;
        }

        let mut seen = HashSet::new();
        for id in drafts.iter().filter_map(|d| d.id) {
            if self.hold(id).is_none() {
                return Err(BoardError::UnknownHold(id));
            }
            if !seen.insert(id) {
                return Err(BoardError::DuplicateHold(id));
            }
        }

        for problem in self.problems.iter().filter(|p| !p.is_editable()) {
            if let Some(removed) = problem.holds.iter().find(|h| !seen.contains(&h.hold_id)) {
                return Err(BoardError::HoldInPublishedProblem {
                    hold: removed.hold_id,
                    problem: problem.name.clone(),
                });
            }
        }

        let mut next_id = self.next_id_floor();
        let holds: Vec<Hold> = drafts
            .into_iter()
            .map(|d| {
                let id = d.id.unwrap_or_else(|| {
                    let id = HoldId(next_id);
                    next_id += 1;
                    id
                });
                Hold { id, vertices: d.vertices }
            })
            .collect();

        let kept: HashSet<HoldId> = holds.iter().map(|h| h.id).collect();
        for problem in &mut self.problems {
            problem.holds.retain(|h| kept.contains(&h.hold_id));
        }

        log::info!(
            "Applied hold edits to board '{}', total holds: {}",
            self.name,
            holds.len()
        );
        self.holds = holds;
        self.next_hold_id = next_id;
        Ok(())
    }

    /// Store a new problem built from a validated submission.
    pub fn submit_problem(&mut self, submission: ProblemSubmission) -> Result<ProblemId, BoardError> {
        let holds = self.problem_holds(&submission)?;
        let max_used = self.problems.iter().map(|p| p.id.0).max().unwrap_or(0);
        let id = ProblemId(self.next_problem_id.max(max_used + 1));
        self.next_problem_id = id.0 + 1;
        self.problems.push(Problem {
            id,
            name: submission.name.clone(),
            grade: None,
            status: submission.status(),
            holds,
        });
        log::info!("Created problem '{}' ({:?})", submission.name, submission.status());
        Ok(id)
    }

    /// Replace an existing draft problem with a new submission.
    pub fn update_problem(
        &mut self,
        id: ProblemId,
        submission: ProblemSubmission,
    ) -> Result<(), BoardError> {
        let holds = self.problem_holds(&submission)?;
        let problem = self
            .problems
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BoardError::ProblemNotFound(id))?;
        if !problem.is_editable() {
            return Err(BoardError::NotDraft);
        }
        problem.name = submission.name.clone();
        problem.status = submission.status();
        problem.holds = holds;
        log::info!("Updated problem '{}' ({:?})", submission.name, submission.status());
        Ok(())
    }

    fn problem_holds(&self, submission: &ProblemSubmission) -> Result<Vec<ProblemHold>, BoardError> {
        submission
            .holds
            .iter()
            .map(|h| {
                self.hold(h.id).ok_or(BoardError::UnknownHold(h.id))?;
                Ok(ProblemHold { hold_id: h.id, role: h.role })
            })
            .collect()
    }

    // Files written by hand may omit the counters.
    fn next_id_floor(&self) -> u32 {
        let max_used = self.holds.iter().map(|h| h.id.0).max().unwrap_or(0);
        self.next_hold_id.max(max_used + 1)
    }
}
