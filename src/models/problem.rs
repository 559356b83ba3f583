// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Problem (climbing route) data structures.

use super::hold::{HoldId, HoldRole, Point};
use serde::{Deserialize, Serialize};

/// Identity of a persisted problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(pub u32);

/// Publication state of a problem. Only drafts may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProblemStatus {
    Draft,
    Published,
}

/// Reference from a problem to one of the board's holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemHold {
    pub hold_id: HoldId,
    pub role: HoldRole,
}

/// A persisted problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub status: ProblemStatus,
    pub holds: Vec<ProblemHold>,
}

impl Problem {
    /// Role assigned to the given hold, if the problem uses it.
    pub fn role_of(&self, hold_id: HoldId) -> Option<HoldRole> {
        self.holds
            .iter()
            .find(|h| h.hold_id == hold_id)
            .map(|h| h.role)
    }

    pub fn is_editable(&self) -> bool {
        self.status == ProblemStatus::Draft
    }
}

/// One roled hold in a submitted problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedHold {
    pub id: HoldId,
    pub role: HoldRole,
    pub vertices: Vec<Point>,
}

/// Output of a successful problem commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSubmission {
    pub name: String,
    pub holds: Vec<SubmittedHold>,
    pub published: bool,
}

impl ProblemSubmission {
    pub fn status(&self) -> ProblemStatus {
        if self.published {
            ProblemStatus::Published
        } else {
            ProblemStatus::Draft
        }
    }
}

/// Reasons a problem commit is rejected before it reaches the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemValidationError {
    #[error("Please provide a name for the problem")]
    MissingName,
    #[error("Please select at least 3 holds (including start holds), {count} selected")]
    TooFewHolds { count: usize },
    #[error("Please select exactly 2 start holds, {count} selected")]
    WrongStartCount { count: usize },
}
