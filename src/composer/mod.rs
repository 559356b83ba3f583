// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Problem composer.
//!
//! Builds a problem from the holds of a board by clicking holds to cycle
//! their role. The composer is transient: it is seeded from the board (and
//! optionally an existing draft problem), and its only output is a
//! validated [`ProblemSubmission`].

pub mod roles;

use crate::models::board::{Board, BoardError};
use crate::models::hold::{Hold, HoldId, HoldRole, Point};
use crate::models::problem::{
    Problem, ProblemId, ProblemSubmission, ProblemValidationError, SubmittedHold,
};
use crate::util::geometry::{point_in_polygon, to_normalized, DevicePoint, Viewport};
use roles::{cycle, RoleColor, REQUIRED_START_HOLDS};

/// Minimum number of holds with a role in a problem.
pub const MIN_PROBLEM_HOLDS: usize = 3;

/// A board hold together with the role it has in the problem being composed.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardHold {
    pub id: HoldId,
    pub vertices: Vec<Point>,
    pub role: Option<HoldRole>,
}

impl BoardHold {
    fn new(hold: &Hold, role: Option<HoldRole>) -> Self {
        Self {
            id: hold.id,
            vertices: hold.vertices.clone(),
            role,
        }
    }

    pub fn color(&self) -> RoleColor {
        RoleColor::for_role(self.role)
    }
}

/// Number of holds per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub start: usize,
    pub hand: usize,
    pub foot: usize,
    pub finish: usize,
}

impl RoleCounts {
    pub fn total(&self) -> usize {
        self.start + self.hand + self.foot + self.finish
    }
}

/// Role assignment session for one problem.
#[derive(Debug, Clone)]
pub struct ProblemComposer {
    holds: Vec<BoardHold>,
    pub name: String,
    editing: Option<ProblemId>,
}

impl ProblemComposer {
    /// Start a new problem with every hold unselected.
    pub fn new(board: &Board) -> Self {
        Self {
            holds: board.holds.iter().map(|h| BoardHold::new(h, None)).collect(),
            name: String::new(),
            editing: None,
        }
    }

    /// Edit an existing draft problem.
    ///
    /// Roles are matched to board holds by id; holds the problem does not
    /// use stay unselected.
    pub fn for_problem(board: &Board, problem: &Problem) -> Result<Self, BoardError> {
        if !problem.is_editable() {
            return Err(BoardError::NotDraft);
        }
        Ok(Self {
            holds: board
                .holds
                .iter()
                .map(|h| BoardHold::new(h, problem.role_of(h.id)))
                .collect(),
            name: problem.name.clone(),
            editing: Some(problem.id),
        })
    }

    pub fn holds(&self) -> &[BoardHold] {
        &self.holds
    }

    /// Problem being edited, if this is not a new problem.
    pub fn editing(&self) -> Option<ProblemId> {
        self.editing
    }

    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for role in self.holds.iter().filter_map(|h| h.role) {
            match role {
                HoldRole::Start => counts.start += 1,
                HoldRole::Hand => counts.hand += 1,
                HoldRole::Foot => counts.foot += 1,
                HoldRole::Finish => counts.finish += 1,
            }
        }
        counts
    }

    /// Advance the role of one hold. Returns the new role.
    pub fn cycle_hold(&mut self, id: HoldId) -> Option<HoldRole> {
        let start_count = self.role_counts().start;
        let hold = self.holds.iter_mut().find(|h| h.id == id)?;
        hold.role = cycle(hold.role, start_count);
        log::info!(
            "Hold {} role: {}",
            id,
            hold.role.map_or("none", HoldRole::label)
        );
        hold.role
    }

    /// Topmost hold under a device position.
    pub fn hold_at(&self, device: DevicePoint, viewport: Viewport) -> Option<HoldId> {
        let point = to_normalized(device, viewport);
        self.holds
            .iter()
            .rev()
            .find(|h| point_in_polygon(point, &h.vertices))
            .map(|h| h.id)
    }

    /// Cycle whichever hold was clicked. Returns the hold, if any was hit.
    pub fn click(&mut self, device: DevicePoint, viewport: Viewport) -> Option<HoldId> {
        let id = self.hold_at(device, viewport)?;
        self.cycle_hold(id);
        Some(id)
    }

    /// Check the problem can be saved.
    pub fn validate(&self) -> Result<(), ProblemValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProblemValidationError::MissingName);
        }
        let counts = self.role_counts();
        if counts.total() < MIN_PROBLEM_HOLDS {
            return Err(ProblemValidationError::TooFewHolds {
                count: counts.total(),
            });
        }
        if counts.start != REQUIRED_START_HOLDS {
            return Err(ProblemValidationError::WrongStartCount {
                count: counts.start,
            });
        }
        Ok(())
    }

    /// Validate and produce the submission for the board.
    ///
    /// `published` selects between saving a draft and publishing.
    pub fn commit(&self, published: bool) -> Result<ProblemSubmission, ProblemValidationError> {
        if let Err(e) = self.validate() {
            log::warn!("Rejected problem commit: {}", e);
            return Err(e);
        }
        let holds = self
            .holds
            .iter()
            .filter_map(|h| {
                h.role.map(|role| SubmittedHold {
                    id: h.id,
                    role,
                    vertices: h.vertices.clone(),
                })
            })
            .collect();
        Ok(ProblemSubmission {
            name: self.name.trim().to_string(),
            holds,
            published,
        })
    }
}
