// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hold role cycling and the role color key.

use crate::models::hold::HoldRole;

/// Number of start holds a problem must have.
pub const REQUIRED_START_HOLDS: usize = 2;

/// Next role for a clicked hold.
///
/// `start_count` is the number of start holds on the board before this
/// click. Once both start holds are placed, unselected holds go straight
/// to hand and a finish hold cycles back to unselected.
pub fn cycle(role: Option<HoldRole>, start_count: usize) -> Option<HoldRole> {
    let starts_available = start_count < REQUIRED_START_HOLDS;
    match role {
        None if starts_available => Some(HoldRole::Start),
        None => Some(HoldRole::Hand),
        Some(HoldRole::Start) => Some(HoldRole::Hand),
        Some(HoldRole::Hand) => Some(HoldRole::Foot),
        Some(HoldRole::Foot) => Some(HoldRole::Finish),
        Some(HoldRole::Finish) if starts_available => Some(HoldRole::Start),
        Some(HoldRole::Finish) => None,
    }
}

/// RGBA fill used to draw a hold with the given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RoleColor {
    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color key: grey unselected, green start, blue hand, yellow foot, red finish.
    pub fn for_role(role: Option<HoldRole>) -> Self {
        match role {
            None => Self::rgba(200, 200, 200, 128),
            Some(HoldRole::Start) => Self::rgba(0, 255, 0, 128),
            Some(HoldRole::Hand) => Self::rgba(0, 0, 255, 128),
            Some(HoldRole::Foot) => Self::rgba(255, 255, 0, 128),
            Some(HoldRole::Finish) => Self::rgba(255, 0, 0, 128),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unselected_becomes_start_until_two() {
        assert_eq!(cycle(None, 0), Some(HoldRole::Start));
        assert_eq!(cycle(None, 1), Some(HoldRole::Start));
        assert_eq!(cycle(None, 2), Some(HoldRole::Hand));
    }

    #[test]
    fn test_fixed_transitions_ignore_start_count() {
        for count in 0..=3 {
            assert_eq!(cycle(Some(HoldRole::Start), count), Some(HoldRole::Hand));
            assert_eq!(cycle(Some(HoldRole::Hand), count), Some(HoldRole::Foot));
            assert_eq!(cycle(Some(HoldRole::Foot), count), Some(HoldRole::Finish));
        }
    }

    #[test]
    fn test_finish_wraps_around() {
        assert_eq!(cycle(Some(HoldRole::Finish), 0), Some(HoldRole::Start));
        assert_eq!(cycle(Some(HoldRole::Finish), 1), Some(HoldRole::Start));
        assert_eq!(cycle(Some(HoldRole::Finish), 2), None);
    }

    #[test]
    fn test_color_key() {
        assert_eq!(RoleColor::for_role(None), RoleColor::rgba(200, 200, 200, 128));
        assert_eq!(RoleColor::for_role(Some(HoldRole::Start)).g, 255);
        assert_eq!(RoleColor::for_role(Some(HoldRole::Hand)).b, 255);
        assert_eq!(RoleColor::for_role(Some(HoldRole::Finish)).r, 255);
    }
}
