// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for boards, holds and problems.

pub mod board;
pub mod hold;
pub mod problem;
