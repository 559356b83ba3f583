// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for board images and board files.

pub mod media;
pub mod serialization;
