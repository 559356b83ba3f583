// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Board file serialization and deserialization.
//!
//! This module handles saving and loading boards in YAML and JSON
//! formats, chosen by file extension.

use crate::models::board::Board;
use anyhow::{bail, Result};
use std::path::Path;

/// Board file extensions offered in file dialogs.
pub const BOARD_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Save a board, picking the format from the file extension.
pub fn save_board(board: &Board, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(board, path),
        Some("json") => export_json(board, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Load a board, picking the format from the file extension.
pub fn load_board(path: &Path) -> Result<Board> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Export a board to YAML format.
pub fn export_yaml(board: &Board, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(board)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a board to JSON format.
pub fn export_json(board: &Board, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a board from YAML format.
pub fn import_yaml(path: &Path) -> Result<Board> {
    let yaml = std::fs::read_to_string(path)?;
    let board = serde_yaml::from_str(&yaml)?;
    Ok(board)
}

/// Import a board from JSON format.
pub fn import_json(path: &Path) -> Result<Board> {
    let json = std::fs::read_to_string(path)?;
    let board = serde_json::from_str(&json)?;
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hold::{HoldDraft, Point};

    fn sample_board() -> Board {
        let mut board = Board::new("Garage wall".to_string(), "garage.jpg".to_string());
        board
            .apply_hold_edits(vec![HoldDraft {
                id: None,
                vertices: vec![
                    Point::new(0.1, 0.1),
                    Point::new(0.3, 0.1),
                    Point::new(0.2, 0.25),
                    Point::new(0.1, 0.1),
                ],
            }])
            .unwrap();
        board
    }

    #[test]
    fn test_yaml_and_json_files() {
        let board = sample_board();
        for name in ["bloc_board_test.yaml", "bloc_board_test.json"] {
            let path = std::env::temp_dir().join(name);
            save_board(&board, &path).unwrap();
            let loaded = load_board(&path).unwrap();
            std::fs::remove_file(&path).ok();

            assert_eq!(loaded.name, board.name);
            assert_eq!(loaded.holds, board.holds);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("bloc_board_test.txt");
        assert!(save_board(&sample_board(), &path).is_err());
        assert!(load_board(&path).is_err());
    }

    #[test]
    fn test_hand_written_board_without_counters() {
        let yaml = "\
name: Cave
image_file: cave.png
holds:
  - id: 4
    vertices:
      - { x: 0.1, y: 0.1 }
      - { x: 0.2, y: 0.1 }
      - { x: 0.15, y: 0.2 }
      - { x: 0.1, y: 0.1 }
";
        let mut board: Board = serde_yaml::from_str(yaml).unwrap();
        let mut drafts: Vec<HoldDraft> = board
            .holds
            .iter()
            .map(|h| HoldDraft { id: Some(h.id), vertices: h.vertices.clone() })
            .collect();
        drafts.push(drafts[0].clone());
        drafts[1].id = None;
        board.apply_hold_edits(drafts).unwrap();

        let ids: Vec<u32> = board.holds.iter().map(|h| h.id.0).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
