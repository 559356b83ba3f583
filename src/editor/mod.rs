// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hold geometry editor.
//!
//! The editor owns the working set of hold outlines for one board while it
//! is being edited. Outlines are authored point by point on the empty
//! canvas (see [`authoring`]) and, once closed, can be selected, moved,
//! reshaped and deleted (see [`manipulation`]). All coordinates are
//! normalized; device pixels only enter through the [`Viewport`] passed to
//! each pointer operation.

pub mod authoring;
pub mod manipulation;

use crate::config::AppConfig;
use crate::models::hold::{Hold, HoldDraft, HoldId, Point};
use crate::util::geometry::{distance, point_in_polygon, to_normalized, DevicePoint, Viewport};

/// A polygon outline in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Identity of the persisted hold this shape was seeded from.
    pub id: Option<HoldId>,
    pub points: Vec<Point>,
    pub is_closed: bool,
}

impl Shape {
    fn from_hold(hold: &Hold) -> Self {
        Self {
            id: Some(hold.id),
            points: hold.vertices.clone(),
            is_closed: true,
        }
    }
}

/// What a pointer position lands on, resolved in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Background,
    Shape(usize),
    Vertex { shape: usize, vertex: usize },
}

/// Result of a pointer interaction, mostly for logging and the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Ignored,
    PointAdded,
    ShapeClosed(usize),
    Selected(usize),
}

/// Drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Vertex { shape: usize, vertex: usize },
    Shape { shape: usize, last: Point },
}

/// Interactive editor for the holds of one board.
#[derive(Debug, Clone)]
pub struct HoldEditor {
    /// Completed (closed) shapes.
    shapes: Vec<Shape>,
    /// Points of the shape being authored.
    current: Vec<Point>,
    selected: Option<usize>,
    drag: Option<Drag>,
    close_threshold_px: f64,
    vertex_hit_radius_px: f64,
}

impl HoldEditor {
    /// Create an editor seeded with the board's existing holds.
    pub fn new(holds: &[Hold], config: &AppConfig) -> Self {
        Self {
            shapes: holds.iter().map(Shape::from_hold).collect(),
            current: Vec::new(),
            selected: None,
            drag: None,
            close_threshold_px: config.close_threshold_px,
            vertex_hit_radius_px: config.vertex_hit_radius_px,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn current_shape(&self) -> &[Point] {
        &self.current
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Saving needs at least one completed shape.
    pub fn can_commit(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Resolve what lies under a device position.
    ///
    /// Vertex handles exist only for the selected shape and sit on top of
    /// everything; later shapes are drawn over earlier ones.
    pub fn hit_test(&self, device: DevicePoint, viewport: Viewport) -> HitTarget {
        let point = to_normalized(device, viewport);

        if let Some(index) = self.selected {
            if let Some(shape) = self.shapes.get(index) {
                let hit = shape
                    .points
                    .iter()
                    .rposition(|v| distance(*v, point, viewport) <= self.vertex_hit_radius_px);
                if let Some(vertex) = hit {
                    return HitTarget::Vertex { shape: index, vertex };
                }
            }
        }

        self.shapes
            .iter()
            .rposition(|s| point_in_polygon(point, &s.points))
            .map_or(HitTarget::Background, HitTarget::Shape)
    }

    /// Dispatch a click to whatever it landed on.
    pub fn click(&mut self, device: DevicePoint, viewport: Viewport) -> EditorEvent {
        match self.hit_test(device, viewport) {
            // Vertex handles swallow clicks so they never reach the background.
            HitTarget::Vertex { .. } => EditorEvent::Ignored,
            HitTarget::Shape(index) => {
                self.select_shape(index);
                EditorEvent::Selected(index)
            }
            target @ HitTarget::Background => self.handle_pointer_down(target, device, viewport),
        }
    }

    /// Serialize the working set for the board.
    ///
    /// Shapes seeded from existing holds keep their id; new ones have none.
    pub fn commit(&self) -> Vec<HoldDraft> {
        self.shapes
            .iter()
            .map(|s| HoldDraft {
                id: s.id,
                vertices: s.points.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn viewport() -> Viewport {
        Viewport::new(1000.0, 500.0).unwrap()
    }

    pub(crate) fn px(x: f64, y: f64) -> DevicePoint {
        DevicePoint::new(x, y)
    }

    pub(crate) fn empty_editor() -> HoldEditor {
        HoldEditor::new(&[], &AppConfig::default())
    }

    /// Author a closed triangle whose first vertex sits at `(x, y)` px.
    pub(crate) fn draw_triangle(editor: &mut HoldEditor, x: f64, y: f64) -> usize {
        let vp = viewport();
        editor.click(px(x, y), vp);
        editor.click(px(x + 100.0, y), vp);
        editor.click(px(x + 50.0, y + 100.0), vp);
        match editor.click(px(x + 2.0, y + 2.0), vp) {
            EditorEvent::ShapeClosed(index) => index,
            other => panic!("expected shape to close, got {:?}", other),
        }
    }

    fn holds() -> Vec<Hold> {
        vec![
            Hold {
                id: HoldId(7),
                vertices: vec![
                    Point::new(0.1, 0.1),
                    Point::new(0.2, 0.1),
                    Point::new(0.2, 0.3),
                    Point::new(0.1, 0.1),
                ],
            },
            Hold {
                id: HoldId(9),
                vertices: vec![
                    Point::new(0.5, 0.5),
                    Point::new(0.7, 0.5),
                    Point::new(0.6, 0.8),
                    Point::new(0.5, 0.5),
                ],
            },
        ]
    }

    #[test]
    fn test_commit_without_edits_round_trips() {
        let holds = holds();
        let editor = HoldEditor::new(&holds, &AppConfig::default());
        let drafts = editor.commit();

        assert_eq!(drafts.len(), holds.len());
        for (draft, hold) in drafts.iter().zip(&holds) {
            assert_eq!(draft.id, Some(hold.id));
            assert_eq!(draft.vertices, hold.vertices);
        }
    }

    #[test]
    fn test_new_shapes_commit_without_id() {
        let mut editor = HoldEditor::new(&holds(), &AppConfig::default());
        draw_triangle(&mut editor, 800.0, 20.0);

        let drafts = editor.commit();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].id, Some(HoldId(7)));
        assert_eq!(drafts[1].id, Some(HoldId(9)));
        assert_eq!(drafts[2].id, None);
    }

    #[test]
    fn test_hit_test_prefers_topmost_shape() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        let mut overlapping = editor.shapes[0].clone();
        overlapping.points = overlapping.points.iter().map(|p| p.offset(0.01, 0.0)).collect();
        editor.shapes.push(overlapping);

        // Inside both triangles
        assert_eq!(editor.hit_test(px(150.0, 120.0), viewport()), HitTarget::Shape(1));
        assert_eq!(editor.hit_test(px(900.0, 400.0), viewport()), HitTarget::Background);
    }

    #[test]
    fn test_vertex_handles_only_for_selected_shape() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        let vp = viewport();

        // Near the apex but outside the polygon
        assert_eq!(editor.hit_test(px(150.0, 204.0), vp), HitTarget::Background);

        editor.select_shape(0);
        assert_eq!(
            editor.hit_test(px(150.0, 204.0), vp),
            HitTarget::Vertex { shape: 0, vertex: 2 }
        );
    }

    #[test]
    fn test_click_on_shape_selects_without_authoring() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);

        let event = editor.click(px(150.0, 120.0), viewport());
        assert_eq!(event, EditorEvent::Selected(0));
        assert!(editor.current_shape().is_empty());
        assert_eq!(editor.selected(), Some(0));
    }

    #[test]
    fn test_click_on_vertex_is_consumed() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        editor.select_shape(0);

        let event = editor.click(px(200.0, 100.0), viewport());
        assert_eq!(event, EditorEvent::Ignored);
        assert!(editor.current_shape().is_empty());
        assert_eq!(editor.selected(), Some(0));
    }
}
