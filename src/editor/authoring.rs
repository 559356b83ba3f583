// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Incremental polygon authoring.
//!
//! Clicking the empty canvas appends a vertex to the shape in progress.
//! Clicking back within the closing threshold of its first vertex closes
//! the shape once it has at least two other vertices, so a closed shape
//! always has three or more distinct points.

use super::{EditorEvent, HitTarget, HoldEditor, Shape};
use crate::util::geometry::{distance, to_normalized, DevicePoint, Viewport};

impl HoldEditor {
    /// Handle a press on the canvas while authoring.
    ///
    /// Only presses on the background (stage or base image) author; hits on
    /// shapes and vertices belong to manipulation and are ignored here.
    pub fn handle_pointer_down(
        &mut self,
        target: HitTarget,
        device: DevicePoint,
        viewport: Viewport,
    ) -> EditorEvent {
        if target != HitTarget::Background {
            return EditorEvent::Ignored;
        }

        let point = to_normalized(device, viewport);
        self.deselect();

        if let Some(&first) = self.current.first() {
            let to_first = distance(first, point, viewport);
            if to_first < self.close_threshold_px && self.current.len() >= 2 {
                let mut points = std::mem::take(&mut self.current);
                points.push(first);
                self.shapes.push(Shape {
                    id: None,
                    points,
                    is_closed: true,
                });
                let index = self.shapes.len() - 1;
                log::info!("Closed shape {}, total shapes: {}", index, self.shapes.len());
                return EditorEvent::ShapeClosed(index);
            }
        }

        self.current.push(point);
        log::info!(
            "Added vertex at ({:.3}, {:.3}), total vertices: {}",
            point.x,
            point.y,
            self.current.len()
        );
        EditorEvent::PointAdded
    }

    /// Undo the last vertex, or the last completed shape if none is in progress.
    pub fn undo(&mut self) {
        if self.current.pop().is_some() {
            log::info!("Undo vertex, remaining: {}", self.current.len());
        } else if self.shapes.pop().is_some() {
            if self.selected.is_some_and(|i| i >= self.shapes.len()) {
                self.deselect();
            }
            self.drag = None;
            log::info!("Undo shape, remaining: {}", self.shapes.len());
        }
    }

    /// Discard every shape, the shape in progress and the selection.
    pub fn reset(&mut self) {
        self.shapes.clear();
        self.current.clear();
        self.selected = None;
        self.drag = None;
        log::info!("Reset editor");
    }

    /// Undo and reset are unavailable when there is nothing to remove.
    pub fn can_undo(&self) -> bool {
        !self.current.is_empty() || !self.shapes.is_empty()
    }

    pub fn can_reset(&self) -> bool {
        self.can_undo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::{draw_triangle, empty_editor, px, viewport};

    #[test]
    fn test_closing_click_closes_shape() {
        let mut editor = empty_editor();
        let index = draw_triangle(&mut editor, 100.0, 100.0);

        let shape = &editor.shapes()[index];
        assert!(shape.is_closed);
        assert_eq!(shape.points.len(), 4);
        assert_eq!(shape.points[0], shape.points[3]);
        assert!(editor.current_shape().is_empty());
    }

    #[test]
    fn test_click_outside_threshold_appends() {
        let mut editor = empty_editor();
        let vp = viewport();
        editor.click(px(100.0, 100.0), vp);
        editor.click(px(200.0, 100.0), vp);
        editor.click(px(150.0, 200.0), vp);

        // 12px from the first vertex
        let event = editor.click(px(112.0, 100.0), vp);
        assert_eq!(event, EditorEvent::PointAdded);
        assert_eq!(editor.current_shape().len(), 4);
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // Powers of two keep the normalized coordinates exact.
        let vp = Viewport::new(1024.0, 512.0).unwrap();
        let start = |editor: &mut HoldEditor| {
            editor.click(px(256.0, 128.0), vp);
            editor.click(px(356.0, 128.0), vp);
            editor.click(px(306.0, 228.0), vp);
        };

        let mut at_threshold = empty_editor();
        start(&mut at_threshold);
        let event = at_threshold.click(px(266.0, 128.0), vp);
        assert_eq!(event, EditorEvent::PointAdded);
        assert_eq!(at_threshold.current_shape().len(), 4);

        let mut inside = empty_editor();
        start(&mut inside);
        let event = inside.click(px(265.9, 128.0), vp);
        assert_eq!(event, EditorEvent::ShapeClosed(0));
        assert!(inside.current_shape().is_empty());
    }

    #[test]
    fn test_close_needs_two_prior_points() {
        let mut editor = empty_editor();
        let vp = viewport();
        editor.click(px(100.0, 100.0), vp);

        let event = editor.click(px(103.0, 100.0), vp);
        assert_eq!(event, EditorEvent::PointAdded);
        assert_eq!(editor.current_shape().len(), 2);

        editor.click(px(150.0, 200.0), vp);
        let event = editor.click(px(101.0, 101.0), vp);
        assert_eq!(event, EditorEvent::ShapeClosed(0));
    }

    #[test]
    fn test_threshold_is_measured_in_device_pixels() {
        // Same normalized geometry, different surface sizes
        let mut small = empty_editor();
        let mut large = empty_editor();
        let small_vp = Viewport::new(100.0, 100.0).unwrap();
        let large_vp = Viewport::new(2000.0, 2000.0).unwrap();

        for (editor, vp, scale) in [(&mut small, small_vp, 1.0), (&mut large, large_vp, 20.0)] {
            editor.click(px(10.0 * scale, 10.0 * scale), vp);
            editor.click(px(60.0 * scale, 10.0 * scale), vp);
            editor.click(px(30.0 * scale, 60.0 * scale), vp);
            editor.click(px(15.0 * scale, 10.0 * scale), vp);
        }

        // 5px on the small surface closes, 100px on the large one does not
        assert_eq!(small.shapes().len(), 1);
        assert!(large.shapes().is_empty());
        assert_eq!(large.current_shape().len(), 4);
    }

    #[test]
    fn test_closing_ignores_other_shapes() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        let vp = viewport();

        editor.click(px(400.0, 100.0), vp);
        editor.click(px(500.0, 100.0), vp);
        // Close to the first triangle's apex (150, 200) but outside it
        let event = editor.click(px(150.0, 205.0), vp);
        assert_eq!(event, EditorEvent::PointAdded);
        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.current_shape().len(), 3);
    }

    #[test]
    fn test_authoring_clears_selection() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        editor.select_shape(0);

        editor.click(px(700.0, 300.0), viewport());
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.current_shape().len(), 1);
    }

    #[test]
    fn test_pointer_down_on_shape_is_ignored() {
        let mut editor = empty_editor();
        let event = editor.handle_pointer_down(HitTarget::Shape(0), px(10.0, 10.0), viewport());
        assert_eq!(event, EditorEvent::Ignored);
        assert!(editor.current_shape().is_empty());
    }

    #[test]
    fn test_undo_pops_points_then_shapes() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        draw_triangle(&mut editor, 400.0, 100.0);
        let vp = viewport();
        editor.click(px(700.0, 100.0), vp);
        editor.click(px(800.0, 100.0), vp);

        editor.undo();
        assert_eq!(editor.current_shape().len(), 1);
        editor.undo();
        assert!(editor.current_shape().is_empty());

        let remaining = editor.shapes()[0].clone();
        editor.undo();
        assert_eq!(editor.shapes(), &[remaining]);
        editor.undo();
        assert!(editor.shapes().is_empty());
        assert!(!editor.can_undo());

        // No-op on empty state
        editor.undo();
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_undo_drops_dangling_selection() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        editor.select_shape(0);

        editor.undo();
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut editor = empty_editor();
        draw_triangle(&mut editor, 100.0, 100.0);
        editor.select_shape(0);
        editor.click(px(700.0, 100.0), viewport());
        assert!(editor.can_reset());

        editor.reset();
        assert!(editor.shapes().is_empty());
        assert!(editor.current_shape().is_empty());
        assert_eq!(editor.selected(), None);
        assert!(!editor.can_reset());
    }
}
