// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selection and drag handling for completed shapes.
//!
//! A selected shape exposes its vertex handles. Dragging a handle moves
//! that vertex to the live pointer position; dragging the shape body
//! translates every vertex by the pointer delta since the previous step.

use super::{Drag, HitTarget, HoldEditor};
use crate::models::hold::Point;
use crate::util::geometry::{to_normalized, DevicePoint, Viewport};

impl HoldEditor {
    /// Select a completed shape.
    pub fn select_shape(&mut self, index: usize) {
        if index < self.shapes.len() {
            self.selected = Some(index);
            log::info!("Selected shape {}", index);
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        if self.selected.take().is_some() {
            log::info!("Deselected shape");
        }
        self.drag = None;
    }

    /// Remove the selected shape from the working set.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected.take() else {
            return false;
        };
        self.drag = None;
        if index < self.shapes.len() {
            self.shapes.remove(index);
            log::info!("Deleted shape {}, total: {}", index, self.shapes.len());
            true
        } else {
            false
        }
    }

    /// Start a drag at the given device position.
    ///
    /// Handles of the selected shape start a vertex drag, the body of the
    /// selected shape starts a shape drag. Anything else is not draggable.
    pub fn begin_drag(&mut self, device: DevicePoint, viewport: Viewport) -> bool {
        self.drag = match self.hit_test(device, viewport) {
            HitTarget::Vertex { shape, vertex } => Some(Drag::Vertex { shape, vertex }),
            HitTarget::Shape(shape) if self.selected == Some(shape) => Some(Drag::Shape {
                shape,
                last: to_normalized(device, viewport),
            }),
            _ => None,
        };
        if let Some(drag) = self.drag {
            log::info!("Started drag {:?}", drag);
        }
        self.drag.is_some()
    }

    /// Continue the current drag to a new pointer position.
    pub fn drag_to(&mut self, device: DevicePoint, viewport: Viewport) {
        let current = to_normalized(device, viewport);
        match self.drag {
            Some(Drag::Vertex { shape, vertex }) => self.move_vertex(shape, vertex, current),
            Some(Drag::Shape { shape, last }) => {
                self.translate_shape(shape, current.x - last.x, current.y - last.y);
                self.drag = Some(Drag::Shape { shape, last: current });
            }
            None => {}
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::info!("Stopped drag {:?}", drag);
        }
    }

    /// Replace a vertex in place.
    ///
    /// The first and last vertices of a closed shape are the same point and
    /// always move together.
    pub fn move_vertex(&mut self, shape: usize, vertex: usize, position: Point) {
        let Some(shape) = self.shapes.get_mut(shape) else {
            return;
        };
        let last = shape.points.len().saturating_sub(1);
        if vertex > last || shape.points.is_empty() {
            return;
        }

        shape.points[vertex] = position;
        if shape.is_closed && (vertex == 0 || vertex == last) {
            shape.points[0] = position;
            shape.points[last] = position;
        }
        log::debug!("Moved vertex {} to ({:.3}, {:.3})", vertex, position.x, position.y);
    }

    /// Shift every vertex of a shape by the same offset.
    pub fn translate_shape(&mut self, shape: usize, dx: f64, dy: f64) {
        if let Some(shape) = self.shapes.get_mut(shape) {
            for point in &mut shape.points {
                *point = point.offset(dx, dy);
            }
            log::debug!("Translated shape by ({:.4}, {:.4})", dx, dy);
        }
    }
}
