// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the board image, hold outlines and problem roles.
//!
//! The canvas only draws and translates pointer input into
//! [`CanvasAction`]s in device pixels relative to the image; the editor
//! and composer decide what those actions mean.

use crate::composer::{roles::RoleColor, ProblemComposer};
use crate::config::AppConfig;
use crate::editor::HoldEditor;
use crate::models::hold::Point;
use crate::util::geometry::{flatten_for_render, to_device, triangulate, DevicePoint, Viewport};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Click(DevicePoint, Viewport),
    DragStart(DevicePoint, Viewport),
    DragMove(DevicePoint, Viewport),
    DragStop,
}

/// Display the hold editor canvas and handle mouse interactions.
pub fn show_editor(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    editor: &HoldEditor,
    config: &AppConfig,
) -> CanvasAction {
    let Some((texture, image_size)) = image_texture.as_ref().zip(image_size) else {
        show_loading(ui);
        return CanvasAction::None;
    };
    // Re-derived every frame, so container resizes and late image
    // decodes are picked up without extra bookkeeping.
    let Some(viewport) = Viewport::fit_width(ui.available_width() as f64, image_size) else {
        show_loading(ui);
        return CanvasAction::None;
    };

    let mut action = CanvasAction::None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        let (image_rect, response) = allocate_image(ui, texture, viewport);
        action = pointer_action(ui, &response, image_rect, viewport);

        let painter = ui.painter_at(image_rect);

        // Draw completed shapes
        for (i, shape) in editor.shapes().iter().enumerate() {
            let selected = editor.selected() == Some(i);
            let (fill, stroke) = if selected {
                (
                    egui::Color32::from_rgba_unmultiplied(0, 255, 0, 77),
                    egui::Stroke::new(3.0, egui::Color32::BLUE),
                )
            } else {
                (
                    egui::Color32::from_rgba_unmultiplied(0, 255, 0, 51),
                    egui::Stroke::new(2.0, egui::Color32::GREEN),
                )
            };
            draw_outline(&painter, &shape.points, viewport, image_rect, fill, stroke);

            if selected {
                for point in &shape.points {
                    let device = to_device(*point, viewport);
                    painter.circle(
                        image_rect.min + egui::vec2(device.x as f32, device.y as f32),
                        config.vertex_handle_radius_px,
                        egui::Color32::WHITE,
                        egui::Stroke::new(2.0, egui::Color32::BLUE),
                    );
                }
            }
        }

        // Draw current shape being created
        let current = to_screen(editor.current_shape(), viewport, image_rect);
        if current.len() > 1 {
            painter.add(egui::Shape::line(
                current.clone(),
                egui::Stroke::new(2.0, egui::Color32::BLUE),
            ));
        }
        for point in &current {
            painter.circle_filled(*point, 4.0, egui::Color32::BLUE);
        }
    });

    // Display editor state at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Holds: {}", editor.shapes().len()));
        ui.separator();
        if editor.current_shape().is_empty() {
            ui.label("Click the image to start a new hold");
        } else {
            ui.label(format!(
                "Drawing: {} points, click the first point to close",
                editor.current_shape().len()
            ));
        }
        if let Some(index) = editor.selected() {
            ui.separator();
            ui.label(format!("Selected hold {}", index + 1));
            if editor.is_dragging() {
                ui.label("(dragging)");
            }
        }
    });

    action
}

/// Display the problem composer canvas and handle hold clicks.
pub fn show_composer(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    composer: &ProblemComposer,
    config: &AppConfig,
) -> CanvasAction {
    let Some((texture, image_size)) = image_texture.as_ref().zip(image_size) else {
        show_loading(ui);
        return CanvasAction::None;
    };
    let available_height = ui.ctx().screen_rect().height() - config.canvas_ui_offset_px;
    let Some(viewport) = Viewport::fit_within(
        ui.available_width() as f64,
        available_height as f64,
        image_size,
    ) else {
        show_loading(ui);
        return CanvasAction::None;
    };

    let mut action = CanvasAction::None;
    ui.vertical_centered(|ui| {
        let (image_rect, response) = allocate_image(ui, texture, viewport);
        if let CanvasAction::Click(point, viewport) = pointer_action(ui, &response, image_rect, viewport) {
            action = CanvasAction::Click(point, viewport);
        }

        let painter = ui.painter_at(image_rect);
        for hold in composer.holds() {
            draw_outline(
                &painter,
                &hold.vertices,
                viewport,
                image_rect,
                to_color32(hold.color()),
                egui::Stroke::new(1.0, egui::Color32::from_black_alpha(77)),
            );
        }
    });

    action
}

fn show_loading(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.spinner();
            ui.label(egui::RichText::new("Loading...").color(egui::Color32::from_gray(200)));
        });
    });
}

/// Reserve the image area and draw the image into it.
fn allocate_image(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    viewport: Viewport,
) -> (egui::Rect, egui::Response) {
    let size = egui::vec2(viewport.width() as f32, viewport.height() as f32);
    let (image_rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    ui.painter().image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    (image_rect, response)
}

/// Translate this frame's pointer activity on the image into an action.
fn pointer_action(
    ui: &egui::Ui,
    response: &egui::Response,
    image_rect: egui::Rect,
    viewport: Viewport,
) -> CanvasAction {
    let device_at = |pos: egui::Pos2| {
        DevicePoint::new(
            (pos.x - image_rect.min.x) as f64,
            (pos.y - image_rect.min.y) as f64,
        )
    };

    if response.drag_started() {
        // The press origin, not the position after the drag threshold.
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            return CanvasAction::DragStart(device_at(pos), viewport);
        }
    }
    if response.drag_stopped() {
        return CanvasAction::DragStop;
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::DragMove(device_at(pos), viewport);
        }
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if image_rect.contains(pos) {
                return CanvasAction::Click(device_at(pos), viewport);
            }
        }
    }
    CanvasAction::None
}

/// Convert normalized coordinates to screen coordinates.
fn to_screen(points: &[Point], viewport: Viewport, image_rect: egui::Rect) -> Vec<egui::Pos2> {
    flatten_for_render(points, viewport)
        .chunks_exact(2)
        .map(|xy| image_rect.min + egui::vec2(xy[0] as f32, xy[1] as f32))
        .collect()
}

/// Draw a filled closed outline. Hold outlines repeat their first vertex
/// at the end.
fn draw_outline(
    painter: &egui::Painter,
    points: &[Point],
    viewport: Viewport,
    image_rect: egui::Rect,
    fill: egui::Color32,
    stroke: egui::Stroke,
) {
    let points = match points {
        [first, rest @ .., last] if first == last && !rest.is_empty() => &points[..points.len() - 1],
        _ => points,
    };
    if points.len() < 3 {
        return;
    }
    let screen_points = to_screen(points, viewport, image_rect);

    // Holds are often concave, so fill through a triangulated mesh
    let mut mesh = egui::Mesh::default();
    for pos in &screen_points {
        mesh.colored_vertex(*pos, fill);
    }
    for [a, b, c] in triangulate(points) {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    painter.add(egui::Shape::mesh(mesh));
    painter.add(egui::Shape::closed_line(screen_points, stroke));
}

fn to_color32(color: RoleColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
