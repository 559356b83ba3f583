// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and mode selection UI.
//!
//! This module provides the toolbar interface for switching between hold
//! editing and problem setting, plus the hold editor's controls.

use crate::app::Mode;
use crate::editor::HoldEditor;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SwitchMode(Mode),
    Undo,
    Reset,
    DeleteSelected,
    CancelEdits,
    SaveHolds,
}

/// Display the toolbar with mode selection and editor buttons.
pub fn show(ui: &mut egui::Ui, mode: Mode, editor: Option<&HoldEditor>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        ui.separator();

        if ui.selectable_label(mode == Mode::EditHolds, "▱ Edit Holds").clicked()
            && mode != Mode::EditHolds
        {
            action = ToolbarAction::SwitchMode(Mode::EditHolds);
        }

        if ui.selectable_label(mode == Mode::ComposeProblem, "⚑ Set Problem").clicked()
            && mode != Mode::ComposeProblem
        {
            action = ToolbarAction::SwitchMode(Mode::ComposeProblem);
        }

        ui.separator();

        if let Some(editor) = editor {
            if ui.add_enabled(editor.can_undo(), egui::Button::new("Undo")).clicked() {
                action = ToolbarAction::Undo;
            }
            if ui.add_enabled(editor.can_reset(), egui::Button::new("Reset")).clicked() {
                action = ToolbarAction::Reset;
            }
            if ui
                .add_enabled(editor.has_selection(), egui::Button::new("Delete Hold"))
                .clicked()
            {
                action = ToolbarAction::DeleteSelected;
            }

            ui.separator();

            if ui.button("Cancel").clicked() {
                action = ToolbarAction::CancelEdits;
            }
            if ui
                .add_enabled(editor.can_commit(), egui::Button::new("Save Changes"))
                .clicked()
            {
                action = ToolbarAction::SaveHolds;
            }

            ui.separator();
        }

        // Mode description
        let mode_text = match mode {
            Mode::EditHolds => {
                "Click to place points, click the first point to close a hold. \
                 Click a hold to select it, drag it or its vertices to adjust."
            }
            Mode::ComposeProblem => {
                "Click holds to cycle: start → hand → foot → finish → start (if fewer than 2) or unselected"
            }
        };

        ui.label(egui::RichText::new(mode_text).italics().weak());
    });

    action
}
