// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Board and problem properties panel.
//!
//! This module provides the side panel listing the board's problems and,
//! while setting a problem, its name field, role summary and save actions.

use crate::app::Mode;
use crate::composer::ProblemComposer;
use crate::models::board::Board;
use crate::models::problem::{ProblemId, ProblemStatus};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    NewProblem,
    EditProblem(ProblemId),
    SaveProblem { published: bool },
    CancelProblem,
}

/// Display the properties panel.
pub fn show(
    ui: &mut egui::Ui,
    board: Option<&Board>,
    mode: Mode,
    composer: Option<&mut ProblemComposer>,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    let Some(board) = board else {
        ui.label(egui::RichText::new("No board loaded").weak());
        return action;
    };

    ui.heading(&board.name);
    ui.label(format!("Holds: {}", board.holds.len()));
    ui.separator();

    if let (Mode::ComposeProblem, Some(composer)) = (mode, composer) {
        ui.label(if composer.editing().is_some() {
            "Edit Problem"
        } else {
            "Create New Problem"
        });

        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.add(egui::TextEdit::singleline(&mut composer.name).hint_text("Enter problem name"));
        });

        let counts = composer.role_counts();
        egui::Grid::new("role_counts").num_columns(2).show(ui, |ui| {
            for (label, count, color) in [
                ("Start", counts.start, egui::Color32::GREEN),
                ("Hand", counts.hand, egui::Color32::LIGHT_BLUE),
                ("Foot", counts.foot, egui::Color32::YELLOW),
                ("Finish", counts.finish, egui::Color32::RED),
            ] {
                ui.label(egui::RichText::new(label).color(color));
                ui.label(count.to_string());
                ui.end_row();
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Save as Draft").clicked() {
                action = PropertiesAction::SaveProblem { published: false };
            }
            if ui.button("Publish").clicked() {
                action = PropertiesAction::SaveProblem { published: true };
            }
            if ui.button("Cancel").clicked() {
                action = PropertiesAction::CancelProblem;
            }
        });
        ui.separator();
    }

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Problems").strong());
        if ui.small_button("+ New").clicked() {
            action = PropertiesAction::NewProblem;
        }
    });

    egui::ScrollArea::vertical().show(ui, |ui| {
        if board.problems.is_empty() {
            ui.label(egui::RichText::new("No problems yet").weak());
        }
        for problem in &board.problems {
            ui.horizontal(|ui| {
                let status = match problem.status {
                    ProblemStatus::Draft => "draft",
                    ProblemStatus::Published => "published",
                };
                ui.label(format!("{} ({}, {} holds)", problem.name, status, problem.holds.len()));
                if let Some(grade) = &problem.grade {
                    ui.label(egui::RichText::new(grade).weak());
                }
                if problem.is_editable() && ui.small_button("Edit").clicked() {
                    action = PropertiesAction::EditProblem(problem.id);
                }
            });
        }
    });

    action
}
