// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the board being worked on, the hold editor
//! and problem composer sessions, and applies their results to the board.

use crate::composer::ProblemComposer;
use crate::config::AppConfig;
use crate::editor::{EditorEvent, HoldEditor};
use crate::io::media::{self, LoadedImage};
use crate::io::serialization;
use crate::models::board::Board;
use crate::models::problem::ProblemId;
use crate::ui::{canvas, properties, toolbar};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// What the canvas is currently used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    EditHolds,
    ComposeProblem,
}

/// Result of background loading operation.
struct LoadedBoard {
    image: LoadedImage,
    board: Board,
    board_path: Option<PathBuf>,
}

/// A message shown to the user until it times out.
struct Notification {
    message: String,
    is_error: bool,
    shown_at: Instant,
}

/// Main application state.
pub struct BlocApp {
    config: AppConfig,

    /// Current mode
    mode: Mode,

    /// Board being worked on (if one is loaded)
    board: Option<Board>,

    /// File the board is saved to
    board_path: Option<PathBuf>,

    /// Hold editing session, seeded from the board
    editor: Option<HoldEditor>,

    /// Problem setting session, seeded from the board
    composer: Option<ProblemComposer>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Receiver for background loading
    loader: Option<Receiver<Result<LoadedBoard, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    notification: Option<Notification>,
}

impl BlocApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            mode: Mode::EditHolds,
            board: None,
            board_path: None,
            editor: None,
            composer: None,
            image_texture: None,
            image_size: None,
            loader: None,
            loading_message: None,
            notification: None,
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.notification = Some(Notification {
            message,
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Start a fresh session for the current mode, discarding unsaved state.
    fn start_session(&mut self) {
        let Some(board) = self.board.as_ref() else {
            return;
        };
        match self.mode {
            Mode::EditHolds => {
                self.editor = Some(HoldEditor::new(&board.holds, &self.config));
                self.composer = None;
            }
            Mode::ComposeProblem => {
                self.composer = Some(ProblemComposer::new(board));
                self.editor = None;
            }
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.start_session();
        log::info!("Switched to {:?}", mode);
    }

    /// Open an existing problem in the composer.
    fn edit_problem(&mut self, id: ProblemId) {
        let Some(board) = self.board.as_ref() else {
            return;
        };
        let Some(problem) = board.problem(id) else {
            return;
        };
        match ProblemComposer::for_problem(board, problem) {
            Ok(composer) => {
                self.mode = Mode::ComposeProblem;
                self.composer = Some(composer);
                self.editor = None;
            }
            Err(e) => self.notify_error(e.to_string()),
        }
    }

    /// Apply the editor's shapes to the board as its holds.
    fn save_holds(&mut self) {
        let (Some(board), Some(editor)) = (self.board.as_mut(), self.editor.as_ref()) else {
            return;
        };
        match board.apply_hold_edits(editor.commit()) {
            Ok(()) => {
                let count = board.holds.len();
                // Re-seed so new holds pick up their assigned ids
                self.start_session();
                self.notify(format!("Saved {} holds", count));
                self.write_board();
            }
            Err(e) => self.notify_error(format!("Failed to save holds: {}", e)),
        }
    }

    /// Validate the composed problem and store it on the board.
    fn save_problem(&mut self, published: bool) {
        let (Some(board), Some(composer)) = (self.board.as_mut(), self.composer.as_ref()) else {
            return;
        };
        let submission = match composer.commit(published) {
            Ok(submission) => submission,
            Err(e) => {
                // Composer state is left as is so the user can fix it
                self.notify_error(e.to_string());
                return;
            }
        };
        let result = match composer.editing() {
            Some(id) => board.update_problem(id, submission),
            None => board.submit_problem(submission).map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.start_session();
                self.notify(if published {
                    "Problem published"
                } else {
                    "Problem saved as draft"
                });
                self.write_board();
            }
            Err(e) => self.notify_error(format!("Failed to save problem: {}", e)),
        }
    }

    /// Write the board to its file, if it has one.
    fn write_board(&mut self) {
        let (Some(board), Some(path)) = (self.board.as_ref(), self.board_path.as_ref()) else {
            return;
        };
        match serialization::save_board(board, path) {
            Ok(()) => log::info!("Saved board to {}", path.display()),
            Err(e) => {
                let message = format!("Failed to save board: {:#}", e);
                self.notify_error(message);
            }
        }
    }

    fn save_board_as(&mut self, path: PathBuf) {
        self.board_path = Some(path);
        self.write_board();
    }

    /// Create a new board from an image file (asynchronously).
    fn new_board(&mut self, path: PathBuf) {
        self.spawn_loader("Loading image...", move || {
            let image = media::load_image(&path).map_err(|e| format!("{:#}", e))?;
            log::info!("Loaded image: {} ({}x{})", path.display(), image.width, image.height);

            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled board".to_string());
            let board = Board::new(name, path.to_string_lossy().to_string());
            Ok(LoadedBoard {
                image,
                board,
                board_path: None,
            })
        });
    }

    /// Open a board file and load its image (asynchronously).
    fn open_board(&mut self, path: PathBuf) {
        self.spawn_loader("Loading board and image...", move || {
            let board = serialization::load_board(&path)
                .map_err(|e| format!("Failed to open board: {:#}", e))?;
            log::info!("Opened board '{}' with {} holds", board.name, board.holds.len());

            let image_path = resolve_image_path(&path, &board.image_file);
            if !image_path.exists() {
                return Err(format!("Referenced image not found: {}", image_path.display()));
            }
            let image = media::load_image(&image_path).map_err(|e| format!("{:#}", e))?;
            log::info!("Loaded image: {}", image_path.display());

            Ok(LoadedBoard {
                image,
                board,
                board_path: Some(path),
            })
        });
    }

    fn spawn_loader<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<LoadedBoard, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    /// Swap in a finished background load.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.loader.as_ref() else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let image = loaded.image;
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width as usize, image.height as usize],
                    &image.pixels,
                );
                self.image_texture = Some(ctx.load_texture(
                    "board_image",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.image_size = Some(image.size());
                self.board = Some(loaded.board);
                self.board_path = loaded.board_path;
                self.mode = Mode::EditHolds;
                self.start_session();
                log::info!("Board loaded successfully");
            }
            Err(e) => self.notify_error(e),
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if self.mode != Mode::EditHolds {
            return;
        }
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            editor.deselect();
        }

        // Only process if no text field is focused (to avoid deleting while editing names)
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            editor.delete_selected();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z)) {
            editor.undo();
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        use toolbar::ToolbarAction;

        match action {
            ToolbarAction::SwitchMode(mode) => self.switch_mode(mode),
            ToolbarAction::SaveHolds => self.save_holds(),
            ToolbarAction::CancelEdits => {
                self.start_session();
                log::info!("Discarded hold edits");
            }
            ToolbarAction::Undo => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.undo();
                }
            }
            ToolbarAction::Reset => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.reset();
                }
            }
            ToolbarAction::DeleteSelected => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.delete_selected();
                }
            }
            ToolbarAction::None => {}
        }
    }

    fn handle_properties(&mut self, action: properties::PropertiesAction) {
        use properties::PropertiesAction;

        match action {
            PropertiesAction::NewProblem => self.switch_mode(Mode::ComposeProblem),
            PropertiesAction::EditProblem(id) => self.edit_problem(id),
            PropertiesAction::SaveProblem { published } => self.save_problem(published),
            PropertiesAction::CancelProblem => {
                self.start_session();
                log::info!("Discarded problem");
            }
            PropertiesAction::None => {}
        }
    }

    fn handle_canvas(&mut self, action: canvas::CanvasAction) {
        use canvas::CanvasAction;

        match self.mode {
            Mode::EditHolds => {
                let Some(editor) = self.editor.as_mut() else {
                    return;
                };
                match action {
                    CanvasAction::Click(point, viewport) => {
                        if editor.click(point, viewport) == EditorEvent::Ignored {
                            log::debug!("Click consumed by vertex handle");
                        }
                    }
                    CanvasAction::DragStart(point, viewport) => {
                        editor.begin_drag(point, viewport);
                    }
                    CanvasAction::DragMove(point, viewport) => editor.drag_to(point, viewport),
                    CanvasAction::DragStop => editor.end_drag(),
                    CanvasAction::None => {}
                }
            }
            Mode::ComposeProblem => {
                if let (Some(composer), CanvasAction::Click(point, viewport)) =
                    (self.composer.as_mut(), action)
                {
                    composer.click(point, viewport);
                }
            }
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Board from Image...").clicked() {
                    // Open native file picker
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", media::IMAGE_EXTENSIONS)
                        .pick_file()
                    {
                        self.new_board(path);
                    }
                    ui.close_menu();
                }

                if ui.button("Open Board...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Board files", serialization::BOARD_EXTENSIONS)
                        .pick_file()
                    {
                        self.open_board(path);
                    }
                    ui.close_menu();
                }

                ui.separator();

                let has_board = self.board.is_some();
                if ui.add_enabled(has_board, egui::Button::new("Save Board")).clicked() {
                    if self.board_path.is_some() {
                        self.write_board();
                    } else if let Some(path) = pick_save_path() {
                        self.save_board_as(path);
                    }
                    ui.close_menu();
                }

                if ui.add_enabled(has_board, egui::Button::new("Save Board As...")).clicked() {
                    if let Some(path) = pick_save_path() {
                        self.save_board_as(path);
                    }
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() > NOTIFICATION_TIMEOUT);
        if expired {
            self.notification = None;
        }
        let Some(notification) = self.notification.as_ref() else {
            return;
        };

        egui::TopBottomPanel::bottom("notification").show(ctx, |ui| {
            let color = if notification.is_error {
                egui::Color32::from_rgb(230, 80, 80)
            } else {
                egui::Color32::from_rgb(80, 200, 120)
            };
            ui.label(egui::RichText::new(&notification.message).color(color));
        });
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for BlocApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.show_menu(ctx, ui));

        // Toolbar
        if self.board.is_some() {
            let mode = self.mode;
            let toolbar_action = egui::TopBottomPanel::top("toolbar")
                .show(ctx, |ui| toolbar::show(ui, mode, self.editor.as_ref()))
                .inner;
            self.handle_toolbar(toolbar_action);
        }

        self.show_notification(ctx);

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| {
                properties::show(ui, self.board.as_ref(), self.mode, self.composer.as_mut())
            })
            .inner;
        self.handle_properties(properties_action);

        self.handle_keyboard(ctx);

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    return canvas::CanvasAction::None;
                }

                match (self.mode, self.editor.as_ref(), self.composer.as_ref()) {
                    (Mode::EditHolds, Some(editor), _) => canvas::show_editor(
                        ui,
                        &self.image_texture,
                        self.image_size,
                        editor,
                        &self.config,
                    ),
                    (Mode::ComposeProblem, _, Some(composer)) => canvas::show_composer(
                        ui,
                        &self.image_texture,
                        self.image_size,
                        composer,
                        &self.config,
                    ),
                    _ => {
                        show_welcome(ui);
                        canvas::CanvasAction::None
                    }
                }
            })
            .inner;
        self.handle_canvas(canvas_action);
    }
}

/// Board files store the image path relative to themselves when possible.
fn resolve_image_path(board_path: &Path, image_file: &str) -> PathBuf {
    let image_path = PathBuf::from(image_file);
    if image_path.is_absolute() {
        return image_path;
    }
    board_path
        .parent()
        .map(|dir| dir.join(&image_path))
        .unwrap_or(image_path)
}

fn pick_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("YAML", &["yaml", "yml"])
        .add_filter("JSON", &["json"])
        .set_file_name("board.yaml")
        .save_file()
}

/// Show welcome message when no board is loaded.
fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("bloc")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Climbing board hold and problem setter")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open a board or start one from a wall photo")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → New Board from Image...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_image_path_resolves_next_to_board() {
        let resolved = resolve_image_path(Path::new("/boards/garage.yaml"), "garage.jpg");
        assert_eq!(resolved, PathBuf::from("/boards/garage.jpg"));
    }

    #[test]
    fn test_absolute_image_path_kept() {
        let resolved = resolve_image_path(Path::new("/boards/garage.yaml"), "/photos/wall.png");
        assert_eq!(resolved, PathBuf::from("/photos/wall.png"));
    }
}
