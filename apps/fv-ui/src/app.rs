use egui_file_dialog::FileDialog;
use fv_core::NodeId;
use fv_graph::{HighlightSet, ResultKind};
use fv_layout::{FrameClock, SimConfig};
use fv_render::{NetworkView, RenderStyle, ViewState};
use std::path::{Path, PathBuf};

use crate::painter::{CanvasTransform, EguiSurface};

pub struct FlowVizApp {
    clock: FrameClock,
    view: NetworkView,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    highlight_kind: ResultKind,
    dragging: Option<NodeId>,
    graph_path: Option<PathBuf>,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    OpenNetwork,
    OpenResult,
}

impl FlowVizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let clock = FrameClock::new();
        let view = NetworkView::new(&clock, SimConfig::default(), RenderStyle::default());
        Self {
            clock,
            view,
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            highlight_kind: ResultKind::MaxFlow,
            dragging: None,
            graph_path: None,
            status: None,
        }
    }

    fn open_network(&mut self, path: PathBuf) {
        self.view.begin_loading();
        self.dragging = None;
        let result = fv_graph::load_graph(&path)
            .map_err(|e| e.to_string())
            .and_then(|graph| self.view.load(graph).map_err(|e| e.to_string()));
        match result {
            Ok(()) => {
                self.status = Some(format!("Loaded {}", path.display()));
                self.graph_path = Some(path);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open network");
                self.view.teardown();
                self.status = Some(format!("Failed to load network: {e}"));
            }
        }
    }

    fn open_result(&mut self, path: &Path) {
        match fv_graph::load_highlights(path, self.highlight_kind) {
            Ok(set) => {
                self.status = Some(format!(
                    "{} result: {} highlighted connections",
                    self.highlight_kind.as_str(),
                    set.len()
                ));
                self.view.set_highlights(set);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open result");
                self.status = Some(format!("Failed to load result: {e}"));
            }
        }
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let canvas = self.view.simulation().map(|s| s.config().canvas).unwrap_or_default();
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let transform = CanvasTransform::fit(canvas, response.rect);
        let pointer = response.interact_pointer_pos().map(|p| transform.to_canvas(p));

        if response.drag_started() {
            if let Some(pos) = pointer {
                if let Some(node) = self.view.node_at(pos) {
                    match self.view.drag_start(node, pos) {
                        Ok(()) => self.dragging = Some(node),
                        Err(e) => tracing::warn!(error = %e, "drag rejected"),
                    }
                }
            }
        }

        if response.dragged() {
            if let (Some(pos), Some(node)) = (pointer, self.dragging) {
                if let Err(e) = self.view.drag_move(node, pos) {
                    tracing::warn!(error = %e, "drag move rejected");
                }
            }
        }

        if response.drag_stopped() {
            if let Some(node) = self.dragging.take() {
                if let Err(e) = self.view.drag_end(node) {
                    tracing::warn!(error = %e, "drag end rejected");
                }
            }
        }

        // Every repaint is one display frame.
        self.clock.fire();
        self.view.advance();

        let mut surface = EguiSurface::new(&painter, transform);
        if let Err(e) = self.view.draw(&mut surface) {
            tracing::error!(error = %e, "draw failed");
        }

        if let Some(hover) = response.hover_pos() {
            if let Some(text) = surface.tooltip_at(hover) {
                let text = text.to_string();
                response.on_hover_text_at_pointer(text);
            }
        }

        let animating = self
            .view
            .simulation()
            .is_some_and(|s| !s.is_converged() && !s.is_stopped());
        if animating || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }
    }
}

impl eframe::App for FlowVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open network").clicked() {
                    self.file_dialog_action = Some(FileDialogAction::OpenNetwork);
                    self.file_dialog.select_file();
                }

                ui.add_enabled_ui(self.view.state() == ViewState::Running, |ui| {
                    egui::ComboBox::from_id_salt("result_kind")
                        .selected_text(self.highlight_kind.as_str())
                        .show_ui(ui, |ui| {
                            for kind in [ResultKind::MaxFlow, ResultKind::Mst, ResultKind::ShortestPath] {
                                ui.selectable_value(&mut self.highlight_kind, kind, kind.as_str());
                            }
                        });
                    if ui.button("Open result").clicked() {
                        self.file_dialog_action = Some(FileDialogAction::OpenResult);
                        self.file_dialog.select_file();
                    }
                    if ui.button("Clear highlights").clicked() {
                        self.view.set_highlights(HighlightSet::new());
                    }

                    ui.separator();

                    let mut sticky = self.view.sticky();
                    if ui.checkbox(&mut sticky, "Sticky pins").changed() {
                        self.view.set_sticky(sticky);
                    }
                    if ui.button("Reheat").clicked() {
                        if let Err(e) = self.view.reheat() {
                            tracing::warn!(error = %e, "reheat failed");
                        }
                    }
                    if ui.button("Release all pins").clicked() {
                        self.view.release_all();
                    }
                });

                if let Some(path) = self.graph_path.clone() {
                    if ui.button("Reload").clicked() {
                        self.open_network(path);
                    }
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::OpenNetwork) => self.open_network(path),
                Some(FileDialogAction::OpenResult) => self.open_result(&path),
                None => {}
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(sim) = self.view.simulation() {
                    ui.label(format!(
                        "alpha {:.3}  ticks {}  pinned {}",
                        sim.alpha(),
                        sim.tick_count(),
                        sim.pinned_count()
                    ));
                    ui.separator();
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.view.style().title.clone());
            self.canvas_ui(ui);
        });
    }
}
