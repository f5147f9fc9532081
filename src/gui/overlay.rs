use eframe::egui;

/// A finished drag in logical overlay points, plus the scale factor needed to
/// map those points to physical screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct CompletedSelection {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub pixels_per_point: f32,
}

/// Drag state for the selection in progress.
#[derive(Default)]
struct DragSession {
    start: Option<egui::Pos2>,
}

/// Fullscreen translucent viewport the user drags a rectangle on.
pub struct SelectionOverlay {
    active: bool,
    session: DragSession,
    /// Completed selection held back until the viewport is gone.
    finished: Option<CompletedSelection>,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self {
            active: false,
            session: DragSession::default(),
            finished: None,
        }
    }

    /// Begin a new selection. A no-op while one is already in progress.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.session = DragSession::default();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a completed selection is waiting to be handed out.
    pub fn has_result(&self) -> bool {
        self.finished.is_some()
    }

    /// Render the overlay while active. A completed selection is returned one
    /// frame after the pointer is released: eframe flushes the queued `Close`
    /// command only at the end of the frame, and grabbing the screen before
    /// the viewport is unmapped would capture the dim and the rectangle
    /// outline along with the selected pixels. Escape cancels without a
    /// result.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<CompletedSelection> {
        if !self.active {
            return self.finished.take();
        }

        let viewport_id = egui::ViewportId::from_hash_of("selection_overlay");
        let builder = egui::ViewportBuilder::default()
            .with_title("SnapTrans Selection")
            .with_fullscreen(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_transparent(true);

        let mut completed = None;
        let mut close = false;

        ctx.show_viewport_immediate(viewport_id, builder, |overlay_ctx, _class| {
            // Dim the screen so the selection rectangle stands out
            let frame = egui::Frame::new().fill(egui::Color32::from_black_alpha(77));
            egui::CentralPanel::default()
                .frame(frame)
                .show(overlay_ctx, |ui| {
                    let response = ui
                        .allocate_rect(ui.max_rect(), egui::Sense::drag())
                        .on_hover_cursor(egui::CursorIcon::Crosshair);
                    let pointer = overlay_ctx.input(|i| i.pointer.interact_pos());

                    if response.drag_started() {
                        self.session.start = pointer;
                    }

                    if let (Some(start), Some(current)) = (self.session.start, pointer) {
                        let rect = egui::Rect::from_two_pos(start, current);
                        ui.painter().rect_stroke(
                            rect,
                            egui::CornerRadius::ZERO,
                            egui::Stroke::new(2.0, egui::Color32::RED),
                            egui::StrokeKind::Inside,
                        );
                    }

                    if response.drag_stopped() {
                        if let (Some(start), Some(end)) = (self.session.start.take(), pointer) {
                            completed = Some(CompletedSelection {
                                start: (start.x, start.y),
                                end: (end.x, end.y),
                                pixels_per_point: overlay_ctx.pixels_per_point(),
                            });
                        }
                        close = true;
                    }

                    if overlay_ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                        close = true;
                    }
                });

            if close {
                overlay_ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            // Keep the rectangle tracking the pointer between input events
            overlay_ctx.request_repaint();
        });

        if close {
            self.active = false;
            self.session = DragSession::default();
            self.finished = completed;
            // Come back next frame, after the viewport close is processed
            ctx.request_repaint();
        }
        None
    }
}

impl Default for SelectionOverlay {
    fn default() -> Self {
        Self::new()
    }
}
