use eframe::egui_wgpu;
use eframe::wgpu;

use crate::config::SpriteStyle;
use crate::data::Dataset;
use crate::error::{PlotError, Result};
use crate::render::gpu_context::require_render_state;
use crate::render::{InteractionBridge, PlotCanvas, Viewport, ZoomState};
use crate::ui::gesture::GestureRecognizer;

/// The plot area: owns the canvas, its egui texture and the interaction state.
pub struct PlotPanel {
    dataset: Dataset,
    style: SpriteStyle,
    canvas: Option<PlotCanvas>,
    texture_id: Option<egui::TextureId>,
    bridge: InteractionBridge,
    gestures: GestureRecognizer,
    /// Set once a setup step fails; the panel then only shows the message.
    error: Option<PlotError>,
}

impl PlotPanel {
    pub fn new(dataset: Dataset, style: SpriteStyle, scale_extent: [f64; 2]) -> Self {
        Self {
            dataset,
            style,
            canvas: None,
            texture_id: None,
            bridge: InteractionBridge::new(),
            gestures: GestureRecognizer::new(scale_extent),
            error: None,
        }
    }

    pub fn fail(&mut self, error: PlotError) {
        tracing::error!("Plot disabled: {error}");
        self.error = Some(error);
    }

    pub fn error(&self) -> Option<&PlotError> {
        self.error.as_ref()
    }

    pub fn point_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn zoom(&self) -> ZoomState {
        self.gestures.state()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, render_state: Option<&egui_wgpu::RenderState>) {
        if self.error.is_none() {
            if let Err(e) = require_render_state(render_state) {
                self.fail(e);
            }
        }
        let (Some(render_state), None) = (render_state, &self.error) else {
            let message = self.error.as_ref().map(ToString::to_string).unwrap_or_default();
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::RED));
            });
            return;
        };

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let pixels_per_point = ui.ctx().pixels_per_point() as f64;
        // A collapsed panel has nothing to draw into.
        let Ok(viewport) = Viewport::new(rect.width() as f64, rect.height() as f64, pixels_per_point)
        else {
            return;
        };

        if let Err(e) = self.sync_canvas(render_state, viewport) {
            self.fail(e);
            return;
        }

        if let Some(zoom) = self.gestures.update(&response, rect) {
            if let Some(canvas) = self.canvas.as_mut() {
                tracing::debug!("Gesture k={:.3} t=({:.1}, {:.1})", zoom.k, zoom.x, zoom.y);
                let mut frame = canvas.frame(&render_state.device, &render_state.queue);
                self.bridge.apply(&mut frame, zoom);
            }
        }

        if let Some(texture_id) = self.texture_id {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter().image(texture_id, rect, uv, egui::Color32::WHITE);
        }
    }

    /// Create the canvas on first use, or adapt it to a changed viewport.
    fn sync_canvas(
        &mut self,
        render_state: &egui_wgpu::RenderState,
        viewport: Viewport,
    ) -> Result<()> {
        let device: &wgpu::Device = &render_state.device;
        let queue: &wgpu::Queue = &render_state.queue;

        if let Some(canvas) = self.canvas.as_mut() {
            if canvas.layout().viewport == viewport {
                return Ok(());
            }
            let recreated = canvas.resize(device, queue, &self.dataset, viewport)?;
            self.bridge.replay(&mut canvas.frame(device, queue));
            if recreated {
                if let Some(texture_id) = self.texture_id {
                    render_state.renderer.write().update_egui_texture_from_wgpu_texture(
                        device,
                        canvas.target().view(),
                        wgpu::FilterMode::Linear,
                        texture_id,
                    );
                }
            }
            tracing::debug!(
                "Resized canvas to {}x{} @{}",
                viewport.width(),
                viewport.height(),
                viewport.pixel_ratio()
            );
            return Ok(());
        }

        let mut canvas = PlotCanvas::new(device, &self.dataset, viewport, &self.style)?;
        self.bridge.start(&mut canvas.frame(device, queue));
        let texture_id = render_state.renderer.write().register_native_texture(
            device,
            canvas.target().view(),
            wgpu::FilterMode::Linear,
        );
        tracing::info!(
            "Canvas ready: {}x{} logical, {:?} physical",
            viewport.width(),
            viewport.height(),
            canvas.target().size()
        );
        self.texture_id = Some(texture_id);
        self.canvas = Some(canvas);
        Ok(())
    }
}

impl Drop for PlotPanel {
    fn drop(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            canvas.teardown();
        }
    }
}
