use crate::config::PlotConfig;
use crate::data::Dataset;
use crate::ui::plot_panel::PlotPanel;

pub const APP_NAME: &str = "OxideScatter";

/// The main OxideScatter application: one plot panel and a status footer.
pub struct ScatterApp {
    panel: PlotPanel,
}

impl ScatterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PlotConfig, dataset: Dataset) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        if cc.wgpu_render_state.is_none() {
            tracing::warn!("Started without a wgpu render state");
        }
        Self {
            panel: PlotPanel::new(dataset, config.sprite, config.scale_extent),
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // --- Footer panel ---
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{} points", self.panel.point_count())).weak(),
                    );
                    ui.separator();
                    let zoom = self.panel.zoom();
                    ui.label(
                        egui::RichText::new(format!(
                            "k = {:.3}   translate = ({:.1}, {:.1})",
                            zoom.k, zoom.x, zoom.y
                        ))
                        .monospace(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new("drag to pan, scroll to zoom, double-click to reset")
                                .weak(),
                        );
                    });
                });
            });

        // --- Central panel with the plot canvas ---
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                self.panel.show(ui, frame.wgpu_render_state());
            });
    }
}
