use std::path::PathBuf;

use eframe::egui_wgpu;

use oxidescatter::app::{ScatterApp, APP_NAME};
use oxidescatter::config::PlotConfig;
use oxidescatter::data::loader;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match PlotConfig::from_arg(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Could not load config: {e}");
            std::process::exit(1);
        }
    };

    let dataset = match loader::load_dataset(&config.data) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("Could not load data: {e}");
            std::process::exit(1);
        }
    };

    let [width, height] = config.window_size;
    let options = eframe::NativeOptions {
        // The sprites are drawn with wgpu; glow has no path for them.
        renderer: eframe::Renderer::Wgpu,
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([width, height])
            .with_min_inner_size([320.0, 240.0]),
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                power_preference: eframe::wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ScatterApp::new(cc, &config, dataset)))),
    )
}
