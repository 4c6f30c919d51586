use eframe::egui_wgpu;
use eframe::wgpu;

use crate::error::{PlotError, Result};

/// Format of the offscreen canvas the sprites are drawn into.
pub const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// The GPU state handed over by the windowing layer. Fails with
/// `UnsupportedBackend` when eframe came up without wgpu.
pub fn require_render_state(
    render_state: Option<&egui_wgpu::RenderState>,
) -> Result<&egui_wgpu::RenderState> {
    render_state.ok_or_else(|| {
        PlotError::UnsupportedBackend("eframe is not running the wgpu renderer".into())
    })
}

/// Device and queue owned outside of any window, for offscreen use.
pub struct HeadlessGpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl HeadlessGpu {
    pub fn new() -> Result<Self> {
        pollster::block_on(Self::request())
    }

    async fn request() -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| PlotError::UnsupportedBackend("no suitable GPU adapter".into()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("oxidescatter_headless_device"),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| PlotError::UnsupportedBackend(e.to_string()))?;

        tracing::info!("Created headless device on {:?}", adapter.get_info().name);
        Ok(Self { device, queue })
    }
}

/// Run `create` inside validation and out-of-memory error scopes and turn a
/// captured error into `ResourceCreationFailure`.
pub fn capture_errors<T>(
    device: &wgpu::Device,
    resource: &'static str,
    create: impl FnOnce() -> T,
) -> Result<T> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());
    match validation.or(oom) {
        Some(err) => {
            tracing::error!("Failed to create {resource}: {err}");
            Err(PlotError::ResourceCreationFailure {
                resource,
                reason: err.to_string(),
            })
        }
        None => Ok(value),
    }
}
