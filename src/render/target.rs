use eframe::wgpu;

use super::gpu_context::{capture_errors, CANVAS_FORMAT};
use super::viewport::Viewport;
use crate::error::{PlotError, Result};

/// Offscreen colour texture the plot is drawn into, sized in physical pixels.
/// Recreated only when the physical size changes.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: [u32; 2],
}

impl OffscreenTarget {
    /// Fails with `ResourceCreationFailure` when the physical size exceeds the
    /// device's 2D texture limit or the backend rejects the texture.
    pub fn new(device: &wgpu::Device, viewport: &Viewport) -> Result<Self> {
        let [width, height] = viewport.physical_size();
        check_extent([width, height], device.limits().max_texture_dimension_2d)?;
        let texture = capture_errors(device, "canvas target", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("oxidescatter_canvas"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: CANVAS_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
        })?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        tracing::debug!("Created {width}x{height} canvas target");
        Ok(Self {
            texture,
            view,
            size: [width, height],
        })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.size == viewport.physical_size()
    }

    pub fn destroy(self) {
        self.texture.destroy();
    }
}

fn check_extent(size: [u32; 2], max_dimension: u32) -> Result<()> {
    let [width, height] = size;
    if width > max_dimension || height > max_dimension {
        tracing::error!("Canvas {width}x{height} exceeds the {max_dimension}px texture limit");
        return Err(PlotError::ResourceCreationFailure {
            resource: "canvas target",
            reason: format!("{width}x{height} exceeds the {max_dimension}px texture limit"),
        });
    }
    Ok(())
}
