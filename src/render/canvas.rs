use eframe::wgpu;
use glam::DMat4;

use super::gpu_context::CANVAS_FORMAT;
use super::interaction::FrameSink;
use super::layout::PlotLayout;
use super::render_loop::RenderLoop;
use super::target::OffscreenTarget;
use super::viewport::Viewport;
use crate::config::SpriteStyle;
use crate::data::Dataset;
use crate::error::Result;

/// A render loop together with the offscreen texture it draws into.
pub struct PlotCanvas {
    render_loop: RenderLoop,
    target: OffscreenTarget,
    layout: PlotLayout,
}

impl PlotCanvas {
    /// The layout is computed before any GPU resource is created.
    pub fn new(
        device: &wgpu::Device,
        dataset: &Dataset,
        viewport: Viewport,
        style: &SpriteStyle,
    ) -> Result<Self> {
        let layout = PlotLayout::compute(dataset, viewport)?;
        let render_loop =
            RenderLoop::init(device, CANVAS_FORMAT, dataset, &layout.transforms, style)?;
        let target = OffscreenTarget::new(device, &viewport)?;
        Ok(Self {
            render_loop,
            target,
            layout,
        })
    }

    /// Recompute the layout for a new viewport. Returns true when the target
    /// texture was recreated.
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dataset: &Dataset,
        viewport: Viewport,
    ) -> Result<bool> {
        if viewport == self.layout.viewport {
            return Ok(false);
        }
        let layout = PlotLayout::compute(dataset, viewport)?;
        self.render_loop.write_transforms(queue, &layout.transforms);
        self.layout = layout;

        if self.target.matches(&viewport) {
            return Ok(false);
        }
        let target = OffscreenTarget::new(device, &viewport)?;
        let old = std::mem::replace(&mut self.target, target);
        old.destroy();
        Ok(true)
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    pub fn target(&self) -> &OffscreenTarget {
        &self.target
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    /// Borrow the canvas as a `FrameSink` for one batch of gestures.
    pub fn frame<'a>(
        &'a mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
    ) -> CanvasFrame<'a> {
        CanvasFrame {
            device,
            queue,
            canvas: self,
        }
    }

    pub fn teardown(self) {
        self.render_loop.teardown();
        self.target.destroy();
    }
}

pub struct CanvasFrame<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    canvas: &'a mut PlotCanvas,
}

impl FrameSink for CanvasFrame<'_> {
    fn write_zoom(&mut self, zoom: &DMat4) {
        self.canvas.render_loop.write_zoom(self.queue, zoom);
    }

    fn draw(&mut self) {
        self.canvas
            .render_loop
            .draw(self.device, self.queue, self.canvas.target.view());
    }
}
