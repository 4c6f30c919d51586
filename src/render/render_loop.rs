use eframe::wgpu;
use eframe::wgpu::util::DeviceExt;
use glam::DMat4;

use super::gpu_context::capture_errors;
use super::gpu_types::UniformBlock;
use super::sprite::{shader_source, VERTICES_PER_SPRITE};
use super::transform::TransformPair;
use crate::config::SpriteStyle;
use crate::data::Dataset;
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// GPU resources owned by one plot
// ---------------------------------------------------------------------------

/// Everything one plot needs on the GPU.
///
/// Point coordinates are uploaded once at `init` and never rewritten. The
/// uniform block is the only buffer that changes afterwards, and only through
/// `write_zoom` / `write_transforms`.
pub struct RenderLoop {
    pipeline: wgpu::RenderPipeline,
    x_buffer: wgpu::Buffer,
    y_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    points_bind_group: wgpu::BindGroup,
    uniform_bind_group: wgpu::BindGroup,
    /// Host copy of what the uniform buffer holds.
    uniforms: UniformBlock,
    instance_count: u32,
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

impl RenderLoop {
    /// Upload the dataset and build the sprite pipeline for `target_format`.
    pub fn init(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        dataset: &Dataset,
        transforms: &TransformPair,
        style: &SpriteStyle,
    ) -> Result<Self> {
        let instance_count = instance_count(dataset.len())?;
        let uniforms = UniformBlock::new(transforms);

        let (x_buffer, y_buffer, uniform_buffer) = capture_errors(device, "plot buffers", || {
            let x_buffer = create_storage_buffer(device, "oxidescatter_x", dataset.x());
            let y_buffer = create_storage_buffer(device, "oxidescatter_y", dataset.y());
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("oxidescatter_uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST
                    | wgpu::BufferUsages::COPY_SRC,
            });
            (x_buffer, y_buffer, uniform_buffer)
        })?;

        let shader = capture_errors(device, "sprite shader", || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("oxidescatter_sprite_shader"),
                source: wgpu::ShaderSource::Wgsl(shader_source(style).into()),
            })
        })?;

        let storage_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(4), // at least one f32
            },
            count: None,
        };

        let points_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("oxidescatter_points_layout"),
            entries: &[storage_entry(0), storage_entry(1)],
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("oxidescatter_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(UniformBlock::SIZE),
                },
                count: None,
            }],
        });

        let pipeline = capture_errors(device, "sprite pipeline", || {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("oxidescatter_pipeline_layout"),
                bind_group_layouts: &[&points_layout, &uniform_layout],
                push_constant_ranges: &[],
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("oxidescatter_sprite_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_sprite"),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_sprite"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview: None,
                cache: None,
            })
        })?;

        let (points_bind_group, uniform_bind_group) = capture_errors(device, "bind groups", || {
            let points = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("oxidescatter_points_bg"),
                layout: &points_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: x_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: y_buffer.as_entire_binding(),
                    },
                ],
            });
            let uniform = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("oxidescatter_uniform_bg"),
                layout: &uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            (points, uniform)
        })?;

        tracing::info!(
            "Uploaded {} points ({} bytes per axis)",
            instance_count,
            x_buffer.size()
        );

        Ok(Self {
            pipeline,
            x_buffer,
            y_buffer,
            uniform_buffer,
            points_bind_group,
            uniform_bind_group,
            uniforms,
            instance_count,
        })
    }

    // -----------------------------------------------------------------------
    // Uniform writes
    // -----------------------------------------------------------------------

    /// The single setter for the zoom slice of the uniform block.
    pub fn write_zoom(&mut self, queue: &wgpu::Queue, zoom: &DMat4) {
        self.uniforms.set_zoom(zoom);
        queue.write_buffer(
            &self.uniform_buffer,
            UniformBlock::ZOOM_OFFSET,
            self.uniforms.zoom_bytes(),
        );
    }

    /// Replace the fixed matrices after a viewport change.
    pub fn write_transforms(&mut self, queue: &wgpu::Queue, transforms: &TransformPair) {
        self.uniforms.set_transforms(transforms);
        queue.write_buffer(
            &self.uniform_buffer,
            UniformBlock::TRANSFORMS_OFFSET,
            self.uniforms.transform_bytes(),
        );
    }

    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    /// The GPU side of `uniforms()`, readable through a buffer copy.
    pub fn uniform_buffer(&self) -> &wgpu::Buffer {
        &self.uniform_buffer
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Clear `target` to white and draw every point with one instanced call.
    /// Submits exactly one command buffer.
    pub fn draw(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
    ) -> wgpu::SubmissionIndex {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("oxidescatter_frame"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("oxidescatter_sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.points_bind_group, &[]);
            render_pass.set_bind_group(1, &self.uniform_bind_group, &[]);
            render_pass.draw(0..VERTICES_PER_SPRITE, 0..self.instance_count);
        }
        queue.submit(Some(encoder.finish()))
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Release the GPU buffers now instead of waiting for the last reference.
    pub fn teardown(self) {
        self.x_buffer.destroy();
        self.y_buffer.destroy();
        self.uniform_buffer.destroy();
        tracing::debug!("Released plot buffers");
    }
}

/// One instance per point; the draw call counts instances in `u32`.
fn instance_count(points: usize) -> Result<u32> {
    u32::try_from(points).map_err(|_| PlotError::ResourceCreationFailure {
        resource: "plot buffers",
        reason: format!("{points} points exceed the {} instance limit", u32::MAX),
    })
}

fn create_storage_buffer(device: &wgpu::Device, label: &str, values: &[f32]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(values),
        usage: wgpu::BufferUsages::STORAGE,
    })
}
