use bytemuck::{Pod, Zeroable};
use glam::DMat4;

use super::transform::{to_gpu_matrix, TransformPair};

/// GPU uniform block read by the sprite vertex stage.
/// Layout matches the WGSL `Uniforms` struct exactly (192 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    /// Pan/zoom in pixel space. Written on every gesture.
    pub zoom: [[f32; 4]; 4],
    /// Data space -> logical pixels. Written per viewport configuration.
    pub data_to_pixel: [[f32; 4]; 4],
    /// Logical pixels -> clip space. Written per viewport configuration.
    pub pixel_to_clip: [[f32; 4]; 4],
}

impl UniformBlock {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
    pub const ZOOM_OFFSET: u64 = std::mem::offset_of!(UniformBlock, zoom) as u64;
    pub const TRANSFORMS_OFFSET: u64 = std::mem::offset_of!(UniformBlock, data_to_pixel) as u64;

    /// Identity zoom plus the given fixed transforms.
    pub fn new(transforms: &TransformPair) -> Self {
        let mut block = Self::zeroed();
        block.set_zoom(&DMat4::IDENTITY);
        block.set_transforms(transforms);
        block
    }

    pub fn set_zoom(&mut self, zoom: &DMat4) {
        self.zoom = to_gpu_matrix(zoom);
    }

    pub fn set_transforms(&mut self, transforms: &TransformPair) {
        self.data_to_pixel = to_gpu_matrix(&transforms.data_to_pixel);
        self.pixel_to_clip = to_gpu_matrix(&transforms.pixel_to_clip);
    }

    /// Bytes of the zoom slice only.
    pub fn zoom_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.zoom)
    }

    /// Bytes of the two fixed matrices, contiguous after the zoom slice.
    pub fn transform_bytes(&self) -> &[u8] {
        let all: &[u8] = bytemuck::bytes_of(self);
        &all[Self::TRANSFORMS_OFFSET as usize..]
    }
}
