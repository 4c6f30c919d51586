//! Instanced sprite expansion.
//!
//! Every data point is one instance. The vertex stage emits six vertices per
//! instance (two triangles of a unit quad), centers the quad on the point,
//! scales it by a zoom-dependent size and runs it through
//! `pixel_to_clip * zoom * data_to_pixel`. The fragment stage cuts the quad
//! down to a disc of radius 0.5 in quad-local units.
//!
//! The functions here mirror the WGSL math on the host so it can be checked
//! without a GPU.

use glam::{DMat4, DVec2, DVec4};

use crate::config::SpriteStyle;

/// Vertices per instance.
pub const VERTICES_PER_SPRITE: u32 = 6;

/// Corners of the unit quad, indexed by vertex-within-instance.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
];

/// Fragments farther than this from the quad center are discarded.
pub const SPRITE_RADIUS: f32 = 0.5;

const SPRITE_SHADER_TEMPLATE: &str = r#"
struct Uniforms {
    zoom: mat4x4<f32>,
    data_to_pixel: mat4x4<f32>,
    pixel_to_clip: mat4x4<f32>,
};

@group(0) @binding(0) var<storage, read> x_values: array<f32>;
@group(0) @binding(1) var<storage, read> y_values: array<f32>;
@group(1) @binding(0) var<uniform> u: Uniforms;

const SIZE_DIVISOR: f32 = {{SIZE_DIVISOR}};
const SPRITE_COLOR: vec4<f32> = vec4<f32>({{COLOR}});

struct SpriteOutput {
    @builtin(position) pos: vec4<f32>,
    @location(0) local: vec2<f32>,
};

@vertex
fn vs_sprite(
    @builtin(instance_index) inst: u32,
    @builtin(vertex_index) vert: u32,
) -> SpriteOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(1.0, 1.0),
    );
    let local = corners[vert] - vec2<f32>(0.5, 0.5);

    // Zoom magnitude lives on the diagonal of the zoom matrix.
    let k = u.zoom[0][0];
    let size = exp(log(k) * 0.5) / SIZE_DIVISOR;

    let pos = vec4<f32>(
        x_values[inst] + local.x * size,
        y_values[inst] + local.y * size,
        0.0,
        1.0,
    );

    var out: SpriteOutput;
    out.pos = u.pixel_to_clip * u.zoom * u.data_to_pixel * pos;
    out.local = local;
    return out;
}

@fragment
fn fs_sprite(@location(0) local: vec2<f32>) -> @location(0) vec4<f32> {
    if length(local) > 0.5 {
        discard;
    }
    return SPRITE_COLOR;
}
"#;

/// WGSL source with the style constants baked in.
pub fn shader_source(style: &SpriteStyle) -> String {
    let [r, g, b, a] = style.color;
    SPRITE_SHADER_TEMPLATE
        .replace("{{SIZE_DIVISOR}}", &wgsl_float(style.size_divisor))
        .replace(
            "{{COLOR}}",
            &format!(
                "{}, {}, {}, {}",
                wgsl_float(r),
                wgsl_float(g),
                wgsl_float(b),
                wgsl_float(a)
            ),
        )
}

// Shortest literal that reads back as the same f32, e.g. `250.0` or `1e-7`.
fn wgsl_float(v: f32) -> String {
    format!("{v:?}")
}

/// Data-space edge length of a sprite at zoom magnitude `k`.
/// Grows with `sqrt(k)`.
pub fn sprite_size(k: f64, divisor: f64) -> f64 {
    (k.ln() * 0.5).exp() / divisor
}

/// Quad corner `vertex`, centered on the origin.
pub fn local_corner(vertex: usize) -> DVec2 {
    let [x, y] = QUAD_CORNERS[vertex % QUAD_CORNERS.len()];
    DVec2::new(x as f64, y as f64) - DVec2::splat(0.5)
}

/// The six clip-space vertices the vertex stage produces for one point.
pub fn expand_instance(
    point: DVec2,
    zoom: &DMat4,
    combined: &DMat4,
    divisor: f64,
) -> [DVec4; VERTICES_PER_SPRITE as usize] {
    let size = sprite_size(zoom.x_axis.x, divisor);
    std::array::from_fn(|vertex| {
        let offset = local_corner(vertex) * size;
        *combined * DVec4::new(point.x + offset.x, point.y + offset.y, 0.0, 1.0)
    })
}

/// Whether the fragment at quad-local `local` survives the disc cut.
pub fn covers(local: DVec2) -> bool {
    local.length() <= SPRITE_RADIUS as f64
}
