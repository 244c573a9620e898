//! WGSL shader sources for the two draw paths.
//!
//! Both shaders share one uniform: an orthographic transform from logical
//! pixel coordinates to clip space. The swapchain is sized to
//! `logical * dpr`, so this matrix is the uniform scale transform that lets
//! all geometry be expressed in logical pixels.

/// Instanced quad per dot; the fragment shader discards outside the unit
/// disc with a short smoothstep edge for antialiasing.
pub const DOT_SHADER: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let world = center + corner * radius;

    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(world, 0.0, 1.0);
    out.color = color;
    out.uv = corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(0.85, 1.0, dist);
    return vec4<f32>(in.color.rgb, in.color.a * edge);
}
"#;

/// Links arrive pre-expanded as thin quads (two triangles per link), so the
/// shader is a plain transform + color passthrough.
pub const LINK_SHADER: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(position, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) {
        let module = naga::front::wgsl::parse_str(source).expect("WGSL should parse");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("WGSL should validate");
    }

    #[test]
    fn test_dot_shader_validates() {
        validate(DOT_SHADER);
    }

    #[test]
    fn test_link_shader_validates() {
        validate(LINK_SHADER);
    }
}
