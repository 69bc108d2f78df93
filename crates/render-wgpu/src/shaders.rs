/// WGSL shader for flat-coloured line segments.
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct LineVertex {
    @location(0) position: vec3<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> @builtin(position) vec4<f32> {
    return uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_line() -> @location(0) vec4<f32> {
    return uniforms.color;
}
"#;
