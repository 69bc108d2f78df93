use crate::shaders;
use bytemuck::{Pod, Zeroable};
use orbitview_camera::PerspectiveCamera;
use orbitview_common::Rgb;
use orbitview_render::{GridLines, Scene};
use wgpu::util::DeviceExt;

/// Sample count used when antialiasing is enabled.
pub const MSAA_SAMPLES: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
}

impl Uniforms {
    fn new(camera: &PerspectiveCamera, color: Rgb, srgb_target: bool) -> Self {
        let [r, g, b] = color_channels(color, srgb_target);
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            color: [r, g, b, 1.0],
        }
    }
}

/// sRGB targets expect linear values; everything else takes the raw channels.
fn color_channels(color: Rgb, srgb_target: bool) -> [f32; 3] {
    if srgb_target {
        color.to_linear()
    } else {
        color.to_unit()
    }
}

fn clear_color(color: Rgb, srgb_target: bool) -> wgpu::Color {
    let [r, g, b] = color_channels(color, srgb_target);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Grid vertices uploaded to the GPU.
struct GridBuffer {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    color: Rgb,
}

impl GridBuffer {
    fn upload(device: &wgpu::Device, grid: &GridLines) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(grid.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let vertex_count = grid.vertex_count() as u32;
        tracing::debug!(vertex_count, "grid uploaded");
        Self {
            vertex_buffer,
            vertex_count,
            color: grid.color(),
        }
    }
}

/// wgpu renderer for the reference grid.
///
/// The grid is static, so its vertices are uploaded on the first frame and
/// reused for every frame after.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    grid: Option<GridBuffer>,
    msaa_view: Option<wgpu::TextureView>,
    sample_count: u32,
    surface_format: wgpu::TextureFormat,
}

impl GridRenderer {
    /// Create the line pipeline. `antialias` enables 4x MSAA.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        antialias: bool,
        width: u32,
        height: u32,
    ) -> Self {
        let sample_count = if antialias { MSAA_SAMPLES } else { 1 };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grid_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        let msaa_view =
            Self::create_msaa_view(device, surface_format, sample_count, width, height);

        tracing::debug!(sample_count, "grid renderer created");

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            grid: None,
            msaa_view,
            sample_count,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.msaa_view = Self::create_msaa_view(
            device,
            self.surface_format,
            self.sample_count,
            width,
            height,
        );
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Record the grid pass into `encoder`, clearing `target` first.
    pub fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) {
        let grid = self
            .grid
            .get_or_insert_with(|| GridBuffer::upload(device, &scene.grid));

        let srgb = self.surface_format.is_srgb();
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(camera, grid.color, srgb)),
        );

        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(target)),
            None => (target, None),
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grid_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(scene.clear_color, srgb)),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, grid.vertex_buffer.slice(..));
        pass.draw(0..grid.vertex_count, 0..1);
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa_color_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&Default::default()))
    }
}
