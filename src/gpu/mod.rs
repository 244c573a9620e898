//! GPU presentation of the field's frame geometry.
//!
//! One swapchain, one uniform (the logical-pixel orthographic transform), and
//! two pipelines: instanced quads for dots, a triangle list for link quads.
//! Buffers are allocated once at the worst case implied by the particle-count
//! clamp and rewritten each frame; nothing here grows at runtime.

mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::field::{FrameGeometry, Link, Surface, MAX_PARTICLES};
use crate::visuals::{Palette, Rgba};

/// Worst-case link count: every unordered pair plus one pointer link per
/// particle.
const MAX_LINKS: usize = MAX_PARTICLES * (MAX_PARTICLES - 1) / 2 + MAX_PARTICLES;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    transform: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DotInstance {
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LinkVertex {
    position: [f32; 2],
    color: [f32; 4],
}

/// GPU resources for the backdrop window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    dot_pipeline: wgpu::RenderPipeline,
    link_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    dot_buffer: wgpu::Buffer,
    link_buffer: wgpu::Buffer,
    dot_color: Rgba,
    link_color: Rgba,
    clear_color: wgpu::Color,
    link_vertices: Vec<LinkVertex>,
}

impl GpuState {
    /// Set up the swapchain and pipelines for `window`, sized to `dims`.
    pub async fn new(
        window: Arc<Window>,
        dims: &Surface,
        palette: &Palette,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gossamer device"),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        tracing::debug!(adapter = %adapter.get_info().name, format = ?surface_format, "gpu ready");

        let (physical_width, physical_height) = dims.physical();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: physical_width,
            height: physical_height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            transform: ortho_transform(dims),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Backdrop Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let dot_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Dot Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::DOT_SHADER.into()),
        });

        let dot_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Dot Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &dot_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<DotInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &dot_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let link_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Link Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINK_SHADER.into()),
        });

        let link_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Link Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &link_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LinkVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &link_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let dot_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dot Buffer"),
            size: (MAX_PARTICLES * std::mem::size_of::<DotInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let link_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Link Buffer"),
            size: (MAX_LINKS * 6 * std::mem::size_of::<LinkVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            dot_pipeline,
            link_pipeline,
            uniform_buffer,
            uniform_bind_group,
            dot_buffer,
            link_buffer,
            dot_color: palette.dot,
            link_color: palette.link,
            clear_color: wgpu::Color {
                r: palette.clear.r as f64,
                g: palette.clear.g as f64,
                b: palette.clear.b as f64,
                a: palette.clear.a as f64,
            },
            link_vertices: Vec::with_capacity(MAX_LINKS * 6),
        })
    }

    /// Reconfigure the swapchain and transform after a resize.
    pub fn resize(&mut self, dims: &Surface) {
        let (physical_width, physical_height) = dims.physical();
        if physical_width == 0 || physical_height == 0 {
            return;
        }
        self.config.width = physical_width;
        self.config.height = physical_height;
        self.surface.configure(&self.device, &self.config);

        let uniforms = Uniforms {
            transform: ortho_transform(dims),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Reconfigure at the current size after a lost surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload one frame's geometry and present it.
    pub fn render(&mut self, frame: &FrameGeometry) -> Result<(), wgpu::SurfaceError> {
        let dots: Vec<DotInstance> = frame
            .dots
            .iter()
            .map(|d| DotInstance {
                center: d.center.to_array(),
                radius: d.radius,
                color: self.dot_color.with_alpha(d.alpha).to_array(),
            })
            .collect();

        self.link_vertices.clear();
        for link in frame.links.iter().chain(frame.pointer_links.iter()) {
            push_link_quad(&mut self.link_vertices, link, self.link_color);
        }

        if !dots.is_empty() {
            self.queue
                .write_buffer(&self.dot_buffer, 0, bytemuck::cast_slice(&dots));
        }
        if !self.link_vertices.is_empty() {
            self.queue.write_buffer(
                &self.link_buffer,
                0,
                bytemuck::cast_slice(&self.link_vertices),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !dots.is_empty() {
                render_pass.set_pipeline(&self.dot_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.dot_buffer.slice(..));
                render_pass.draw(0..6, 0..dots.len() as u32);
            }

            if !self.link_vertices.is_empty() {
                render_pass.set_pipeline(&self.link_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.link_buffer.slice(..));
                render_pass.draw(0..self.link_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Orthographic transform from logical pixels (y down) to clip space.
fn ortho_transform(dims: &Surface) -> [[f32; 4]; 4] {
    Mat4::orthographic_rh(0.0, dims.width, dims.height, 0.0, -1.0, 1.0).to_cols_array_2d()
}

/// Expand a link into a thin quad (two triangles) of the link's width.
fn push_link_quad(out: &mut Vec<LinkVertex>, link: &Link, base: Rgba) {
    let dir = link.b - link.a;
    let len = dir.length();
    let normal = if len > f32::EPSILON {
        glam::Vec2::new(-dir.y, dir.x) / len
    } else {
        glam::Vec2::X
    };
    let offset = normal * (link.width * 0.5);
    let color = base.with_alpha(link.alpha).to_array();

    let corners = [
        link.a - offset,
        link.b - offset,
        link.a + offset,
        link.a + offset,
        link.b - offset,
        link.b + offset,
    ];
    for corner in corners {
        out.push(LinkVertex {
            position: corner.to_array(),
            color,
        });
    }
}
