use crate::error::GpuError;
use crate::shaders::{self, ShaderSources};
use bytemuck::{Pod, Zeroable};
use marchview_render::{RenderView, Renderer};
use wgpu::util::DeviceExt;

/// Two triangles covering clip space, as `(x, y)` pairs.
#[rustfmt::skip]
pub const QUAD_VERTICES: [[f32; 2]; 6] = [
    [-1.0, -1.0], [ 1.0, -1.0], [-1.0,  1.0],
    [-1.0,  1.0], [ 1.0, -1.0], [ 1.0,  1.0],
];

/// Camera uniform block, laid out to match the WGSL struct
/// `{ resolution: vec2<f32>, eye: vec3<f32>, back: vec3<f32>, up: vec3<f32> }`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    _pad0: [f32; 2],
    pub eye: [f32; 3],
    _pad1: f32,
    pub back: [f32; 3],
    _pad2: f32,
    pub up: [f32; 3],
    _pad3: f32,
}

impl Uniforms {
    pub fn new(width: u32, height: u32, view: &RenderView) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            eye: view.eye.to_array(),
            back: view.back.to_array(),
            up: view.up.to_array(),
            ..Self::zeroed()
        }
    }
}

/// wgpu-backed renderer for the full-screen shader quad.
pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    quad_vertex_buffer: wgpu::Buffer,
}

impl WgpuRenderer {
    /// Acquire a surface for `target`, then compile and link `sources`.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        sources: &ShaderSources,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("marchview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(
                config.width,
                config.height,
                &RenderView::default(),
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
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
            label: Some("camera_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };
        let pipeline = shaders::build_program(
            &device,
            &pipeline_layout,
            vertex_layout,
            surface_format,
            sources,
        )?;

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            quad_vertex_buffer,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        tracing::debug!(width = self.config.width, height = self.config.height, "surface resized");
    }
}

impl Renderer for WgpuRenderer {
    type Output = Result<(), GpuError>;

    /// Push resolution and camera vectors, then draw the quad.
    fn render(&mut self, view: &RenderView) -> Result<(), GpuError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost; reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(self.config.width, self.config.height, view)),
        );

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
            pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::mem::{offset_of, size_of};

    #[test]
    fn uniform_layout_matches_wgsl() {
        assert_eq!(size_of::<Uniforms>(), 64);
        assert_eq!(offset_of!(Uniforms, resolution), 0);
        assert_eq!(offset_of!(Uniforms, eye), 16);
        assert_eq!(offset_of!(Uniforms, back), 32);
        assert_eq!(offset_of!(Uniforms, up), 48);
    }

    #[test]
    fn uniforms_carry_view() {
        let view = RenderView {
            eye: Vec3::new(1.0, 2.0, 3.0),
            back: Vec3::NEG_Z,
            up: Vec3::Y,
        };
        let uniforms = Uniforms::new(800, 600, &view);
        assert_eq!(uniforms.resolution, [800.0, 600.0]);
        assert_eq!(uniforms.eye, [1.0, 2.0, 3.0]);
        assert_eq!(uniforms.back, [0.0, 0.0, -1.0]);
        assert_eq!(uniforms.up, [0.0, 1.0, 0.0]);

        let bytes = bytemuck::bytes_of(&uniforms);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[4..7], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn quad_covers_clip_space_with_two_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 6);
        let area = |t: &[[f32; 2]]| {
            let [a, b, c] = [t[0], t[1], t[2]];
            ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
        };
        let total = area(&QUAD_VERTICES[..3]) + area(&QUAD_VERTICES[3..]);
        assert_eq!(total, 4.0);
        for [x, y] in QUAD_VERTICES {
            assert_eq!(x.abs(), 1.0);
            assert_eq!(y.abs(), 1.0);
        }
    }
}
