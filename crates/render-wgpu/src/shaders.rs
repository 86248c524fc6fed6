use crate::error::GpuError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex shader"),
            ShaderStage::Fragment => f.write_str("fragment shader"),
        }
    }
}

/// WGSL text of the vertex and fragment shaders.
///
/// The vertex module must declare exactly one `@vertex` entry point taking
/// `@location(0) vec2<f32>`; the fragment module exactly one `@fragment`
/// entry point. Both may read the camera block at `@group(0) @binding(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
    pub vertex_label: String,
    pub fragment_label: String,
}

impl ShaderSources {
    /// Read the vertex source, then the fragment source.
    pub fn load(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self, GpuError> {
        let (vertex, fragment) = (vertex.as_ref(), fragment.as_ref());
        let sources = Self {
            vertex: read_source(ShaderStage::Vertex, vertex)?,
            fragment: read_source(ShaderStage::Fragment, fragment)?,
            vertex_label: vertex.display().to_string(),
            fragment_label: fragment.display().to_string(),
        };
        tracing::info!(
            vertex = %vertex.display(),
            fragment = %fragment.display(),
            "loaded shader sources"
        );
        Ok(sources)
    }

    fn stage(&self, stage: ShaderStage) -> (&str, &str) {
        match stage {
            ShaderStage::Vertex => (&self.vertex_label, &self.vertex),
            ShaderStage::Fragment => (&self.fragment_label, &self.fragment),
        }
    }
}

fn read_source(stage: ShaderStage, path: &Path) -> Result<String, GpuError> {
    std::fs::read_to_string(path).map_err(|source| GpuError::ReadSource {
        stage,
        path: PathBuf::from(path),
        source,
    })
}

fn compile(
    device: &wgpu::Device,
    sources: &ShaderSources,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule, GpuError> {
    let (label, text) = sources.stage(stage);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(text.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(GpuError::Compile {
            stage,
            log: err.to_string(),
        }),
        None => {
            tracing::debug!(%stage, label, "compiled");
            Ok(module)
        }
    }
}

/// Compile both stages and link them into the full-screen quad pipeline.
pub(crate) fn build_program(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    format: wgpu::TextureFormat,
    sources: &ShaderSources,
) -> Result<wgpu::RenderPipeline, GpuError> {
    let vertex = compile(device, sources, ShaderStage::Vertex)?;
    let fragment = compile(device, sources, ShaderStage::Fragment)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quad_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: None,
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: None,
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(GpuError::Link {
            log: err.to_string(),
        });
    }
    tracing::info!("shader program linked");
    Ok(pipeline)
}
