use crate::shaders::ShaderStage;
use std::path::PathBuf;

/// Errors from GPU setup and frame submission.
///
/// Everything except [`GpuError::Frame`] is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to read {stage} source {path}: {source}")]
    ReadSource {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage}: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program: {log}")]
    Link { log: String },
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("frame acquisition failed: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}
