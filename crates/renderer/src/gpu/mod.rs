//! GPU orchestration for the rings scene.
//!
//! - `context` owns wgpu instance/device/surface wiring and swapchain
//!   rebuilds on resize.
//! - `pipeline` compiles the two effect programs into render pipelines with
//!   their vertex and uniform buffers.
//! - `uniforms` mirrors the std140 blocks written per frame and on resize.
//! - `state` glues everything together and tracks whether the scene ever
//!   became drawable.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
