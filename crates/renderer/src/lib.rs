//! Renderer crate for Ringdrift.
//!
//! Glues the winit window, the `wgpu` effect pipelines, and the scene's
//! animation math together. The overall flow is:
//!
//! ```text
//!   CLI / ringdrift
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ winit event loop ──▶ GpuState::render()
//!          ▲                                      │
//!          │                                      └─▶ cycle angle ─▶ ring offsets ─▶ GPU UBO
//! ```
//!
//! `GpuState` owns all GPU resources (surface, device, pipelines, buffers)
//! and tracks whether the scene ever became drawable; `Renderer` is the
//! thin entry point the binary drives. A build without any shader backend,
//! or a program that fails to compile, leaves the surface in a degraded
//! state that only clears — the window stays up but nothing is drawn.

mod compile;
pub mod geometry;
mod gpu;
pub mod runtime;
pub mod scene;
mod types;
mod window;

pub use runtime::RenderPolicy;
pub use types::{Antialiasing, RendererConfig, RendererError, ShaderCompiler};

use anyhow::Result;

/// High-level entry point that owns the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the rendering window and blocks until it closes.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
