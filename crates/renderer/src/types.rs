use crate::runtime::RenderPolicy;

/// Anti-aliasing policy for the render pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// Pick the highest sample count supported by the surface format.
    Auto,
    /// Disable MSAA and render directly into the swapchain.
    Off,
    /// Request a specific MSAA sample count (clamped to what the device supports).
    Samples(u32),
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self::Auto
    }
}

/// Shader compilation backend requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderCompiler {
    /// Compile GLSL through shaderc into SPIR-V (richer diagnostics).
    Shaderc,
    /// Hand GLSL to naga's built-in frontend.
    NagaGlsl,
}

impl ShaderCompiler {
    /// Returns the preferred backend compiled into this build, or `None`
    /// when the build carries no shader compiler at all.
    pub fn detect() -> Option<Self> {
        if cfg!(feature = "shaderc") {
            Some(ShaderCompiler::Shaderc)
        } else if cfg!(feature = "naga-glsl") {
            Some(ShaderCompiler::NagaGlsl)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ShaderCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderCompiler::Shaderc => f.write_str("shaderc"),
            ShaderCompiler::NagaGlsl => f.write_str("naga"),
        }
    }
}

/// Failures that leave the surface permanently undrawn.
///
/// Both variants degrade rendering to cleared frames for the lifetime of
/// the surface; neither is retried.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("no shader compiler backend in this build; enable the `shaderc` or `naga-glsl` feature")]
    UnsupportedCapability,
    #[error("failed to compile {stage} stage of the {label} program: {message}")]
    ShaderCompilation {
        stage: &'static str,
        label: &'static str,
        message: String,
    },
}

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags and tells the renderer how large the
/// window should be, how frames are paced, and which shader backend to use.
#[derive(Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Anti-aliasing mode requested by the caller.
    pub antialiasing: Antialiasing,
    /// Shader backend override; `None` picks the best available one.
    pub shader_compiler: Option<ShaderCompiler>,
    /// Seed for the ring radius jitter; `None` draws fresh geometry per run.
    pub geometry_seed: Option<u64>,
    /// High-level render behaviour requested by the caller.
    pub policy: RenderPolicy,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            antialiasing: Antialiasing::default(),
            shader_compiler: None,
            geometry_seed: None,
            policy: RenderPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_shaderc_over_naga() {
        let detected = ShaderCompiler::detect();
        if cfg!(feature = "shaderc") {
            assert_eq!(detected, Some(ShaderCompiler::Shaderc));
        } else if cfg!(feature = "naga-glsl") {
            assert_eq!(detected, Some(ShaderCompiler::NagaGlsl));
        } else {
            assert_eq!(detected, None);
        }
    }

    #[test]
    fn renderer_errors_render_their_diagnostics() {
        let err = RendererError::ShaderCompilation {
            stage: "vertex",
            label: "circle",
            message: "unexpected token".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("vertex"));
        assert!(rendered.contains("circle"));
        assert!(rendered.contains("unexpected token"));
    }
}
