//! Embedded shader sources and per-stage compilation.
//!
//! Both effect programs are strict GLSL 450, so either backend accepts them
//! unchanged: naga's frontend parses the GLSL directly, while shaderc goes
//! through SPIR-V and produces friendlier diagnostics on failure.

use std::borrow::Cow;

use wgpu::naga::ShaderStage;

use crate::types::{RendererError, ShaderCompiler};

pub(crate) const BACKGROUND_VERTEX: &str = include_str!("shaders/background.vert");
pub(crate) const BACKGROUND_FRAGMENT: &str = include_str!("shaders/background.frag");
pub(crate) const CIRCLE_VERTEX: &str = include_str!("shaders/circle.vert");
pub(crate) const CIRCLE_FRAGMENT: &str = include_str!("shaders/circle.frag");

fn stage_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex",
        ShaderStage::Fragment => "fragment",
        _ => "shader",
    }
}

/// Compiles one GLSL stage into a shader module via the selected backend.
pub(crate) fn compile_shader(
    device: &wgpu::Device,
    source: &str,
    stage: ShaderStage,
    label: &'static str,
    compiler: ShaderCompiler,
) -> Result<wgpu::ShaderModule, RendererError> {
    match compiler {
        #[cfg(feature = "shaderc")]
        ShaderCompiler::Shaderc => compile_with_shaderc(device, source, stage, label),
        #[cfg(not(feature = "shaderc"))]
        ShaderCompiler::Shaderc => {
            Err(RendererError::ShaderCompilation {
                stage: stage_name(stage),
                label,
                message: "shaderc backend requested but not compiled in".to_string(),
            })
        }
        ShaderCompiler::NagaGlsl => Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Glsl {
                shader: Cow::Borrowed(source),
                stage,
                defines: &[],
            },
        })),
    }
}

#[cfg(feature = "shaderc")]
fn compile_with_shaderc(
    device: &wgpu::Device,
    source: &str,
    stage: ShaderStage,
    label: &'static str,
) -> Result<wgpu::ShaderModule, RendererError> {
    let kind = match stage {
        ShaderStage::Vertex => shaderc::ShaderKind::Vertex,
        ShaderStage::Fragment => shaderc::ShaderKind::Fragment,
        _ => shaderc::ShaderKind::InferFromSource,
    };
    let compiler = shaderc::Compiler::new().map_err(|err| RendererError::ShaderCompilation {
        stage: stage_name(stage),
        label,
        message: format!("shaderc initialisation failed: {err}"),
    })?;
    let artifact = compiler
        .compile_into_spirv(source, kind, label, "main", None)
        .map_err(|err| RendererError::ShaderCompilation {
            stage: stage_name(stage),
            label,
            message: err.to_string(),
        })?;
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::SpirV(Cow::Owned(artifact.as_binary().to_vec())),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sources_declare_entry_points() {
        for source in [
            BACKGROUND_VERTEX,
            BACKGROUND_FRAGMENT,
            CIRCLE_VERTEX,
            CIRCLE_FRAGMENT,
        ] {
            assert!(source.contains("void main()"));
            assert!(source.starts_with("#version 450"));
        }
    }

    #[test]
    fn background_fragment_declares_the_gradient_colors() {
        assert!(BACKGROUND_FRAGMENT.contains("uColorInner"));
        assert!(BACKGROUND_FRAGMENT.contains("uColorCenter"));
        assert!(BACKGROUND_FRAGMENT.contains("uColorOuter"));
    }

    #[test]
    fn circle_vertex_expands_the_strip_per_instance() {
        assert!(CIRCLE_VERTEX.contains("gl_InstanceIndex"));
        assert!(CIRCLE_VERTEX.contains("uAspectRatio"));
        assert!(CIRCLE_VERTEX.contains("uPositions[5]"));
    }
}
