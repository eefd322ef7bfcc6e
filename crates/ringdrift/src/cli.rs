use clap::Parser;
use renderer::{Antialiasing, ShaderCompiler};

#[derive(Parser, Debug)]
#[command(
    name = "ringdrift",
    author,
    version,
    about = "Animated drifting-rings demo rendered with wgpu"
)]
pub struct Args {
    /// Override the window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Optional FPS cap for the animation (0 = uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Render a single frozen frame instead of animating.
    #[arg(long)]
    pub still: bool,

    /// Timestamp in seconds the frozen frame is evaluated at.
    #[arg(long, value_name = "SECONDS", requires = "still")]
    pub still_time: Option<f32>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(
        long,
        value_name = "MODE",
        value_parser = parse_antialias,
        default_value = "auto"
    )]
    pub antialias: Antialiasing,

    /// Shader compiler backend: `shaderc` or `naga` (default: best available).
    #[arg(long, value_name = "COMPILER", value_parser = parse_shader_compiler)]
    pub shader_compiler: Option<ShaderCompiler>,

    /// Seed for the ring radius jitter; omit for fresh geometry every run.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(Antialiasing::Auto),
        "off" | "none" | "disable" | "disabled" | "0" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use auto/off or 2/4/8/16")
            })?;

            if samples == 1 {
                return Ok(Antialiasing::Off);
            }

            if !matches!(samples, 2 | 4 | 8 | 16) {
                return Err(format!(
                    "unsupported sample count {samples}; supported values are 2, 4, 8, or 16"
                ));
            }

            Ok(Antialiasing::Samples(samples))
        }
    }
}

pub fn parse_shader_compiler(value: &str) -> Result<ShaderCompiler, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("shader compiler must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "shaderc" => {
            if cfg!(feature = "shaderc") {
                Ok(ShaderCompiler::Shaderc)
            } else {
                Err("shaderc support is not enabled in this build".to_string())
            }
        }
        "naga" | "naga-glsl" => Ok(ShaderCompiler::NagaGlsl),
        _ => Err("unknown shader compiler (expected shaderc or naga)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antialias_accepts_the_documented_forms() {
        assert_eq!(parse_antialias("auto"), Ok(Antialiasing::Auto));
        assert_eq!(parse_antialias("off"), Ok(Antialiasing::Off));
        assert_eq!(parse_antialias("0"), Ok(Antialiasing::Off));
        assert_eq!(parse_antialias("1"), Ok(Antialiasing::Off));
        assert_eq!(parse_antialias("4"), Ok(Antialiasing::Samples(4)));
        assert_eq!(parse_antialias(" 8 "), Ok(Antialiasing::Samples(8)));
    }

    #[test]
    fn antialias_rejects_unsupported_counts() {
        assert!(parse_antialias("3").is_err());
        assert!(parse_antialias("32").is_err());
        assert!(parse_antialias("fast").is_err());
        assert!(parse_antialias("").is_err());
    }

    #[test]
    fn shader_compiler_accepts_naga_spellings() {
        assert_eq!(parse_shader_compiler("naga"), Ok(ShaderCompiler::NagaGlsl));
        assert_eq!(
            parse_shader_compiler("naga-glsl"),
            Ok(ShaderCompiler::NagaGlsl)
        );
        assert!(parse_shader_compiler("glslang").is_err());
    }

    #[test]
    fn shader_compiler_honors_the_build_features() {
        let parsed = parse_shader_compiler("shaderc");
        if cfg!(feature = "shaderc") {
            assert_eq!(parsed, Ok(ShaderCompiler::Shaderc));
        } else {
            assert!(parsed.is_err());
        }
    }

    #[test]
    fn args_parse_a_full_command_line() {
        let args = Args::parse_from([
            "ringdrift",
            "--size",
            "800x600",
            "--fps",
            "30",
            "--antialias",
            "4",
            "--seed",
            "7",
        ]);
        assert_eq!(args.size.as_deref(), Some("800x600"));
        assert_eq!(args.fps, Some(30.0));
        assert_eq!(args.antialias, Antialiasing::Samples(4));
        assert_eq!(args.seed, Some(7));
        assert!(!args.still);
    }

    #[test]
    fn still_time_requires_still() {
        assert!(Args::try_parse_from(["ringdrift", "--still-time", "2.5"]).is_err());
        let args = Args::try_parse_from(["ringdrift", "--still", "--still-time", "2.5"]).unwrap();
        assert!(args.still);
        assert_eq!(args.still_time, Some(2.5));
    }
}
