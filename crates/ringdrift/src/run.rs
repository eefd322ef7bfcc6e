use anyhow::{Context, Result};
use renderer::{RenderPolicy, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let requested_size = args.size.as_deref().map(parse_surface_size).transpose()?;
    let policy = if args.still {
        RenderPolicy::Still {
            time: args.still_time,
        }
    } else {
        RenderPolicy::Animate {
            target_fps: match args.fps {
                Some(fps) if fps > 0.0 => Some(fps),
                _ => None,
            },
        }
    };

    let config = RendererConfig {
        surface_size: requested_size.unwrap_or(RendererConfig::default().surface_size),
        antialiasing: args.antialias,
        shader_compiler: args.shader_compiler,
        geometry_seed: args.seed,
        policy,
    };

    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        ?policy,
        seed = args.seed,
        "starting ringdrift"
    );

    let mut renderer = Renderer::new(config);
    renderer.run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_surface_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("invalid size '{value}'; expected WIDTHxHEIGHT"))?;
    let width: u32 = width
        .trim()
        .parse()
        .with_context(|| format!("invalid width in '{value}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .with_context(|| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        anyhow::bail!("size dimensions must be non-zero");
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_parses_both_separators() {
        assert_eq!(parse_surface_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size("640X480").unwrap(), (640, 480));
        assert_eq!(parse_surface_size(" 200 x 100 ".trim()).unwrap(), (200, 100));
    }

    #[test]
    fn surface_size_rejects_malformed_input() {
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("x720").is_err());
        assert!(parse_surface_size("0x720").is_err());
        assert!(parse_surface_size("wide x tall").is_err());
    }
}
