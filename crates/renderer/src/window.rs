use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::runtime::{time_source_for_policy, FrameScheduler};
use crate::types::RendererConfig;

/// Opens the window and drives the winit event loop until it closes.
///
/// The loop runs in continuous render mode: every time winit is about to
/// wait for events the scheduler decides whether to request another redraw
/// or to sleep until the next frame deadline.
pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("Ringdrift")
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut state = GpuState::new(window.as_ref(), window.inner_size(), config)?;
    if let Some(err) = state.capability_error() {
        // Terminal for this surface: frames stay cleared from here on.
        error!(error = %err, "renderer entered degraded mode");
    } else {
        info!(
            width = state.size().width,
            height = state.size().height,
            "opened rendering window"
        );
    }

    let mut time_source = time_source_for_policy(&config.policy);
    let mut scheduler = FrameScheduler::new(config.policy);
    window.request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                    // A still frame must re-render at the new size.
                    scheduler.reset();
                }
                WindowEvent::ScaleFactorChanged {
                    mut inner_size_writer,
                    ..
                } => {
                    // Keep the current logical size when the scale factor changes.
                    let _ = inner_size_writer.request_inner_size(state.size());
                }
                WindowEvent::RedrawRequested => match state.render(time_source.sample()) {
                    Ok(()) => scheduler.mark_rendered(),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.resize(state.size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("surface out of memory; exiting");
                        elwt.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        warn!("surface timeout; retrying next frame");
                    }
                    Err(other) => {
                        warn!(error = ?other, "surface error; retrying next frame");
                    }
                },
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if scheduler.ready_for_frame(now) {
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = scheduler.next_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
