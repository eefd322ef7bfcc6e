use std::time::{Duration, Instant};

/// High-level behaviour requested by the caller.
///
/// The render policy decides whether frames should animate continuously or
/// be evaluated at a fixed timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderPolicy {
    /// Run the render loop continuously, optionally clamping the frame rate.
    Animate {
        /// Optional requested frames-per-second cap.
        target_fps: Option<f32>,
    },
    /// Render a single frame at an optional timestamp and then idle.
    Still {
        /// Specific timestamp to evaluate the scene at (seconds).
        time: Option<f32>,
    },
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::Animate { target_fps: None }
    }
}

/// Snapshot of the time state supplied to the scene each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock or simulated time in seconds.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    /// Creates a new time sample.
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource: Send {
    /// Resets the source to its initial state.
    fn reset(&mut self);
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source initialised to `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that always reports a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: f32,
}

impl FixedTimeSource {
    /// Constructs a fixed time source that always returns the provided time.
    pub fn new(time: f32) -> Self {
        Self { time }
    }
}

impl TimeSource for FixedTimeSource {
    fn reset(&mut self) {}

    fn sample(&mut self) -> TimeSample {
        TimeSample::new(self.time, 0)
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource + Send>;

/// Builds a time source suited to the requested render policy.
pub fn time_source_for_policy(policy: &RenderPolicy) -> BoxedTimeSource {
    match policy {
        RenderPolicy::Animate { .. } => Box::new(SystemTimeSource::new()),
        RenderPolicy::Still { time } => Box::new(FixedTimeSource::new(time.unwrap_or(0.0))),
    }
}

/// Decides when the window loop should issue the next redraw.
///
/// Animate without a cap is always ready; a capped animation hands the loop
/// a deadline to `WaitUntil`; a still policy renders once and then idles
/// until `reset` (the loop resets on resize so the frozen frame re-renders).
pub struct FrameScheduler {
    interval: Option<Duration>,
    single_shot: bool,
    rendered_once: bool,
    next_frame: Instant,
}

impl FrameScheduler {
    pub fn new(policy: RenderPolicy) -> Self {
        let interval = match policy {
            RenderPolicy::Animate {
                target_fps: Some(fps),
            } if fps > 0.0 => Some(Duration::from_secs_f32(1.0 / fps)),
            _ => None,
        };
        Self {
            interval,
            single_shot: matches!(policy, RenderPolicy::Still { .. }),
            rendered_once: false,
            next_frame: Instant::now(),
        }
    }

    pub fn ready_for_frame(&mut self, now: Instant) -> bool {
        if self.single_shot {
            return !self.rendered_once;
        }
        match self.interval {
            None => true,
            Some(_) => now >= self.next_frame,
        }
    }

    pub fn mark_rendered(&mut self) {
        self.rendered_once = true;
        if let Some(interval) = self.interval {
            let now = Instant::now();
            let target = self.next_frame + interval;
            // Advance one interval at a time, but never schedule into the
            // past after a long stall (avoids a burst of catch-up frames).
            self.next_frame = if target < now { now + interval } else { target };
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.single_shot {
            return None;
        }
        self.interval.map(|_| self.next_frame)
    }

    pub fn reset(&mut self) {
        self.rendered_once = false;
        self.next_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_animation_is_always_ready() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Animate { target_fps: None });
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered();
        assert!(scheduler.ready_for_frame(now + Duration::from_micros(1)));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn fps_cap_spaces_out_frames() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Animate {
            target_fps: Some(10.0),
        });
        let start = Instant::now();
        assert!(scheduler.ready_for_frame(start));
        scheduler.mark_rendered();
        let deadline = scheduler.next_deadline().expect("capped policy has a deadline");
        assert!(!scheduler.ready_for_frame(deadline - Duration::from_millis(50)));
        assert!(scheduler.ready_for_frame(deadline + Duration::from_millis(1)));
    }

    #[test]
    fn still_policy_renders_once_until_reset() {
        let mut scheduler = FrameScheduler::new(RenderPolicy::Still { time: Some(2.5) });
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered();
        assert!(!scheduler.ready_for_frame(now));
        assert!(scheduler.next_deadline().is_none());
        scheduler.reset();
        assert!(scheduler.ready_for_frame(Instant::now()));
    }

    #[test]
    fn fixed_source_reports_constant_time() {
        let mut source = FixedTimeSource::new(4.25);
        assert_eq!(source.sample(), TimeSample::new(4.25, 0));
        assert_eq!(source.sample(), TimeSample::new(4.25, 0));
    }

    #[test]
    fn system_source_advances_frames() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        let second = source.sample();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!(second.seconds >= first.seconds);
    }
}
