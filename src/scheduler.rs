//! Cooperative scheduler and mode controller
//!
//! Runs one pass per call and returns timing info so the caller can sleep;
//! nothing here blocks. Each pass:
//!
//! 1. feeds the watchdog if its soft deadline was reached
//! 2. services the network control API
//! 3. services the update transport
//! 4. applies queued control requests and mode changes
//! 5. dispatches exactly one tick to the active animation
//!
//! Long ticks hand control back to housekeeping through
//! [`TickContext::yield_now`] at the grain declared by each animation.
//!
//! # Usage
//!
//! ```ignore
//! static CONTROL: ControlChannel<8> = ControlChannel::new();
//!
//! let mut scheduler = Scheduler::new(
//!     SystemClock,
//!     SmartLedsSink::new(ws2812),
//!     sensor,
//!     Duties::new(web_server, ota, watchdog),
//!     CONTROL.receiver(),
//!     &EngineConfig::default(),
//! );
//!
//! loop {
//!     let result = scheduler.poll();
//!     Timer::after(result.sleep_duration).await;
//! }
//! ```

use embassy_time::{Duration, Instant};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::animation::{AnimationMode, AnimationSlot, AutoCycle, TickContext, YieldPoint};
use crate::color::{BLACK, Rgb, rgb_to_u32};
use crate::config::{EngineConfig, Timings};
use crate::control::{ControlIntent, ControlReceiver};
use crate::controls::{Controls, Speed};
use crate::housekeeping::{Housekeeper, Housekeeping};
use crate::render::Canvas;
use crate::sensor::Sensor;
use crate::{Clock, FramebufferSink};

/// Result of a scheduler pass
#[derive(Debug, Clone, Copy)]
pub struct PassResult {
    /// When the next pass should start
    pub next_deadline: Instant,
    /// How long to wait until the next pass (may be zero if behind schedule)
    pub sleep_duration: Duration,
    /// Animation that was ticked, with auto mode resolved
    pub mode: Option<AnimationMode>,
}

/// Housekeeping hook handed to animations as their [`YieldPoint`]
struct Yielder<'y, C, H> {
    clock: &'y C,
    housekeeper: &'y mut Housekeeper<H>,
    grain: Duration,
}

impl<C: Clock, H: Housekeeping> YieldPoint for Yielder<'_, C, H> {
    fn yield_now(&mut self) {
        let now = self.clock.now();
        self.housekeeper.service_if_due(now, self.grain);
    }
}

pub struct Scheduler<'a, C, F, S, H, const CH: usize>
where
    C: Clock,
    F: FramebufferSink,
    S: Sensor,
    H: Housekeeping,
{
    // Collaborators
    clock: C,
    sink: F,
    sensor: S,
    housekeeper: Housekeeper<H>,
    intents: ControlReceiver<'a, CH>,
    timings: Timings,

    // Shared state
    controls: Controls,
    rng: SmallRng,

    // Mode state
    mode: AnimationMode,
    slot: Option<AnimationSlot>,
    auto: AutoCycle,
    next_pass: Instant,
}

impl<'a, C, F, S, H, const CH: usize> Scheduler<'a, C, F, S, H, CH>
where
    C: Clock,
    F: FramebufferSink,
    S: Sensor,
    H: Housekeeping,
{
    /// Create a scheduler; the configured mode is activated on the first pass
    pub fn new(
        clock: C,
        sink: F,
        sensor: S,
        duties: H,
        intents: ControlReceiver<'a, CH>,
        config: &EngineConfig,
    ) -> Self {
        let mut controls = Controls::new(config.speed, config.color);
        controls.request_mode(config.mode);

        Self {
            clock,
            sink,
            sensor,
            housekeeper: Housekeeper::new(duties, config.timings.watchdog_feed),
            intents,
            timings: config.timings,
            controls,
            rng: SmallRng::seed_from_u64(config.seed),
            mode: config.mode,
            slot: None,
            auto: AutoCycle::new(config.timings.auto_cycle),
            next_pass: Instant::from_millis(0),
        }
    }

    /// Run one scheduler pass
    ///
    /// The caller is responsible for waiting `sleep_duration` before
    /// calling `poll` again.
    pub fn poll(&mut self) -> PassResult {
        let now = self.clock.now();

        self.housekeeper.feed_if_due(now);
        self.housekeeper.service(now);

        self.process_intents();
        self.intents.cancel_signal().take();
        if let Some(mode) = self.controls.take_requested_mode() {
            self.activate(mode, now);
        }

        if self.mode == AnimationMode::Auto {
            if let Some(next) = self.auto.advance_if_due(now) {
                log::info!("auto cycle switching to {}", next.display_name());
                self.switch_to(next);
            }
        }

        self.dispatch(now);
        self.finish_pass(now)
    }

    /// Request a mode change, applied on the next pass
    ///
    /// Selecting the current mode again restarts it.
    pub fn set_mode(&mut self, mode: AnimationMode) {
        log::debug!("mode {} requested", mode.as_str());
        self.controls.request_mode(mode);
    }

    /// Set the speed multiplier, clamping it into the accepted range
    pub fn set_speed(&mut self, value: f32) {
        let speed = Speed::new(value);
        if !Speed::accepts(value) {
            log::warn!("speed {value} clamped to {}", speed.value());
        }
        log::info!("speed set to {}", speed.value());
        self.controls.set_speed(speed);
    }

    pub fn set_color(&mut self, color: Rgb) {
        log::info!("color set to #{:06X}", rgb_to_u32(color));
        self.controls.set_color(color);
    }

    /// Light a drawing cell with the selected color, or turn it off
    ///
    /// Out-of-range cells are ignored; returns `false` for them.
    pub fn set_drawing_pixel(&mut self, col: i32, row: i32, on: bool) -> bool {
        let color = if on { self.controls.color() } else { BLACK };
        self.controls.grid_mut().set(col, row, color)
    }

    pub fn clear_drawing_grid(&mut self) {
        self.controls.grid_mut().clear();
    }

    pub fn fill_drawing_grid(&mut self, color: Rgb) {
        self.controls.grid_mut().fill(color);
    }

    pub fn draw_border(&mut self, color: Rgb) {
        self.controls.grid_mut().border(color);
    }

    /// Apply one control request directly
    pub fn apply(&mut self, intent: ControlIntent) {
        match intent {
            ControlIntent::SetMode(mode) => self.set_mode(mode),
            ControlIntent::SetSpeed(value) => self.set_speed(value),
            ControlIntent::SetColor(color) => self.set_color(color),
            ControlIntent::SetPixel { col, row, on } => {
                self.set_drawing_pixel(col, row, on);
            }
            ControlIntent::ClearGrid => self.clear_drawing_grid(),
            ControlIntent::FillGrid(color) => self.fill_drawing_grid(color),
            ControlIntent::DrawBorder(color) => self.draw_border(color),
        }
    }

    /// Selected mode (may be [`AnimationMode::Auto`])
    pub const fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub const fn mode_index(&self) -> u8 {
        self.mode.id()
    }

    pub const fn mode_name(&self) -> &'static str {
        self.mode.display_name()
    }

    /// Concrete animation currently running, with auto mode resolved
    pub fn active_mode(&self) -> Option<AnimationMode> {
        self.slot.as_ref().map(AnimationSlot::mode)
    }

    pub fn last_temperature(&self) -> Option<f32> {
        self.controls.telemetry().temperature()
    }

    pub fn last_humidity(&self) -> Option<f32> {
        self.controls.telemetry().humidity()
    }

    pub const fn speed(&self) -> Speed {
        self.controls.speed()
    }

    pub const fn color(&self) -> Rgb {
        self.controls.color()
    }

    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    pub const fn timings(&self) -> &Timings {
        &self.timings
    }

    pub const fn sink(&self) -> &F {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }

    pub const fn housekeeper(&self) -> &Housekeeper<H> {
        &self.housekeeper
    }

    pub fn housekeeper_mut(&mut self) -> &mut Housekeeper<H> {
        &mut self.housekeeper
    }

    /// Drain queued control requests (non-blocking)
    fn process_intents(&mut self) {
        while let Some(intent) = self.intents.try_receive() {
            self.apply(intent);
        }
    }

    fn activate(&mut self, mode: AnimationMode, now: Instant) {
        log::info!("animation mode changed to {}", mode.display_name());
        self.mode = mode;

        let inner = if mode == AnimationMode::Auto {
            self.auto.restart(now);
            self.auto.current()
        } else {
            mode
        };
        self.switch_to(inner);
    }

    /// Blank the panel and start `mode` from a clean state
    fn switch_to(&mut self, mode: AnimationMode) {
        Canvas::new(&mut self.sink).blank();

        match self.slot.as_mut() {
            Some(slot) if slot.mode() == mode => slot.reset(),
            _ => self.slot = mode.to_slot(),
        }
    }

    fn dispatch(&mut self, now: Instant) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };

        let mut yielder = Yielder {
            clock: &self.clock,
            housekeeper: &mut self.housekeeper,
            grain: slot.housekeeping_grain(),
        };
        let mut ctx = TickContext::new(
            Canvas::new(&mut self.sink),
            &mut self.controls,
            &mut self.rng,
            &mut self.sensor,
            &mut yielder,
            self.intents.cancel_signal(),
        );
        slot.tick(now, &mut ctx);
    }

    fn finish_pass(&mut self, now: Instant) -> PassResult {
        let period = self.timings.pass_yield;

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        if now > self.next_pass + period + period {
            self.next_pass = now;
        }
        self.next_pass += period;

        PassResult {
            next_deadline: self.next_pass,
            sleep_duration: self.next_pass.saturating_duration_since(now),
            mode: self.active_mode(),
        }
    }
}
