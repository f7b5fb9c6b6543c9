#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use embassy_time::Instant;
use matrix_composer::animation::{Animation, NoYield, TickContext};
use matrix_composer::channel::Signal;
use matrix_composer::color::{BLACK, Rgb};
use matrix_composer::controls::Controls;
use matrix_composer::render::Canvas;
use matrix_composer::sink::FrameBuffer;
use matrix_composer::{Clock, FramebufferSink, Housekeeping, PIXEL_COUNT, Reading, Sensor, SensorError};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub type Frame = [Rgb; PIXEL_COUNT];

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<u64>,
}

impl ManualClock {
    pub fn new(millis: u64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.millis.get())
    }
}

/// Clock that moves forward by `step` every time it is read
#[derive(Debug)]
pub struct SteppingClock {
    millis: Cell<u64>,
    step: u64,
}

impl SteppingClock {
    pub fn new(step: u64) -> Self {
        Self {
            millis: Cell::new(0),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let millis = self.millis.get();
        self.millis.set(millis + self.step);
        Instant::from_millis(millis)
    }
}

/// Sink that keeps a copy of every flushed frame
#[derive(Debug)]
pub struct RecordingSink {
    pixels: Frame,
    pub frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            pixels: [BLACK; PIXEL_COUNT],
            frames: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn pending(&self) -> &Frame {
        &self.pixels
    }
}

impl FramebufferSink for RecordingSink {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.pixels[index] = color;
    }

    fn clear(&mut self) {
        self.pixels = [BLACK; PIXEL_COUNT];
    }

    fn flush(&mut self) {
        self.frames.push(self.pixels);
    }
}

pub fn is_blank(frame: &Frame) -> bool {
    frame.iter().all(|pixel| *pixel == BLACK)
}

pub fn lit_count(frame: &Frame) -> usize {
    frame.iter().filter(|pixel| **pixel != BLACK).count()
}

/// Sensor that replays a script, then repeats its last answer
#[derive(Debug)]
pub struct ScriptedSensor {
    script: VecDeque<Result<Reading, SensorError>>,
    last: Result<Reading, SensorError>,
    pub reads: usize,
}

impl ScriptedSensor {
    pub fn new(script: impl IntoIterator<Item = Result<Reading, SensorError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: Err(SensorError::Unavailable),
            reads: 0,
        }
    }

    pub fn always(result: Result<Reading, SensorError>) -> Self {
        let mut sensor = Self::new([]);
        sensor.last = result;
        sensor
    }
}

impl Sensor for ScriptedSensor {
    fn try_read(&mut self) -> Result<Reading, SensorError> {
        self.reads += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

pub fn reading(temperature: f32) -> Result<Reading, SensorError> {
    Ok(Reading {
        temperature,
        humidity: 40.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duty {
    Network,
    Updates,
    Watchdog,
}

/// Housekeeping fake that logs every call
#[derive(Debug, Default)]
pub struct RecordingDuties {
    pub calls: Vec<Duty>,
}

impl RecordingDuties {
    pub fn count(&self, duty: Duty) -> usize {
        self.calls.iter().filter(|call| **call == duty).count()
    }
}

impl Housekeeping for RecordingDuties {
    fn service_network(&mut self) {
        self.calls.push(Duty::Network);
    }

    fn service_updates(&mut self) {
        self.calls.push(Duty::Updates);
    }

    fn feed_watchdog(&mut self) {
        self.calls.push(Duty::Watchdog);
    }
}

/// Everything needed to tick a single animation outside the scheduler
pub struct Bench {
    pub sink: FrameBuffer,
    pub controls: Controls,
    pub rng: SmallRng,
    pub sensor: ScriptedSensor,
    pub cancel: Signal,
}

impl Bench {
    pub fn new() -> Self {
        Self::with_sensor(ScriptedSensor::always(Err(SensorError::Unavailable)))
    }

    pub fn with_sensor(sensor: ScriptedSensor) -> Self {
        Self {
            sink: FrameBuffer::new(),
            controls: Controls::default(),
            rng: SmallRng::seed_from_u64(7),
            sensor,
            cancel: Signal::new(),
        }
    }

    pub fn tick<A: Animation>(&mut self, animation: &mut A, millis: u64) {
        let mut yielder = NoYield;
        let mut ctx = TickContext::new(
            Canvas::new(&mut self.sink),
            &mut self.controls,
            &mut self.rng,
            &mut self.sensor,
            &mut yielder,
            &self.cancel,
        );
        animation.tick(Instant::from_millis(millis), &mut ctx);
    }
}
