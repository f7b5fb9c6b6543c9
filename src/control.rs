//! Control surface between the network layer and the scheduler
//!
//! Requests are validated at the boundary with the `parse_*` helpers, then
//! posted as [`ControlIntent`]s through a [`ControlChannel`]. The scheduler
//! drains the channel at the start of every pass, so a request takes effect
//! on the next pass and never mid-tick.

use core::fmt;

use crate::animation::AnimationMode;
use crate::channel::{Queue, Signal};
use crate::color::{Rgb, rgb_from_u32};
use crate::controls::Speed;

/// A change requested by the control surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlIntent {
    SetMode(AnimationMode),
    /// Speed multiplier; clamped by the scheduler
    SetSpeed(f32),
    SetColor(Rgb),
    /// Light (`on`) or clear one drawing cell with the selected color
    SetPixel { col: i32, row: i32, on: bool },
    ClearGrid,
    FillGrid(Rgb),
    DrawBorder(Rgb),
}

/// Reasons a control request is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Mode index or name is not known
    InvalidMode,
    /// Color is not six hex digits
    InvalidColor,
    /// Speed is not a number in the accepted range
    SpeedOutOfRange,
    MissingParameter,
    /// The scheduler has not drained earlier requests yet
    ChannelFull,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode => f.write_str("invalid animation mode"),
            Self::InvalidColor => f.write_str("invalid color, expected RRGGBB"),
            Self::SpeedOutOfRange => write!(f, "speed must be between {} and {}", Speed::MIN, Speed::MAX),
            Self::MissingParameter => f.write_str("missing parameter"),
            Self::ChannelFull => f.write_str("control queue full"),
        }
    }
}

/// Bounded intent queue plus the mode-change flag polled by running ticks
///
/// Meant to live in a `static`:
///
/// ```ignore
/// static CONTROL: ControlChannel<8> = ControlChannel::new();
/// ```
pub struct ControlChannel<const SIZE: usize> {
    intents: Queue<ControlIntent, SIZE>,
    mode_changed: Signal,
}

impl<const SIZE: usize> ControlChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            intents: Queue::new(),
            mode_changed: Signal::new(),
        }
    }

    pub const fn sender(&self) -> ControlSender<'_, SIZE> {
        ControlSender { channel: self }
    }

    pub const fn receiver(&self) -> ControlReceiver<'_, SIZE> {
        ControlReceiver { channel: self }
    }
}

impl<const SIZE: usize> Default for ControlChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half, handed to the network layer
#[derive(Clone, Copy)]
pub struct ControlSender<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<const SIZE: usize> ControlSender<'_, SIZE> {
    /// Queue an intent for the next scheduler pass
    ///
    /// Mode changes also raise the cancellation flag, so a tick that is
    /// still running skips its remaining work.
    pub fn send(&self, intent: ControlIntent) -> Result<(), ControlError> {
        self.channel
            .intents
            .push(intent)
            .map_err(|_| ControlError::ChannelFull)?;
        if matches!(intent, ControlIntent::SetMode(_)) {
            self.channel.mode_changed.raise();
        }
        Ok(())
    }
}

/// Receiving half, owned by the scheduler
pub struct ControlReceiver<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<'a, const SIZE: usize> ControlReceiver<'a, SIZE> {
    pub fn try_receive(&self) -> Option<ControlIntent> {
        self.channel.intents.pop()
    }

    /// Flag raised when a mode change is queued
    pub const fn cancel_signal(&self) -> &'a Signal {
        &self.channel.mode_changed
    }
}

/// Parse a mode index (`"0"` to `"10"`)
pub fn parse_mode(raw: Option<&str>) -> Result<AnimationMode, ControlError> {
    let raw = raw.ok_or(ControlError::MissingParameter)?;
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(AnimationMode::from_raw)
        .ok_or(ControlError::InvalidMode)
}

/// Parse a mode slug such as `"nebula"`
pub fn parse_mode_name(raw: Option<&str>) -> Result<AnimationMode, ControlError> {
    let raw = raw.ok_or(ControlError::MissingParameter)?;
    AnimationMode::parse_from_str(raw.trim()).ok_or(ControlError::InvalidMode)
}

/// Parse `"#RRGGBB"` or `"RRGGBB"`
pub fn parse_hex_color(raw: Option<&str>) -> Result<Rgb, ControlError> {
    let raw = raw.ok_or(ControlError::MissingParameter)?.trim();
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ControlError::InvalidColor);
    }
    u32::from_str_radix(digits, 16)
        .map(rgb_from_u32)
        .map_err(|_| ControlError::InvalidColor)
}

/// Parse a speed multiplier, rejecting values outside the accepted range
pub fn parse_speed(raw: Option<&str>) -> Result<Speed, ControlError> {
    let raw = raw.ok_or(ControlError::MissingParameter)?;
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|_| ControlError::SpeedOutOfRange)?;
    if !Speed::accepts(value) {
        return Err(ControlError::SpeedOutOfRange);
    }
    Ok(Speed::new(value))
}
