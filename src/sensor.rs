//! Temperature/humidity sensor contract

use core::fmt;

/// One successful sensor sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity, percent
    pub humidity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No sensor was detected at start-up
    Unavailable,
    /// The sensor is present but the read failed
    ReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("sensor not available"),
            Self::ReadFailed => f.write_str("sensor read failed"),
        }
    }
}

/// Source of temperature readings
pub trait Sensor {
    fn try_read(&mut self) -> Result<Reading, SensorError>;
}

/// Stand-in for boards without a sensor; every read fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl Sensor for NoSensor {
    fn try_read(&mut self) -> Result<Reading, SensorError> {
        Err(SensorError::Unavailable)
    }
}
