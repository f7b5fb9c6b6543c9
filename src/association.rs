//! Bounded network association loop
//!
//! Waits for the link to come up while blinking the corners blue. The loop
//! never blocks on its own: the caller supplies the pause between polls and
//! a housekeeping callback that runs on every iteration, so the watchdog
//! and update transport stay alive while associating.

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::animation::Pacer;
use crate::color::{BLACK, Rgb};
use crate::config::Timings;
use crate::indicator::paint_corners;
use crate::render::Canvas;
use crate::{Clock, FramebufferSink};

const BLINK_COLOR: Rgb = Rgb { r: 0, g: 0, b: 64 };

/// Network interface being joined
pub trait Link {
    /// Start connecting with the stored credentials
    fn begin(&mut self);

    fn is_connected(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationError {
    /// The deadline passed before the link came up; enter provisioning
    TimedOut,
}

impl fmt::Display for AssociationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut => f.write_str("network association timed out"),
        }
    }
}

/// Join the network, giving up after `timings.association_timeout`
///
/// `housekeeping` runs once per iteration and `pause` is asked to wait
/// `timings.association_poll` between polls. Returns how long the
/// association took. The corners are dark again on return.
pub fn associate<L, C, F>(
    link: &mut L,
    clock: &C,
    sink: &mut F,
    timings: &Timings,
    mut housekeeping: impl FnMut(),
    mut pause: impl FnMut(Duration),
) -> Result<Duration, AssociationError>
where
    L: Link,
    C: Clock,
    F: FramebufferSink,
{
    let mut canvas = Canvas::new(sink);
    let started = clock.now();
    let deadline = started + timings.association_timeout;
    let mut blink = Pacer::new();
    let mut lit = false;

    log::info!("associating with network");
    link.begin();

    let result = loop {
        if link.is_connected() {
            break Ok(clock.now().saturating_duration_since(started));
        }

        let now: Instant = clock.now();
        if now >= deadline {
            break Err(AssociationError::TimedOut);
        }

        if blink.ready(now, timings.association_blink) {
            lit = !lit;
            paint_corners(&mut canvas, if lit { BLINK_COLOR } else { BLACK });
            canvas.flush();
        }

        housekeeping();
        pause(timings.association_poll);
    };

    paint_corners(&mut canvas, BLACK);
    canvas.flush();

    match &result {
        Ok(elapsed) => log::info!("network associated after {} ms", elapsed.as_millis()),
        Err(err) => log::warn!("{err}"),
    }
    result
}
