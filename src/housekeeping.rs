//! Housekeeping duties interleaved with rendering
//!
//! The scheduler services the network, polls for firmware updates and feeds
//! the watchdog between animation frames. [`Housekeeper`] keeps the
//! deadlines; the duties themselves are supplied by the platform.

use embassy_time::{Duration, Instant};

/// A non-blocking poll-style collaborator (network stack, update checker)
pub trait Service {
    fn service(&mut self);
}

/// Hardware watchdog; the platform restarts the device if it is not fed in time
pub trait Watchdog {
    fn feed(&mut self);
}

/// Everything the scheduler has to keep alive while animating
pub trait Housekeeping {
    /// Service the network control API
    fn service_network(&mut self);
    /// Poll the firmware update transport
    fn service_updates(&mut self);
    fn feed_watchdog(&mut self);
}

/// Bundles separate collaborators into one [`Housekeeping`] implementation
#[derive(Debug, Default)]
pub struct Duties<N, U, W> {
    pub network: N,
    pub updates: U,
    pub watchdog: W,
}

impl<N: Service, U: Service, W: Watchdog> Duties<N, U, W> {
    pub const fn new(network: N, updates: U, watchdog: W) -> Self {
        Self {
            network,
            updates,
            watchdog,
        }
    }
}

impl<N: Service, U: Service, W: Watchdog> Housekeeping for Duties<N, U, W> {
    fn service_network(&mut self) {
        self.network.service();
    }

    fn service_updates(&mut self) {
        self.updates.service();
    }

    fn feed_watchdog(&mut self) {
        self.watchdog.feed();
    }
}

/// No-op duty, for platforms without a network or update path
impl Service for () {
    fn service(&mut self) {}
}

impl Watchdog for () {
    fn feed(&mut self) {}
}

/// Tracks when each duty last ran
#[derive(Debug)]
pub struct Housekeeper<H> {
    duties: H,
    feed_interval: Duration,
    last_feed: Option<Instant>,
    last_service: Option<Instant>,
}

impl<H: Housekeeping> Housekeeper<H> {
    pub const fn new(duties: H, feed_interval: Duration) -> Self {
        Self {
            duties,
            feed_interval,
            last_feed: None,
            last_service: None,
        }
    }

    /// Feed the watchdog if its soft deadline has been reached
    pub fn feed_if_due(&mut self, now: Instant) -> bool {
        if !elapsed(self.last_feed, now, self.feed_interval) {
            return false;
        }
        self.feed(now);
        true
    }

    pub fn feed(&mut self, now: Instant) {
        log::trace!("watchdog fed at {} ms", now.as_millis());
        self.duties.feed_watchdog();
        self.last_feed = Some(now);
    }

    /// Service network and update transports unconditionally
    pub fn service(&mut self, now: Instant) {
        self.duties.service_network();
        self.duties.service_updates();
        self.last_service = Some(now);
    }

    /// Service and feed if at least `grain` passed since the last service
    pub fn service_if_due(&mut self, now: Instant, grain: Duration) -> bool {
        if !elapsed(self.last_service, now, grain) {
            return false;
        }
        self.service(now);
        self.feed(now);
        true
    }

    pub const fn duties(&self) -> &H {
        &self.duties
    }

    pub fn duties_mut(&mut self) -> &mut H {
        &mut self.duties
    }
}

fn elapsed(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
    last.is_none_or(|last| now.saturating_duration_since(last) >= interval)
}
