//! Collaborator contracts (§6): the bus, clock, hardware, and persistence seams a
//! concrete responder plugs into the core through.

/// Drives the half-duplex RS485 bus. Implementations own the physical framing
/// (break/mark-after-break, baud switching) and only need to hand the core raw
/// RDM bytes.
pub trait BusDriver {
    type Error;

    /// Whether a full frame is sitting in [Self::frame_buffer].
    fn frame_available(&self) -> bool;

    /// Marks the current frame as consumed.
    fn clear_frame_available(&mut self);

    /// The buffer holding the most recently received frame. The core reads the
    /// request from it and later overwrites it with the serialized reply.
    fn frame_buffer(&mut self) -> &mut [u8];

    /// Sends the first `len` bytes of [Self::frame_buffer] as a standard RDM response.
    fn send_response(&mut self, len: usize) -> Result<(), Self::Error>;

    /// Sends the first `len` bytes of [Self::frame_buffer] as a discovery response,
    /// preceded by the driver's own preamble timing.
    fn send_discovery_response(&mut self, len: usize) -> Result<(), Self::Error>;
}

/// Calendar time, as required by REAL_TIME_CLOCK.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WallClock {
    /// Years since 1900, matching the C `struct tm` convention this field is sourced from.
    pub year_since_1900: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

pub trait Clock {
    /// Seconds since the device powered on, used by DEVICE_HOURS.
    fn uptime_seconds(&self) -> u64;

    fn wallclock(&self) -> WallClock;
}

/// Board-specific facts and actions that don't belong in the portable core.
pub trait HardwareControl {
    /// Triggers a device reset. Never returns; the caller has already sent the
    /// RESET_DEVICE ACK by the time this is called.
    fn reboot(&self) -> !;

    fn firmware_revision(&self) -> u32;

    fn board_model(&self) -> &str;

    fn firmware_copyright(&self) -> &str;
}

/// Hook for persisting configuration changes across power cycles. All methods
/// default to doing nothing, so a responder with no persistent storage can
/// ignore this trait entirely.
pub trait PersistenceHandler {
    fn on_label_changed(&mut self, _label: &str) {}

    fn on_start_address_changed(&mut self, _address: u16) {}

    fn on_personality_changed(&mut self, _personality: u8) {}
}

/// A [PersistenceHandler] that never persists anything.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoopPersistence;

impl PersistenceHandler for NoopPersistence {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_persistence_accepts_every_callback() {
        let mut persistence = NoopPersistence;
        persistence.on_label_changed("new label");
        persistence.on_start_address_changed(42);
        persistence.on_personality_changed(2);
    }
}
