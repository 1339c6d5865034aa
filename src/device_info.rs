//! Mutable device identity and DMX configuration (C2): UID, label, DMX start address,
//! personality, language, and the factory-defaults flag.

use crate::consts::DEVICE_LABEL_MAX_LENGTH;
use crate::unique_identifier::UniqueIdentifier;

/// A selectable DMX footprint: a slot count plus a human-readable description.
#[derive(Debug, Copy, Clone)]
pub struct Personality {
    pub slot_count: u16,
    pub description: &'static str,
}

/// Construction-time configuration for a [DeviceInfoStore].
#[derive(Debug, Clone)]
pub struct DeviceInfoConfig {
    pub uid: UniqueIdentifier,
    pub device_model_id: u16,
    pub product_category: u16,
    pub software_version_id: u32,
    pub software_version_label: &'static str,
    pub manufacturer_label: &'static str,
    pub supported_language: [u8; 2],
    pub personalities: &'static [Personality],
    pub default_personality: u8,
    pub default_dmx_start_address: u16,
    pub default_label: &'static str,
}

/// A value was outside the range a setter accepts. Length/format validation
/// happens in the calling handler before the store is ever touched; this
/// error is reserved for range violations on otherwise well-formed input.
#[derive(Debug)]
pub struct RangeError;

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "value is out of the accepted range")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RangeError {}

pub struct DeviceInfoStore {
    config: DeviceInfoConfig,
    label: heapless::String<DEVICE_LABEL_MAX_LENGTH>,
    dmx_start_address: u16,
    current_personality: u8,
    factory_defaults: bool,
}

impl DeviceInfoStore {
    pub fn new(config: DeviceInfoConfig) -> Self {
        let dmx_start_address = config.default_dmx_start_address;
        let current_personality = config.default_personality;

        let mut store = Self {
            config,
            label: heapless::String::new(),
            dmx_start_address,
            current_personality,
            factory_defaults: false,
        };
        store.init();
        store
    }

    /// Restores every persisted field to its configured default and sets the
    /// factory-defaults flag.
    pub fn init(&mut self) {
        self.label = heapless::String::try_from(self.config.default_label).unwrap();
        self.dmx_start_address = self.config.default_dmx_start_address;
        self.current_personality = self.config.default_personality;
        self.factory_defaults = true;
    }

    pub fn uid(&self) -> UniqueIdentifier {
        self.config.uid
    }

    pub fn device_model_id(&self) -> u16 {
        self.config.device_model_id
    }

    pub fn product_category(&self) -> u16 {
        self.config.product_category
    }

    pub fn software_version_id(&self) -> u32 {
        self.config.software_version_id
    }

    pub fn software_version_label(&self) -> &'static str {
        self.config.software_version_label
    }

    pub fn manufacturer_label(&self) -> &'static str {
        self.config.manufacturer_label
    }

    pub fn supported_language(&self) -> [u8; 2] {
        self.config.supported_language
    }

    /// The built-in crate only ever supports one language; any other value is rejected.
    pub fn set_supported_language(&mut self, language: [u8; 2]) -> Result<(), RangeError> {
        if language != self.config.supported_language {
            return Err(RangeError);
        }

        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) -> Result<(), RangeError> {
        if label.len() > DEVICE_LABEL_MAX_LENGTH {
            return Err(RangeError);
        }

        self.label = heapless::String::try_from(label).map_err(|_| RangeError)?;
        self.factory_defaults = false;
        Ok(())
    }

    pub fn dmx_start_address(&self) -> u16 {
        self.dmx_start_address
    }

    pub fn set_dmx_start_address(&mut self, address: u16) -> Result<(), RangeError> {
        if !(1..=512).contains(&address) {
            return Err(RangeError);
        }

        self.dmx_start_address = address;
        self.factory_defaults = false;
        Ok(())
    }

    pub fn personalities(&self) -> &'static [Personality] {
        self.config.personalities
    }

    pub fn personality_count(&self) -> u8 {
        self.config.personalities.len() as u8
    }

    pub fn current_personality(&self) -> u8 {
        self.current_personality
    }

    pub fn current_footprint(&self) -> u16 {
        self.personality(self.current_personality)
            .map(|personality| personality.slot_count)
            .unwrap_or(0)
    }

    pub fn set_current_personality(&mut self, personality: u8) -> Result<(), RangeError> {
        if personality == 0 || personality > self.personality_count() {
            return Err(RangeError);
        }

        self.current_personality = personality;
        self.factory_defaults = false;
        Ok(())
    }

    /// Looks up a personality by its 1-based index.
    pub fn personality(&self, index: u8) -> Option<&'static Personality> {
        if index == 0 {
            return None;
        }

        self.config.personalities.get(index as usize - 1)
    }

    pub fn factory_defaults(&self) -> bool {
        self.factory_defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PERSONALITIES: &[Personality] = &[
        Personality { slot_count: 4, description: "4 channel" },
        Personality { slot_count: 8, description: "8 channel" },
    ];

    fn config() -> DeviceInfoConfig {
        DeviceInfoConfig {
            uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
            device_model_id: 1,
            product_category: 0x0100,
            software_version_id: 0x0001_0000,
            software_version_label: "1.0.0",
            manufacturer_label: "Acme",
            supported_language: *b"en",
            personalities: PERSONALITIES,
            default_personality: 1,
            default_dmx_start_address: 1,
            default_label: "Lamp",
        }
    }

    #[test]
    fn init_restores_defaults_and_sets_factory_flag() {
        let mut store = DeviceInfoStore::new(config());
        assert!(store.factory_defaults());

        store.set_label("Changed").unwrap();
        assert!(!store.factory_defaults());

        store.init();
        assert_eq!(store.label(), "Lamp");
        assert!(store.factory_defaults());
    }

    #[test]
    fn set_label_rejects_too_long() {
        let mut store = DeviceInfoStore::new(config());
        let too_long = "a".repeat(33);
        store.set_label(&too_long).unwrap_err();
        assert_eq!(store.label(), "Lamp");
    }

    #[test]
    fn set_dmx_start_address_validates_range() {
        let mut store = DeviceInfoStore::new(config());
        store.set_dmx_start_address(0).unwrap_err();
        store.set_dmx_start_address(513).unwrap_err();
        store.set_dmx_start_address(42).unwrap();
        assert_eq!(store.dmx_start_address(), 42);
    }

    #[test]
    fn set_current_personality_validates_range() {
        let mut store = DeviceInfoStore::new(config());
        store.set_current_personality(0).unwrap_err();
        store.set_current_personality(3).unwrap_err();
        store.set_current_personality(2).unwrap();
        assert_eq!(store.current_personality(), 2);
        assert_eq!(store.current_footprint(), 8);
    }

    #[test]
    fn set_supported_language_requires_exact_match() {
        let mut store = DeviceInfoStore::new(config());
        store.set_supported_language(*b"de").unwrap_err();
        store.set_supported_language(*b"en").unwrap();
    }
}
