pub const DISC_UNIQUE_BRANCH: u16 = 0x0001;
pub const DISC_MUTE: u16 = 0x0002;
pub const DISC_UN_MUTE: u16 = 0x0003;

pub const SUPPORTED_PARAMETERS: u16 = 0x0050;
pub const DEVICE_INFO: u16 = 0x0060;
pub const DEVICE_MODEL_DESCRIPTION: u16 = 0x0080;
pub const MANUFACTURER_LABEL: u16 = 0x0081;
pub const DEVICE_LABEL: u16 = 0x0082;
pub const FACTORY_DEFAULTS: u16 = 0x0090;
pub const LANGUAGE_CAPABILITIES: u16 = 0x00A0;
pub const LANGUAGE: u16 = 0x00B0;
pub const SOFTWARE_VERSION_LABEL: u16 = 0x00C0;
pub const BOOT_SOFTWARE_VERSION_ID: u16 = 0x00C1;
pub const BOOT_SOFTWARE_VERSION_LABEL: u16 = 0x00C2;
pub const DMX_PERSONALITY: u16 = 0x00E0;
pub const DMX_PERSONALITY_DESCRIPTION: u16 = 0x00E1;
pub const DMX_START_ADDRESS: u16 = 0x00F0;
pub const DEVICE_HOURS: u16 = 0x0400;
pub const REAL_TIME_CLOCK: u16 = 0x0603;
pub const IDENTIFY_DEVICE: u16 = 0x1000;
pub const RESET_DEVICE: u16 = 0x1001;
