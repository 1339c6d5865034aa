pub const SC_RDM: u8 = 0xCC;
pub const SC_SUB_MESSAGE: u8 = 0x01;

pub const PREAMBLE_BYTE: u8 = 0xFE;
pub const SEPARATOR_BYTE: u8 = 0xAA;

pub const BROADCAST_UID: u64 = 0xFFFF_FFFFFFFF;

pub const RDM_MIN_PACKAGE_SIZE: usize = 22;
pub const RDM_MAX_PACKAGE_SIZE: usize = 257;
/// Header length excluding param_data, including the checksum.
pub const RDM_MESSAGE_MINIMUM_SIZE: usize = 24;

/// Excluding preamble and separator.
pub const RDM_DISCOVERY_RESPONSE_SIZE: usize = 16;
/// Including 7 bytes preamble + 1 byte separator.
pub const RDM_MAX_DISCOVERY_RESPONSE_SIZE: usize = RDM_DISCOVERY_RESPONSE_SIZE + 8;

pub const RDM_MAX_PARAMETER_DATA_LENGTH: usize = 231;
pub const RDM_DEVICE_INFO_SIZE: usize = 0x13;

pub const DEVICE_LABEL_MAX_LENGTH: usize = 32;
pub const PERSONALITY_DESCRIPTION_MAX_LENGTH: usize = 32;
