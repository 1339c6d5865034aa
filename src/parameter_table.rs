//! Static table of supported parameters (C3): one row per PID, naming its get/set
//! handlers as plain function pointers so lookups stay a linear scan with no
//! dynamic dispatch or heap allocation.

use crate::external::{Clock, HardwareControl, PersistenceHandler};
use crate::pids;
use crate::types::{DataPack, NackReason};
use crate::{device_info::DeviceInfoStore, handlers};

/// Borrowed state a handler needs, bundled so [ParamDef]'s function pointers can stay
/// plain `fn` items instead of closures.
pub struct HandlerContext<'a> {
    pub device: &'a mut DeviceInfoStore,
    pub identify: &'a mut bool,
    pub clock: &'a dyn Clock,
    pub hardware: &'a dyn HardwareControl,
    pub persistence: &'a mut dyn PersistenceHandler,
}

pub type GetHandler = fn(ctx: &HandlerContext, param_data: &[u8]) -> Result<DataPack, NackReason>;

/// Outcome of a SET handler. `Reboot` carries the ACK payload to send before the
/// responder hands control to [HardwareControl::reboot].
pub enum SetOutcome {
    Ack(DataPack),
    Nack(NackReason),
    Reboot(DataPack),
}

pub type SetHandler = fn(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome;

pub struct ParamDef {
    pub pid: u16,
    pub get: Option<GetHandler>,
    pub set: Option<SetHandler>,
    /// Expected `parameter_data_length` for a GET request to this pid.
    pub get_arg_size: u8,
    /// Whether this pid is reported by SUPPORTED_PARAMETERS. The handful of
    /// pids every responder must implement per ANSI E1.20 are excluded.
    pub included_in_supported_params: bool,
}

pub static PARAMETER_TABLE: &[ParamDef] = &[
    ParamDef {
        pid: pids::SUPPORTED_PARAMETERS,
        get: Some(handlers::get_supported_parameters),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: false,
    },
    ParamDef {
        pid: pids::DEVICE_INFO,
        get: Some(handlers::get_device_info),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: false,
    },
    ParamDef {
        pid: pids::DEVICE_MODEL_DESCRIPTION,
        get: Some(handlers::get_device_model_description),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::MANUFACTURER_LABEL,
        get: Some(handlers::get_manufacturer_label),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::DEVICE_LABEL,
        get: Some(handlers::get_device_label),
        set: Some(handlers::set_device_label),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::FACTORY_DEFAULTS,
        get: Some(handlers::get_factory_defaults),
        set: Some(handlers::set_factory_defaults),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::LANGUAGE_CAPABILITIES,
        get: Some(handlers::get_language_capabilities),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::LANGUAGE,
        get: Some(handlers::get_language),
        set: Some(handlers::set_language),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::SOFTWARE_VERSION_LABEL,
        get: Some(handlers::get_software_version_label),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: false,
    },
    ParamDef {
        pid: pids::BOOT_SOFTWARE_VERSION_ID,
        get: Some(handlers::get_boot_software_version_id),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::BOOT_SOFTWARE_VERSION_LABEL,
        get: Some(handlers::get_boot_software_version_label),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::DMX_PERSONALITY,
        get: Some(handlers::get_dmx_personality),
        set: Some(handlers::set_dmx_personality),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::DMX_PERSONALITY_DESCRIPTION,
        get: Some(handlers::get_dmx_personality_description),
        set: None,
        get_arg_size: 1,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::DMX_START_ADDRESS,
        get: Some(handlers::get_dmx_start_address),
        set: Some(handlers::set_dmx_start_address),
        get_arg_size: 0,
        included_in_supported_params: false,
    },
    ParamDef {
        pid: pids::DEVICE_HOURS,
        get: Some(handlers::get_device_hours),
        set: Some(handlers::set_device_hours),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::REAL_TIME_CLOCK,
        get: Some(handlers::get_real_time_clock),
        set: None,
        get_arg_size: 0,
        included_in_supported_params: true,
    },
    ParamDef {
        pid: pids::IDENTIFY_DEVICE,
        get: Some(handlers::get_identify_device),
        set: Some(handlers::set_identify_device),
        get_arg_size: 0,
        included_in_supported_params: false,
    },
    ParamDef {
        pid: pids::RESET_DEVICE,
        get: None,
        set: Some(handlers::set_reset_device),
        get_arg_size: 0,
        included_in_supported_params: true,
    },
];

pub fn lookup(pid: u16) -> Option<&'static ParamDef> {
    PARAMETER_TABLE.iter().find(|def| def.pid == pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pid_is_unique() {
        for (index, def) in PARAMETER_TABLE.iter().enumerate() {
            assert!(
                PARAMETER_TABLE[index + 1..].iter().all(|other| other.pid != def.pid),
                "duplicate pid {:#06X}",
                def.pid
            );
        }
    }

    #[test]
    fn lookup_finds_known_pid_and_misses_unknown() {
        assert!(lookup(pids::DEVICE_INFO).is_some());
        assert!(lookup(0xBEEF).is_none());
    }

    #[test]
    fn reset_device_has_no_get_handler() {
        let def = lookup(pids::RESET_DEVICE).unwrap();
        assert!(def.get.is_none());
        assert!(def.set.is_some());
    }
}
