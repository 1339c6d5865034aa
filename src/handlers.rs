//! Per-pid GET/SET handlers (C4). Each function is grounded one-to-one on a handler
//! body from the reference responder's parameter table; signatures match
//! [crate::parameter_table::GetHandler]/[crate::parameter_table::SetHandler] so the
//! table can hold them as plain function pointers.

use crate::consts::{PERSONALITY_DESCRIPTION_MAX_LENGTH, RDM_DEVICE_INFO_SIZE};
use crate::parameter_table::{HandlerContext, SetOutcome, PARAMETER_TABLE};
use crate::rdm_types::{DeviceInfo, DmxStartAddress};
use crate::types::{DataPack, NackReason};

fn data_pack_from(bytes: &[u8]) -> Result<DataPack, NackReason> {
    DataPack::from_slice(bytes).map_err(|_| NackReason::FormatError)
}

pub fn get_supported_parameters(_ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    let mut response = DataPack::new();

    for def in PARAMETER_TABLE.iter().filter(|def| def.included_in_supported_params) {
        response.extend_from_slice(&def.pid.to_be_bytes()).map_err(|_| NackReason::FormatError)?;
    }

    Ok(response)
}

pub fn get_device_info(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    let device = &ctx.device;

    let info = DeviceInfo {
        device_model_id: device.device_model_id(),
        product_category: device.product_category(),
        software_version_id: device.software_version_id(),
        dmx_footprint: device.current_footprint(),
        current_personality: device.current_personality(),
        personality_count: device.personality_count(),
        dmx_start_address: DmxStartAddress::try_from(device.dmx_start_address())
            .map_err(|_| NackReason::HardwareFault)?,
        sub_device_count: 0,
        sensor_count: 0,
    };

    let serialized = info.serialize();
    debug_assert_eq!(serialized.len(), RDM_DEVICE_INFO_SIZE);
    Ok(serialized)
}

pub fn get_device_model_description(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(ctx.hardware.board_model().as_bytes())
}

pub fn get_manufacturer_label(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(ctx.device.manufacturer_label().as_bytes())
}

pub fn get_device_label(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(ctx.device.label().as_bytes())
}

pub fn set_device_label(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    let label = match core::str::from_utf8(param_data) {
        Ok(label) => label,
        Err(_) => return SetOutcome::Nack(NackReason::FormatError),
    };

    match ctx.device.set_label(label) {
        Ok(()) => {
            ctx.persistence.on_label_changed(label);
            SetOutcome::Ack(DataPack::new())
        },
        Err(_) => SetOutcome::Nack(NackReason::FormatError),
    }
}

pub fn get_factory_defaults(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&[ctx.device.factory_defaults() as u8])
}

pub fn set_factory_defaults(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    if !param_data.is_empty() {
        return SetOutcome::Nack(NackReason::FormatError);
    }

    ctx.device.init();
    SetOutcome::Ack(DataPack::new())
}

pub fn get_language_capabilities(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&ctx.device.supported_language())
}

pub fn get_language(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&ctx.device.supported_language())
}

pub fn set_language(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    let language: [u8; 2] = match param_data.try_into() {
        Ok(language) => language,
        Err(_) => return SetOutcome::Nack(NackReason::FormatError),
    };

    match ctx.device.set_supported_language(language) {
        Ok(()) => SetOutcome::Ack(DataPack::new()),
        Err(_) => SetOutcome::Nack(NackReason::DataOutOfRange),
    }
}

pub fn get_software_version_label(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(ctx.device.software_version_label().as_bytes())
}

pub fn get_boot_software_version_id(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&ctx.hardware.firmware_revision().to_be_bytes())
}

pub fn get_boot_software_version_label(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(ctx.hardware.firmware_copyright().as_bytes())
}

pub fn get_dmx_personality(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&[ctx.device.current_personality(), ctx.device.personality_count()])
}

pub fn set_dmx_personality(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    let &[personality] = param_data else {
        return SetOutcome::Nack(NackReason::FormatError);
    };

    match ctx.device.set_current_personality(personality) {
        Ok(()) => {
            ctx.persistence.on_personality_changed(personality);
            SetOutcome::Ack(DataPack::new())
        },
        Err(_) => SetOutcome::Nack(NackReason::DataOutOfRange),
    }
}

pub fn get_dmx_personality_description(ctx: &HandlerContext, param_data: &[u8]) -> Result<DataPack, NackReason> {
    let &[index] = param_data else {
        return Err(NackReason::FormatError);
    };

    let personality = ctx.device.personality(index).ok_or(NackReason::DataOutOfRange)?;

    let description = personality.description.as_bytes();
    let truncated = &description[..description.len().min(PERSONALITY_DESCRIPTION_MAX_LENGTH)];

    let mut response = DataPack::new();
    response.push(index).map_err(|_| NackReason::FormatError)?;
    response.extend_from_slice(&personality.slot_count.to_be_bytes()).map_err(|_| NackReason::FormatError)?;
    response.extend_from_slice(truncated).map_err(|_| NackReason::FormatError)?;

    Ok(response)
}

pub fn get_dmx_start_address(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&ctx.device.dmx_start_address().to_be_bytes())
}

pub fn set_dmx_start_address(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    let address = match param_data.try_into().map(u16::from_be_bytes) {
        Ok(address) => address,
        Err(_) => return SetOutcome::Nack(NackReason::FormatError),
    };

    match ctx.device.set_dmx_start_address(address) {
        Ok(()) => {
            ctx.persistence.on_start_address_changed(address);
            SetOutcome::Ack(DataPack::new())
        },
        Err(_) => SetOutcome::Nack(NackReason::DataOutOfRange),
    }
}

/// Device uptime is reported in whole hours; there's no writable backing store for it.
pub fn get_device_hours(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    let hours = (ctx.clock.uptime_seconds() / 3600) as u32;
    data_pack_from(&hours.to_be_bytes())
}

pub fn set_device_hours(_ctx: &mut HandlerContext, _param_data: &[u8]) -> SetOutcome {
    SetOutcome::Nack(NackReason::WriteProtect)
}

/// The calendar year in this wire format is `tm_year_since_1900 + 2000`, not the usual
/// `+ 1900` - matching the convention the reference firmware's RTC driver uses.
pub fn get_real_time_clock(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    let wallclock = ctx.clock.wallclock();
    let year = wallclock.year_since_1900 as u16 + 2000;

    let mut response = DataPack::new();
    response.extend_from_slice(&year.to_be_bytes()).map_err(|_| NackReason::FormatError)?;
    response
        .extend_from_slice(&[
            wallclock.month,
            wallclock.day,
            wallclock.hour,
            wallclock.minute,
            wallclock.second,
        ])
        .map_err(|_| NackReason::FormatError)?;

    Ok(response)
}

pub fn get_identify_device(ctx: &HandlerContext, _param_data: &[u8]) -> Result<DataPack, NackReason> {
    data_pack_from(&[*ctx.identify as u8])
}

pub fn set_identify_device(ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    let &[value] = param_data else {
        return SetOutcome::Nack(NackReason::FormatError);
    };

    match value {
        0 => {
            *ctx.identify = false;
            SetOutcome::Ack(DataPack::new())
        },
        1 => {
            *ctx.identify = true;
            SetOutcome::Ack(DataPack::new())
        },
        _ => SetOutcome::Nack(NackReason::DataOutOfRange),
    }
}

pub fn set_reset_device(_ctx: &mut HandlerContext, param_data: &[u8]) -> SetOutcome {
    if !param_data.is_empty() {
        return SetOutcome::Nack(NackReason::FormatError);
    }

    SetOutcome::Reboot(DataPack::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_info::{DeviceInfoConfig, DeviceInfoStore, Personality};
    use crate::external::{Clock, HardwareControl, NoopPersistence, WallClock};
    use crate::unique_identifier::UniqueIdentifier;

    struct FixedClock;

    impl Clock for FixedClock {
        fn uptime_seconds(&self) -> u64 {
            7_200
        }

        fn wallclock(&self) -> WallClock {
            WallClock {
                year_since_1900: 126,
                month: 7,
                day: 28,
                hour: 10,
                minute: 0,
                second: 0,
            }
        }
    }

    struct FixedHardware;

    impl HardwareControl for FixedHardware {
        fn reboot(&self) -> ! {
            unreachable!("tests never trigger a reboot")
        }

        fn firmware_revision(&self) -> u32 {
            0x0001_0002
        }

        fn board_model(&self) -> &str {
            "Test Fixture"
        }

        fn firmware_copyright(&self) -> &str {
            "(c) test"
        }
    }

    static PERSONALITIES: &[Personality] = &[
        Personality { slot_count: 4, description: "4 channel" },
        Personality { slot_count: 8, description: "8 channel" },
    ];

    fn device() -> DeviceInfoStore {
        DeviceInfoStore::new(DeviceInfoConfig {
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
        })
    }

    fn context<'a>(
        device: &'a mut DeviceInfoStore,
        identify: &'a mut bool,
        clock: &'a FixedClock,
        hardware: &'a FixedHardware,
        persistence: &'a mut NoopPersistence,
    ) -> HandlerContext<'a> {
        HandlerContext { device, identify, clock, hardware, persistence }
    }

    #[test]
    fn device_hours_floors_to_whole_hours() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        let response = get_device_hours(&ctx, &[]).unwrap();
        assert_eq!(response.as_slice(), &2u32.to_be_bytes());
    }

    #[test]
    fn real_time_clock_year_adds_2000() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        let response = get_real_time_clock(&ctx, &[]).unwrap();
        let year = u16::from_be_bytes([response[0], response[1]]);
        assert_eq!(year, 2126);
        assert_eq!(&response[2..], &[7, 28, 10, 0, 0]);
    }

    #[test]
    fn set_dmx_personality_rejects_out_of_range() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let mut ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        match set_dmx_personality(&mut ctx, &[3]) {
            SetOutcome::Nack(NackReason::DataOutOfRange) => {},
            _ => panic!("expected DataOutOfRange"),
        }

        match set_dmx_personality(&mut ctx, &[2]) {
            SetOutcome::Ack(_) => {},
            _ => panic!("expected Ack"),
        }
        assert_eq!(ctx.device.current_personality(), 2);
    }

    #[test]
    fn set_device_hours_is_always_write_protected() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let mut ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        match set_device_hours(&mut ctx, &[]) {
            SetOutcome::Nack(NackReason::WriteProtect) => {},
            _ => panic!("expected WriteProtect"),
        }
    }

    #[test]
    fn set_identify_device_validates_value() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let mut ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        match set_identify_device(&mut ctx, &[2]) {
            SetOutcome::Nack(NackReason::DataOutOfRange) => {},
            _ => panic!("expected DataOutOfRange"),
        }

        match set_identify_device(&mut ctx, &[1]) {
            SetOutcome::Ack(_) => {},
            _ => panic!("expected Ack"),
        }
        assert!(*ctx.identify);
    }

    #[test]
    fn set_reset_device_requests_reboot() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let mut ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        match set_reset_device(&mut ctx, &[]) {
            SetOutcome::Reboot(_) => {},
            _ => panic!("expected Reboot"),
        }
    }

    #[test]
    fn dmx_personality_description_reports_requested_index() {
        let mut device = device();
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        let response = get_dmx_personality_description(&ctx, &[2]).unwrap();
        assert_eq!(response[0], 2);
        assert_eq!(u16::from_be_bytes([response[1], response[2]]), 8);
        assert_eq!(&response[3..], b"8 channel");

        get_dmx_personality_description(&ctx, &[3]).unwrap_err();
    }

    #[test]
    fn dmx_personality_description_truncates_to_32_bytes() {
        static LONG_PERSONALITIES: &[Personality] = &[Personality {
            slot_count: 4,
            description: "this description is deliberately longer than thirty two bytes",
        }];

        let mut device = DeviceInfoStore::new(DeviceInfoConfig {
            uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
            device_model_id: 1,
            product_category: 0x0100,
            software_version_id: 0x0001_0000,
            software_version_label: "1.0.0",
            manufacturer_label: "Acme",
            supported_language: *b"en",
            personalities: LONG_PERSONALITIES,
            default_personality: 1,
            default_dmx_start_address: 1,
            default_label: "Lamp",
        });
        let mut identify = false;
        let clock = FixedClock;
        let hardware = FixedHardware;
        let mut persistence = NoopPersistence;
        let ctx = context(&mut device, &mut identify, &clock, &hardware, &mut persistence);

        let response = get_dmx_personality_description(&ctx, &[1]).unwrap();
        let description = &response[3..];
        assert_eq!(description.len(), 32);
        assert_eq!(description, &LONG_PERSONALITIES[0].description.as_bytes()[..32]);
    }
}
