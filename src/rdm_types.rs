use crate::consts::RDM_DEVICE_INFO_SIZE;
use crate::layouts::rdm_device_info_layout;
use crate::types::DataPack;

#[derive(Debug)]
pub struct DeserializationError;

impl core::fmt::Display for DeserializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "There was a deserialization error.")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeserializationError {}

/// The first slot in the DMX universe consumed by this device. Always in `1..=512` -
/// there is no zero-footprint sentinel since every responder built on this core drives
/// at least one DMX slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DmxStartAddress(u16);

impl DmxStartAddress {
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializationError> {
        let start_address = u16::from_be_bytes(data.try_into().map_err(|_| DeserializationError)?);

        start_address.try_into().map_err(|_| DeserializationError)
    }

    pub fn serialize(&self) -> DataPack {
        DataPack::from_slice(&self.0.to_be_bytes()).unwrap()
    }
}

impl TryFrom<u16> for DmxStartAddress {
    type Error = DeserializationError;

    fn try_from(start_address: u16) -> Result<Self, Self::Error> {
        if !(1..=512).contains(&start_address) {
            return Err(DeserializationError);
        }

        Ok(Self(start_address))
    }
}

/// Wire representation of the fixed 19-byte DEVICE_INFO parameter.
pub struct DeviceInfo {
    pub device_model_id: u16,
    pub product_category: u16,
    pub software_version_id: u32,
    pub dmx_footprint: u16,
    pub current_personality: u8,
    pub personality_count: u8,
    pub dmx_start_address: DmxStartAddress,
    pub sub_device_count: u16,
    pub sensor_count: u8,
}

impl DeviceInfo {
    pub fn deserialize(buffer: &[u8]) -> Result<Self, DeserializationError> {
        if buffer.len() != rdm_device_info_layout::SIZE.unwrap() {
            return Err(DeserializationError);
        }

        let device_info_view = rdm_device_info_layout::View::new(buffer);
        Ok(DeviceInfo {
            device_model_id: device_info_view.device_model_id().read(),
            product_category: device_info_view.product_category().read(),
            software_version_id: device_info_view.software_version_id().read(),
            dmx_footprint: device_info_view.dmx_footprint().read(),
            current_personality: device_info_view.current_personality().read(),
            personality_count: device_info_view.personality_count().read(),
            dmx_start_address: device_info_view.dmx_start_address().read().try_into()?,
            sub_device_count: device_info_view.sub_device_count().read(),
            sensor_count: device_info_view.sensor_count().read(),
        })
    }

    pub fn serialize(&self) -> DataPack {
        let mut resp_buffer = [0u8; RDM_DEVICE_INFO_SIZE];
        let mut device_info_view = rdm_device_info_layout::View::new(&mut resp_buffer);

        device_info_view.protocol_version_mut().write(0x01_00);
        device_info_view
            .device_model_id_mut()
            .write(self.device_model_id);
        device_info_view
            .product_category_mut()
            .write(self.product_category);
        device_info_view
            .software_version_id_mut()
            .write(self.software_version_id);
        device_info_view
            .dmx_footprint_mut()
            .write(self.dmx_footprint);
        device_info_view
            .current_personality_mut()
            .write(self.current_personality);
        device_info_view
            .personality_count_mut()
            .write(self.personality_count);
        device_info_view
            .dmx_start_address_mut()
            .write(self.dmx_start_address.as_u16());
        device_info_view
            .sub_device_count_mut()
            .write(self.sub_device_count);
        device_info_view.sensor_count_mut().write(self.sensor_count);

        DataPack::from_slice(&resp_buffer).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dmx_start_address_rejects_out_of_range() {
        DmxStartAddress::try_from(0u16).unwrap_err();
        DmxStartAddress::try_from(513u16).unwrap_err();
        assert_eq!(DmxStartAddress::try_from(1u16).unwrap().as_u16(), 1);
        assert_eq!(DmxStartAddress::try_from(512u16).unwrap().as_u16(), 512);
    }

    #[test]
    fn device_info_round_trips() {
        let info = DeviceInfo {
            device_model_id: 1,
            product_category: 0x0100,
            software_version_id: 0x0001_0000,
            dmx_footprint: 4,
            current_personality: 1,
            personality_count: 2,
            dmx_start_address: DmxStartAddress::try_from(1u16).unwrap(),
            sub_device_count: 0,
            sensor_count: 0,
        };

        let bytes = info.serialize();
        assert_eq!(bytes.len(), RDM_DEVICE_INFO_SIZE);

        let parsed = DeviceInfo::deserialize(&bytes).unwrap();
        assert_eq!(parsed.current_personality, 1);
        assert_eq!(parsed.personality_count, 2);
        assert_eq!(parsed.dmx_footprint, 4);
    }
}
