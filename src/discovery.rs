//! Binary-search discovery state machine (C5): the mute flag and the responses to
//! DISC_UNIQUE_BRANCH/DISC_MUTE/DISC_UN_MUTE.

use crate::command_class::ResponseCommandClass;
use crate::consts::{PREAMBLE_BYTE, SEPARATOR_BYTE};
use crate::rdm_data::{RdmRequestData, RdmResponseData};
use crate::types::{DataPack, ResponseType};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

/// Raw bytes of a discovery response: 7 preamble bytes, 1 separator, 12 masked UID
/// bytes, 4 checksum bytes. Carries no start code, unlike a standard RDM frame.
pub type DiscoveryResponseBytes = [u8; 24];

#[derive(Debug, Default)]
pub struct DiscoveryState {
    muted: bool,
}

/// What the dispatcher should do after handing a discovery-class frame to this module.
pub enum DiscoveryOutcome {
    /// Nothing observable happens on the bus.
    Silent,
    /// Send a discovery response built from [build_discovery_response].
    SendDiscoveryResponse(DiscoveryResponseBytes),
    /// Send a normal ACK reply (DISC_MUTE/DISC_UN_MUTE).
    SendAck(RdmResponseData),
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Handles DISC_UNIQUE_BRANCH. `param_data` must be exactly the 12-byte
    /// `low`/`high` UID range; malformed frames are silently dropped per spec -
    /// discovery-class errors are never NACKed.
    pub fn handle_disc_unique_branch(&self, uid: UniqueIdentifier, param_data: &[u8]) -> DiscoveryOutcome {
        if self.muted {
            return DiscoveryOutcome::Silent;
        }

        let Ok(range) = <&[u8; 12]>::try_from(param_data) else {
            return DiscoveryOutcome::Silent;
        };

        let low = u64::from_be_bytes([0, 0, range[0], range[1], range[2], range[3], range[4], range[5]]);
        let high = u64::from_be_bytes([0, 0, range[6], range[7], range[8], range[9], range[10], range[11]]);
        let my_uid: u64 = uid.into();

        if !(low..=high).contains(&my_uid) {
            return DiscoveryOutcome::Silent;
        }

        DiscoveryOutcome::SendDiscoveryResponse(build_discovery_response(uid))
    }

    /// Handles DISC_MUTE/DISC_UN_MUTE. `muted_after` is the state to transition to.
    /// param_data must be empty; any other length is silently dropped.
    ///
    /// Unlike GET/SET, a mute/un-mute request is answered even when it was sent as a
    /// broadcast - controllers routinely broadcast DISC_UN_MUTE to wake every
    /// responder at the start of a discovery pass and rely on replies colliding
    /// harmlessly, since they're about to binary-search the bus anyway.
    pub fn handle_mute(&mut self, request: &RdmRequestData, my_uid: UniqueIdentifier, muted_after: bool) -> DiscoveryOutcome {
        if !request.parameter_data.is_empty() {
            return DiscoveryOutcome::Silent;
        }

        self.muted = muted_after;

        // The reference firmware answers mute/un-mute through the same ack path it uses
        // for SET commands rather than a discovery-command-response; kept for wire
        // compatibility with controllers that were validated against it.
        DiscoveryOutcome::SendAck(RdmResponseData {
            destination_uid: PackageAddress::Device(request.source_uid),
            source_uid: my_uid,
            transaction_number: request.transaction_number,
            response_type: ResponseType::ResponseTypeAck,
            message_count: 0,
            sub_device: request.sub_device,
            command_class: ResponseCommandClass::SetCommandResponse,
            parameter_id: request.parameter_id,
            parameter_data: DataPack::from_slice(&[0x00, 0x00]).unwrap(),
        })
    }
}

/// Builds the 24-byte discovery response for `uid`: 7×`0xFE` + `0xAA` preamble, each
/// UID byte emitted twice (OR-masked with `0xAA` then `0x55`), then the 4-byte checksum
/// split the same way. The checksum is the plain sum of the raw UID bytes plus
/// `6 * 0xFF`, computed over the *unmasked* bytes - not the masked ones.
pub fn build_discovery_response(uid: UniqueIdentifier) -> DiscoveryResponseBytes {
    let uid_bytes = uid.to_bytes();
    let mut response = [0u8; 24];

    for byte in response.iter_mut().take(7) {
        *byte = PREAMBLE_BYTE;
    }
    response[7] = SEPARATOR_BYTE;

    let mut checksum: u16 = 6 * 0xFF;
    for (index, byte) in uid_bytes.iter().enumerate() {
        response[8 + 2 * index] = byte | 0xAA;
        response[8 + 2 * index + 1] = byte | 0x55;
        checksum = checksum.wrapping_add(*byte as u16);
    }

    let checksum_bytes = checksum.to_be_bytes();
    response[20] = checksum_bytes[0] | 0xAA;
    response[21] = checksum_bytes[0] | 0x55;
    response[22] = checksum_bytes[1] | 0xAA;
    response[23] = checksum_bytes[1] | 0x55;

    response
}
