//! Top-level responder (C6 dispatcher + C7 reply emitter): routes an inbound frame to
//! the discovery state machine or the parameter table, and turns the outcome into
//! bytes the bus driver can send.

use crate::command_class::RequestCommandClass;
use crate::device_info::{DeviceInfoConfig, DeviceInfoStore};
use crate::discovery::{DiscoveryOutcome, DiscoveryResponseBytes, DiscoveryState};
use crate::external::{BusDriver, Clock, HardwareControl, NoopPersistence, PersistenceHandler};
use crate::parameter_table::{lookup, HandlerContext, SetOutcome};
use crate::rdm_data::{RdmData, RdmRequestData};
use crate::types::{DataPack, NackReason, ResponseType};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

/// What happened while dispatching one frame. Exposed mainly for tests and logging;
/// [RdmResponderCore::poll] already drives the bus driver off of it.
pub enum DispatchOutcome {
    /// Nothing is sent: the frame wasn't addressed to us, or it was a broadcast/
    /// vendorcast GET, or a discovery branch outside our range.
    Silent,
    /// Send a standard RDM reply.
    Reply(RdmData),
    /// Send a discovery response (non-standard framing, no start code).
    DiscoveryReply(DiscoveryResponseBytes),
    /// Send `reply` (if `Some`), then call [HardwareControl::reboot].
    Reboot(Option<RdmData>),
}

/// The RDM responder core: device state, discovery state machine, and the
/// collaborators (clock/hardware/persistence) parameter handlers need.
pub struct RdmResponderCore<C: Clock, H: HardwareControl, P: PersistenceHandler = NoopPersistence> {
    device: DeviceInfoStore,
    identify: bool,
    discovery: DiscoveryState,
    clock: C,
    hardware: H,
    persistence: P,
}

impl<C: Clock, H: HardwareControl> RdmResponderCore<C, H, NoopPersistence> {
    pub fn new(config: DeviceInfoConfig, clock: C, hardware: H) -> Self {
        Self::with_persistence(config, clock, hardware, NoopPersistence)
    }
}

impl<C: Clock, H: HardwareControl, P: PersistenceHandler> RdmResponderCore<C, H, P> {
    pub fn with_persistence(config: DeviceInfoConfig, clock: C, hardware: H, persistence: P) -> Self {
        Self {
            device: DeviceInfoStore::new(config),
            identify: false,
            discovery: DiscoveryState::new(),
            clock,
            hardware,
            persistence,
        }
    }

    pub fn device(&self) -> &DeviceInfoStore {
        &self.device
    }

    pub fn is_identifying(&self) -> bool {
        self.identify
    }

    pub fn is_muted(&self) -> bool {
        self.discovery.is_muted()
    }

    /// Dispatches one already-parsed request. Pure and side-effect-free besides the
    /// mutations the matched handler makes, so it's the function under test for
    /// every routing rule; [Self::poll] is a thin wire-level wrapper around it.
    pub fn handle_request(&mut self, request: RdmRequestData) -> DispatchOutcome {
        let my_uid = self.device.uid();
        let is_broadcast = request.destination_uid == PackageAddress::Broadcast;
        let is_vendorcast = matches!(
            request.destination_uid,
            PackageAddress::ManufacturerBroadcast(manufacturer)
                if manufacturer == my_uid.manufacturer_uid()
        );
        let is_for_me = request.destination_uid
            == PackageAddress::Device(my_uid)
            || is_vendorcast;

        if !is_for_me && !is_broadcast {
            return DispatchOutcome::Silent;
        }

        if request.command_class == RequestCommandClass::DiscoveryCommand {
            return self.handle_discovery(request, my_uid);
        }

        self.handle_get_set(request, is_broadcast || is_vendorcast)
    }

    fn handle_discovery(&mut self, request: RdmRequestData, my_uid: UniqueIdentifier) -> DispatchOutcome {
        use crate::pids::{DISC_MUTE, DISC_UNIQUE_BRANCH, DISC_UN_MUTE};

        match request.parameter_id {
            DISC_UNIQUE_BRANCH => {
                match self.discovery.handle_disc_unique_branch(my_uid, &request.parameter_data) {
                    DiscoveryOutcome::SendDiscoveryResponse(bytes) => DispatchOutcome::DiscoveryReply(bytes),
                    _ => DispatchOutcome::Silent,
                }
            },
            DISC_MUTE => match self.discovery.handle_mute(&request, my_uid, true) {
                DiscoveryOutcome::SendAck(response) => DispatchOutcome::Reply(RdmData::Response(response)),
                _ => DispatchOutcome::Silent,
            },
            DISC_UN_MUTE => match self.discovery.handle_mute(&request, my_uid, false) {
                DiscoveryOutcome::SendAck(response) => DispatchOutcome::Reply(RdmData::Response(response)),
                _ => DispatchOutcome::Silent,
            },
            _ => DispatchOutcome::Silent,
        }
    }

    fn handle_get_set(&mut self, request: RdmRequestData, was_broadcast: bool) -> DispatchOutcome {
        let is_get = match request.command_class {
            RequestCommandClass::GetCommand => true,
            RequestCommandClass::SetCommand => false,
            _ => return self.nack(&request, NackReason::UnsupportedCommandClass),
        };

        if request.sub_device != 0 && request.sub_device != 0xFFFF {
            return self.nack(&request, NackReason::SubDeviceOutOfRange);
        }

        let Some(def) = lookup(request.parameter_id) else {
            return self.nack(&request, NackReason::UnknownPid);
        };

        if is_get {
            let Some(get) = def.get else {
                return self.nack(&request, NackReason::UnsupportedCommandClass);
            };

            if was_broadcast {
                return DispatchOutcome::Silent;
            }

            if request.sub_device == 0xFFFF {
                return self.nack(&request, NackReason::SubDeviceOutOfRange);
            }

            if request.parameter_data.len() != def.get_arg_size as usize {
                return self.nack(&request, NackReason::FormatError);
            }

            let result = {
                let mut ctx = self.handler_context();
                get(&ctx, &request.parameter_data)
            };

            return match result {
                Ok(data) => self.ack(&request, was_broadcast, data),
                Err(reason) => self.nack(&request, reason),
            };
        }

        let Some(set) = def.set else {
            return self.nack(&request, NackReason::UnsupportedCommandClass);
        };

        let outcome = {
            let mut ctx = self.handler_context();
            set(&mut ctx, &request.parameter_data)
        };

        match outcome {
            SetOutcome::Ack(data) => self.ack(&request, was_broadcast, data),
            SetOutcome::Nack(reason) => {
                if was_broadcast {
                    DispatchOutcome::Silent
                } else {
                    self.nack(&request, reason)
                }
            },
            SetOutcome::Reboot(data) => {
                let reply = if was_broadcast {
                    None
                } else {
                    request
                        .build_response(ResponseType::ResponseTypeAck, data, 0)
                        .ok()
                        .map(RdmData::Response)
                };
                DispatchOutcome::Reboot(reply)
            },
        }
    }

    fn handler_context(&mut self) -> HandlerContext<'_> {
        HandlerContext {
            device: &mut self.device,
            identify: &mut self.identify,
            clock: &self.clock,
            hardware: &self.hardware,
            persistence: &mut self.persistence,
        }
    }

    fn ack(&self, request: &RdmRequestData, was_broadcast: bool, data: DataPack) -> DispatchOutcome {
        if was_broadcast {
            return DispatchOutcome::Silent;
        }

        match request.build_response(ResponseType::ResponseTypeAck, data, 0) {
            Ok(response) => DispatchOutcome::Reply(RdmData::Response(response)),
            Err(_) => DispatchOutcome::Silent,
        }
    }

    fn nack(&self, request: &RdmRequestData, reason: NackReason) -> DispatchOutcome {
        match request.build_response(ResponseType::ResponseTypeNackReason, reason.serialize(), 0) {
            Ok(response) => DispatchOutcome::Reply(RdmData::Response(response)),
            Err(_) => DispatchOutcome::Silent,
        }
    }

    /// Polls `driver` for a ready frame, dispatches it, and writes the serialized
    /// reply back into the driver's own frame buffer before asking it to send.
    /// RESET_DEVICE's reboot only happens after that reply has been handed off.
    pub fn poll<B: BusDriver>(&mut self, driver: &mut B) -> Result<(), B::Error> {
        if !driver.frame_available() {
            return Ok(());
        }

        // `frame_buffer()` is a fixed region sized for the largest possible frame,
        // not the inbound frame itself - the actual frame length has to be read
        // out of `message_length` (offset 2) before slicing, the same way the bus
        // driver's own receiver does it.
        let buffer = driver.frame_buffer();
        let frame_len = match buffer.get(2) {
            Some(&message_length) => message_length as usize + 2,
            None => {
                driver.clear_frame_available();
                return Ok(());
            },
        };

        let request = match buffer.get(..frame_len).map(RdmData::deserialize) {
            Some(Ok(RdmData::Request(request))) => request,
            _ => {
                driver.clear_frame_available();
                return Ok(());
            },
        };
        driver.clear_frame_available();

        match self.handle_request(request) {
            DispatchOutcome::Silent => Ok(()),
            DispatchOutcome::Reply(reply) => {
                let bytes = reply.serialize();
                driver.frame_buffer()[..bytes.len()].copy_from_slice(&bytes);
                driver.send_response(bytes.len())
            },
            DispatchOutcome::DiscoveryReply(bytes) => {
                driver.frame_buffer()[..bytes.len()].copy_from_slice(&bytes);
                driver.send_discovery_response(bytes.len())
            },
            DispatchOutcome::Reboot(reply) => {
                if let Some(reply) = reply {
                    let bytes = reply.serialize();
                    driver.frame_buffer()[..bytes.len()].copy_from_slice(&bytes);
                    driver.send_response(bytes.len())?;
                }

                self.hardware.reboot();
            },
        }
    }
}
