//! Rust library implementing an RDM (ANSI E1.20) responder core that shares an RS-485
//! bus with DMX512-A lighting traffic, driver-agnostic over interchangeable bus,
//! clock, and hardware-control implementations. This library features no-std as well
//! as no-alloc support (no heap allocation) to target embedded as well as os platforms.
//!
//! Please refer to the [official specifications](https://tsp.esta.org/) published by the ESTA.
//!
//! <div class="warning">This library is wip, it has not yet received extensive testing and the api
//! might not be final.</div>
//!
//! # Usage
//!
//! ```rust
//! use rdm_responder::device_info::{DeviceInfoConfig, Personality};
//! use rdm_responder::external::{BusDriver, Clock, HardwareControl, WallClock};
//! use rdm_responder::responder::RdmResponderCore;
//! use rdm_responder::unique_identifier::UniqueIdentifier;
//!
//! struct SystemClock;
//!
//! impl Clock for SystemClock {
//!     fn uptime_seconds(&self) -> u64 {
//!         0
//!     }
//!
//!     fn wallclock(&self) -> WallClock {
//!         WallClock { year_since_1900: 126, month: 1, day: 1, hour: 0, minute: 0, second: 0 }
//!     }
//! }
//!
//! struct Board;
//!
//! impl HardwareControl for Board {
//!     fn reboot(&self) -> ! {
//!         loop {}
//!     }
//!
//!     fn firmware_revision(&self) -> u32 {
//!         0x0001_0000
//!     }
//!
//!     fn board_model(&self) -> &str {
//!         "Example Fixture"
//!     }
//!
//!     fn firmware_copyright(&self) -> &str {
//!         "(c) Example"
//!     }
//! }
//!
//! static PERSONALITIES: &[Personality] =
//!     &[Personality { slot_count: 4, description: "4 channel" }];
//!
//! let mut responder = RdmResponderCore::new(
//!     DeviceInfoConfig {
//!         uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
//!         device_model_id: 1,
//!         product_category: 0x0100,
//!         software_version_id: 0x0001_0000,
//!         software_version_label: "1.0.0",
//!         manufacturer_label: "Acme",
//!         supported_language: *b"en",
//!         personalities: PERSONALITIES,
//!         default_personality: 1,
//!         default_dmx_start_address: 1,
//!         default_label: "Fixture",
//!     },
//!     SystemClock,
//!     Board,
//! );
//!
//! // On each poll tick, feed a frame in through whatever drives your bus:
//! // responder.poll(&mut driver).unwrap();
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod command_class;
pub mod consts;
pub mod device_info;
pub mod discovery;
/// External collaborator contracts: the bus, clock, hardware, and persistence seams a
/// concrete responder plugs into the core through.
pub mod external;
pub mod handlers;
mod layouts;
pub mod parameter_table;
mod pids;
pub mod rdm_data;
pub mod rdm_types;
/// Dispatcher and reply emitter tying the device state, discovery state machine, and
/// parameter table together into a single pollable responder.
pub mod responder;
pub mod types;
pub mod unique_identifier;
pub mod utils;
