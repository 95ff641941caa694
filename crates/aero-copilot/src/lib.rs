//! Asynchronous link to the copilot command-interpretation service.
//!
//! The simulation loop never blocks on the network: a background task posts
//! the latest flight report on a timer and parks whatever targets come back
//! in a single-slot cell the tick loop drains. See [`CopilotLink`].

pub mod link;
pub mod report;
pub mod response;

pub use link::{CopilotConfig, CopilotError, CopilotLink, request_targets};
pub use report::{ControlRequest, FlightReport, QuatPayload, Vec3Payload};
pub use response::{extract_from_value, extract_targets};
