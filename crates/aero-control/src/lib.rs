//! Control primitives shared by every vehicle: the PID regulator, the
//! per-tick input snapshot, and the target-setpoint types.

mod inputs;
mod pid;
mod targets;

pub use inputs::InputSnapshot;
pub use pid::Pid;
pub use targets::{TargetSet, TargetUpdate};
