// Vehicle control module
//
// Provides:
// - Wheel actuator / visual node traits and the per-wheel container
// - Input abstraction and keyboard axis emulation
// - Steering-wheel prop smoothing
// - The per-step drive controller
// - A built-in wheel simulation backend

mod controller;
pub mod input;
pub mod sim;
pub mod steering;
pub mod wheel;

pub use controller::{JeepController, VisualRig, WheelCommand};
pub use input::{Axis, InputSource, Key, VirtualAxis};
pub use sim::SimWheel;
pub use wheel::{Pose, TransformNode, VisualNode, WheelActuator, WheelPosition, Wheels};
