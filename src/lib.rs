// Jeep drive runtime
//
// Binds four wheel actuators to visual transform nodes and driver input,
// stepped at a fixed rate and bridged over zenoh.

pub mod config;
pub mod messages;
pub mod runtime;
pub mod vehicle;
