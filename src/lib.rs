//! Point Kinetics Reactor Simulator Library
//!
//! This library provides a real-time lumped-parameter reactor simulation:
//! six-group point kinetics coupled to a two-node fuel/coolant thermal
//! model, advanced with fixed sub-stepping so one call per rendering frame
//! stays numerically stable.

pub mod physics;
pub mod reactor;

pub use reactor::{Criticality, ReactorCore, Snapshot};
