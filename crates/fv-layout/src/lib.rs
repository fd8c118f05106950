//! fv-layout: force-directed layout for flowviz.
//!
//! This crate owns node positions. It provides:
//! - An annealed force simulation with link, charge, centering
//!   and axis forces (Barnes-Hut approximation for large graphs)
//! - Frame scheduling with cancelable subscriptions
//! - A drag controller that pins nodes while the user moves them

pub mod config;
pub mod error;
pub mod force;
pub mod interaction;
pub mod quadtree;
pub mod schedule;
pub mod simulation;

pub use config::SimConfig;
pub use error::{InteractionError, SimError, SimResult};
pub use force::{Axis, AxisForce, CenterForce, ChargeForce, Force, ForceBuffer, LinkForce};
pub use interaction::{DragController, DragState};
pub use schedule::{Frame, FrameClock, Subscription};
pub use simulation::Simulation;
