//! Simulation systems, leaves first.

pub mod rigid_body;
pub mod laws;
pub mod bonds;
pub mod gravity_field;
pub mod collision;
pub mod player;
