//! Core building blocks shared by every system.

pub mod math;
