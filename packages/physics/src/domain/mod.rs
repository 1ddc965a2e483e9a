//! Domain types exchanged with the surrounding scene.

pub mod events;
pub mod handle;
pub mod object;
pub mod settings;
