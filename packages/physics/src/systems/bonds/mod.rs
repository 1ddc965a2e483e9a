//! Bond registry, auto-bond rules and spring forces.

mod auto_bond;
mod bond;
mod forces;

pub use auto_bond::{AutoBondRule, AutoBondRules, AUTO_BOND_REST_LENGTH, AUTO_BOND_STRENGTH};
pub use bond::{Bond, BondRecord, BondRegistry};
pub use forces::{apply_bond_forces, create_auto_bonds, MIN_BOND_SEPARATION};
