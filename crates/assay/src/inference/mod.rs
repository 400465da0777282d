//! Column role inference.

mod roles;

pub use roles::{RoleInferencer, RoleMap};
