//! Application-level configuration.
//!
//! - [`SupplyParams`]: cache bounds and the remote retry policy
//! - [`SessionParams`]: pacing, scoring and batch sizes of a session

pub mod session_params;
pub mod supply_params;

pub use session_params::SessionParams;
pub use supply_params::SupplyParams;
