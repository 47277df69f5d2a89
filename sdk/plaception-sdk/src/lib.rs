pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod state;
pub mod types;
pub mod utils;

pub use crate::basic::session::{Connected, Funded, Ready, Session};
pub use crate::core::connection::{rpc_connection, SolConnection};
pub use crate::error::{DeployHint, PlaceptionError, Result};
pub use crate::state::{Canvas, PixelCommand, WireSchema, CANVAS_SIZE};
pub use crate::types::{PayerInfo, ProgramArtifacts, Provisioning};
pub use crate::utils::{derive_canvas_address, fee_budget, fetch_canvas};
