//! pf-core: shared foundation for pipeflow.
//!
//! Contains:
//! - units (uom constructors + conversion to internal US units)
//! - numeric (finiteness and positivity checks)
//! - ids (compact handles for nodes and links)
//! - arena (append-only typed pool for network elements)
//! - error (shared error types)

pub mod arena;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use arena::Arena;
pub use error::{PfError, PfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
