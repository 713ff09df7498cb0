//! pf-elements: network link elements for hydraulic solvers.
//!
//! Provides the per-link state a gradient solver needs:
//! - Status machine (closed, open, active, temporarily closed)
//! - Reynolds-based flow threshold that linearizes head loss near zero flow
//! - Pipe, pump and valve head-loss laws behind the `LinkModel` trait
//! - Arena-backed factory and status-change report lines
//!
//! Links are single-threaded values. A parallel solver must hand each link to
//! exactly one worker per step, e.g. via `Arena::par_iter_mut`.
//!
//! # Example
//!
//! ```
//! use pf_elements::{ElementOptions, Link, LinkArena, LinkStatus};
//!
//! let mut arena = LinkArena::new();
//! let id = Link::factory(0, "P1", &mut arena).unwrap();
//!
//! let link = arena.get_mut(id).unwrap();
//! link.set_section(1.0, 0.0);
//! link.initialize(true);
//! link.set_flow_threshold(ElementOptions::default().viscosity);
//!
//! link.set_status(LinkStatus::Closed);
//! assert_eq!(
//!     link.write_status_change(LinkStatus::Open),
//!     "          Pipe P1 status changed from OPEN to CLOSED"
//! );
//! ```

pub mod common;
pub mod curve;
pub mod error;
pub mod factory;
pub mod link;
pub mod options;
pub mod pipe;
pub mod pump;
pub mod report;
pub mod status;
pub mod threshold;
pub mod traits;
pub mod valve;

// Re-exports
pub use common::{MIN_THRESH, RE_THRESH, ZERO_FLOW};
pub use curve::PumpCurve;
pub use error::{ElementError, ElementResult};
pub use factory::{LinkArena, LinkBuilder, LinkKind};
pub use link::{Link, LinkType};
pub use options::{ElementOptions, HeadLossModel};
pub use pipe::Pipe;
pub use pump::Pump;
pub use status::LinkStatus;
pub use threshold::FlowThreshold;
pub use traits::{HeadLoss, HeadLossInput, LinkModel, Section};
pub use valve::{Valve, ValveType};
