//! Core types for the gassim group-diffusion model.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! identifiers shared by every other crate, the [`Fluid`] value type and
//! its [`FluidMixture`] container (including the mixing rule), and the
//! error types raised by fluid and group operations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fluid;
pub mod id;

pub use error::{FluidError, GroupError};
pub use fluid::{Fluid, FluidMixture, MixOutcome};
pub use id::{CellId, CellIndex, GroupId, TickId, UniqueCellId};
