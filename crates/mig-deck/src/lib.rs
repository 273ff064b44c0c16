//! Mutable parameter store and flat input deck serialization for the MUSIC
//! hydrodynamics engine.

/// Fixed section identifiers and the ordered entry container.
pub mod section;
/// The parameter store and its scoped override guard.
pub mod store;
/// Flat keyword deck rendering and parsing.
pub mod writer;

mod defaults;

pub use section::{ParamSection, SectionId};
pub use store::{OverrideSpec, ParamStore, Prior, Scope};
pub use writer::{parse_deck, render_deck, write_deck, END_OF_DATA};
