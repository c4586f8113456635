//! Event types and observers used by the engine.
//!
//! Events provide a decoupled way for systems to communicate without tight
//! coupling or direct dependencies.
//!
//! Submodules:
//! - [`mapchange`] – notification that the active map has been replaced
//! - [`statechange`] – state stack transition notifications

pub mod mapchange;
pub mod statechange;
