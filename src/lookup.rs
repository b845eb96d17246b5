//! Autocomplete lookup pipeline
//!
//! - `segment`: splits input into the full phrase and the word being typed
//! - `coordinator`: issues and cancels the lookups for each input
//! - `merge`: extracts, deduplicates and bounds the suggestions

pub mod coordinator;
pub mod merge;
pub mod segment;

pub use coordinator::{LookupCoordinator, LookupOutcome, LookupSettings};
pub use merge::rank_suggestions;
pub use segment::{SegmentedInput, WordBoundaryPattern, segment};
