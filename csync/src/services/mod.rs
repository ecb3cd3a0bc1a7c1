//! Core decision services: identity matching and merge planning.

pub mod matcher;
pub mod merge;

pub use matcher::MatchCandidate;
pub use merge::MergePlan;
