//! Data models for the ClinicalRxQ membership portal.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod dashboard;
mod member;
mod program;
mod resource;

pub use dashboard::*;
pub use member::*;
pub use program::*;
pub use resource::*;
