//! Service layer: the two request flows, independent of HTTP framing.
//!
//! - [`submission`] - public calculator submissions
//! - [`dashboard`] - admin listing and statistics

pub mod dashboard;
pub mod submission;
