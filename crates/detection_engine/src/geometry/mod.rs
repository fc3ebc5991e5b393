//! Geometric primitives for sensor bodies
//!
//! Provides the capsule shape the detection sensor anchors its probe rays
//! to, along with its nearest-surface-point query.

pub mod capsule;

// Re-export commonly used types
pub use capsule::{CapsuleAxis, CapsuleShape};
