//! Data definitions for RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization.

use serde::{Deserialize, Serialize};

use crate::movement::MotionTuning;

/// Schema version this build understands.
pub const MOTION_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Motion (motion.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionFile {
    pub schema_version: u32,
    pub tuning: MotionTuning,
}
