//! Sample struct for reconstructed readings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::TARE_FLAG;

/// A fully reconstructed load-cell sample
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Microseconds since the start of the log
    pub time_us: u64,
    /// Raw HX711 value
    pub value: i64,
    /// Flags seen since the previous sample
    pub flags: BTreeSet<String>,
}

impl Sample {
    /// Whether the scale was zeroed at this sample
    #[inline]
    #[must_use]
    pub fn is_tare(&self) -> bool {
        self.flags.contains(TARE_FLAG)
    }
}
