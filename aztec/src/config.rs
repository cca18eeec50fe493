//! Configuration of the trusted setup range.

use serde::{Deserialize, Serialize};

use crate::constants::{K_MAX, K_MIN};
use crate::errors::AztecError;

/// Value range the trusted setup can resolve.
///
/// Deserializes from any serde format; missing fields fall back to the
/// ceremony range `[K_MIN, K_MAX]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub k_min: u64,
    pub k_max: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            k_min: K_MIN,
            k_max: K_MAX,
        }
    }
}

impl SetupConfig {
    pub fn validate(&self) -> Result<(), AztecError> {
        if self.k_min > self.k_max {
            return Err(AztecError::malformed(format!(
                "setup range is empty: k_min {} > k_max {}",
                self.k_min, self.k_max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        (self.k_min..=self.k_max).contains(&value)
    }

    /// Number of values in the range.
    pub fn value_count(&self) -> u64 {
        self.k_max.saturating_sub(self.k_min).saturating_add(1)
    }

    /// Error for a value the setup cannot resolve.
    pub(crate) fn lookup_failure(&self, value: u64) -> AztecError {
        AztecError::SetupLookupFailure {
            value,
            k_min: self.k_min,
            k_max: self.k_max,
        }
    }
}
