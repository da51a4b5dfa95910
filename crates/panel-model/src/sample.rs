//! Sample size newtype.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Number of joint draws to produce. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SampleSize(NonZeroUsize);

impl SampleSize {
    /// Create a sample size, rejecting zero.
    pub fn new(n: usize) -> Result<Self, LinkError> {
        NonZeroUsize::new(n)
            .map(Self)
            .ok_or_else(|| LinkError::invalid_sample_size(n))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SampleSize> for usize {
    fn from(value: SampleSize) -> Self {
        value.get()
    }
}

impl TryFrom<usize> for SampleSize {
    type Error = LinkError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for SampleSize {
    type Error = LinkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map_err(|_| LinkError::invalid_sample_size(value))
            .and_then(Self::new)
    }
}

/// Accepts integral-valued floats such as `10.0`.
impl TryFrom<f64> for SampleSize {
    type Error = LinkError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value >= usize::MAX as f64
        {
            return Err(LinkError::invalid_sample_size(value));
        }
        Self::new(value as usize)
    }
}

impl FromStr for SampleSize {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::try_from(n);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::try_from(v),
            Err(_) => Err(LinkError::invalid_sample_size(trimmed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_negative_and_nan() {
        assert!(matches!(
            SampleSize::new(0),
            Err(LinkError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            SampleSize::try_from(-5_i64),
            Err(LinkError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            SampleSize::try_from(f64::NAN),
            Err(LinkError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            SampleSize::try_from(f64::INFINITY),
            Err(LinkError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            SampleSize::try_from(2.5),
            Err(LinkError::InvalidSampleSize { .. })
        ));
    }

    #[test]
    fn rejects_float_beyond_usize() {
        // usize::MAX rounds up to a power of two as f64, which does not fit.
        assert!(matches!(
            SampleSize::try_from(usize::MAX as f64),
            Err(LinkError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            SampleSize::try_from(1e300),
            Err(LinkError::InvalidSampleSize { .. })
        ));
    }

    #[test]
    fn accepts_integral_float() {
        let n = SampleSize::try_from(10.0).expect("integral float");
        assert_eq!(n.get(), 10);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("25".parse::<SampleSize>().map(SampleSize::get), Ok(25));
        assert_eq!("25.0".parse::<SampleSize>().map(SampleSize::get), Ok(25));
        assert!("abc".parse::<SampleSize>().is_err());
        assert!("-1".parse::<SampleSize>().is_err());
        assert!("NaN".parse::<SampleSize>().is_err());
    }

    #[test]
    fn serde_rejects_zero() {
        let ok: SampleSize = serde_json::from_str("7").expect("deserialize");
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<SampleSize>("0").is_err());
    }
}
