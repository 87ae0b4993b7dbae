//! Error type shared by the generators, the BSP builder and the renderer.

use thiserror::Error;

/// Errors returned by tsmi-rl operations.
///
/// Argument errors report programmer mistakes (a ratio that is not a
/// percentage, a render time outside `[0, 1]`). The budget and limit errors
/// are safety valves against malformed geometry; they are logged at `error`
/// level before being returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("ratio {0} is not a percentage (expected 0..=100)")]
    InvalidPercentage(i32),

    #[error("automata threshold {0} is outside 0..=9")]
    InvalidThreshold(i32),

    #[error("invalid blend range [{min}, {max}] (expected 0 <= min <= max <= 1)")]
    InvalidBlendRange { min: f32, max: f32 },

    #[error("render time {0} is outside [0, 1]")]
    InvalidTime(f32),

    #[error("invalid screen size {width}x{height}")]
    InvalidScreenSize { width: i32, height: i32 },

    #[error("room margin {min}..={max} is empty")]
    InvalidMargin { min: i32, max: i32 },

    #[error("tile set is full ({max} templates)")]
    TooManyTemplates { max: usize },

    #[error("BSP split budget of {budget} exhausted")]
    BspBudgetExhausted { budget: usize },

    #[error("carving leaf {leaf} touched more than {limit} cells")]
    CarveLimitExceeded { limit: usize, leaf: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn check_percentage(ratio: i32) -> Result<()> {
    if (0..=100).contains(&ratio) {
        Ok(())
    } else {
        Err(Error::InvalidPercentage(ratio))
    }
}

pub(crate) fn check_threshold(threshold: i32) -> Result<()> {
    if (0..=9).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds() {
        assert!(check_percentage(0).is_ok());
        assert!(check_percentage(100).is_ok());
        assert_eq!(check_percentage(101), Err(Error::InvalidPercentage(101)));
        assert_eq!(check_percentage(-1), Err(Error::InvalidPercentage(-1)));
    }

    #[test]
    fn threshold_bounds() {
        assert!(check_threshold(9).is_ok());
        assert_eq!(check_threshold(10), Err(Error::InvalidThreshold(10)));
    }

    #[test]
    fn messages_mention_values() {
        let e = Error::BspBudgetExhausted { budget: 50 };
        assert_eq!(e.to_string(), "BSP split budget of 50 exhausted");
        let e = Error::InvalidTime(1.5);
        assert!(e.to_string().contains("1.5"));
        let e = Error::InvalidMargin { min: 3, max: 1 };
        assert_eq!(e.to_string(), "room margin 3..=1 is empty");
    }
}
