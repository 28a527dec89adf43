//! Duration parsing and timestamp formatting.
//!
//! The annotation service reports offsets as protobuf JSON durations
//! (`"12.345s"`); responses carry them as `"12.345sec"`. Elapsed phase times
//! are reported with two decimals of seconds.

use std::time::Duration;

use thiserror::Error;

/// Errors from duration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Duration is missing the 's' suffix: {0}")]
    MissingSuffix(String),

    #[error("Invalid {0} in duration: {1}")]
    InvalidValue(&'static str, String),

    #[error("Negative duration: {0}")]
    Negative(String),
}

/// Parse a protobuf JSON duration such as `"3s"`, `"1.5s"` or `"12.000345s"`.
///
/// # Examples
/// ```
/// use vface_models::timestamp::parse_duration;
/// use std::time::Duration;
/// assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
/// assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, TimestampError> {
    let raw = raw.trim();
    let body = raw
        .strip_suffix('s')
        .ok_or_else(|| TimestampError::MissingSuffix(raw.to_string()))?;

    if body.starts_with('-') {
        return Err(TimestampError::Negative(raw.to_string()));
    }

    let (secs_part, frac_part) = match body.split_once('.') {
        Some((s, f)) => (s, f),
        None => (body, ""),
    };

    let secs: u64 = secs_part
        .parse()
        .map_err(|_| TimestampError::InvalidValue("seconds", raw.to_string()))?;

    if frac_part.len() > 9 || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(TimestampError::InvalidValue("fraction", raw.to_string()));
    }

    let nanos: u32 = if frac_part.is_empty() {
        0
    } else {
        // Right-pad to nanosecond precision
        format!("{:0<9}", frac_part)
            .parse()
            .map_err(|_| TimestampError::InvalidValue("fraction", raw.to_string()))?
    };

    Ok(Duration::new(secs, nanos))
}

/// Format a segment start offset as `<seconds>.<millis>sec`.
///
/// Milliseconds are rounded and zero-padded to three digits.
///
/// # Examples
/// ```
/// use vface_models::timestamp::format_segment_timestamp;
/// use std::time::Duration;
/// assert_eq!(format_segment_timestamp(Duration::from_millis(12_345)), "12.345sec");
/// assert_eq!(format_segment_timestamp(Duration::from_millis(5_005)), "5.005sec");
/// ```
pub fn format_segment_timestamp(offset: Duration) -> String {
    let mut secs = offset.as_secs();
    let mut millis = (offset.subsec_nanos() + 500_000) / 1_000_000;
    if millis == 1000 {
        secs += 1;
        millis = 0;
    }
    format!("{}.{:03}sec", secs, millis)
}

/// Format an elapsed phase time as seconds with two decimals (`"3.21"`).
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("12.345s").unwrap(), Duration::from_millis(12_345));
        assert_eq!(
            parse_duration("1.000000001s").unwrap(),
            Duration::new(1, 1)
        );
        assert_eq!(parse_duration(" 2.5s ").unwrap(), Duration::from_millis(2_500));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(parse_duration("12.3"), Err(TimestampError::MissingSuffix(_))));
        assert!(matches!(parse_duration("-1s"), Err(TimestampError::Negative(_))));
        assert!(matches!(parse_duration("abcs"), Err(TimestampError::InvalidValue("seconds", _))));
        assert!(matches!(
            parse_duration("1.1234567890s"),
            Err(TimestampError::InvalidValue("fraction", _))
        ));
    }

    #[test]
    fn test_segment_timestamp_rounding() {
        assert_eq!(format_segment_timestamp(Duration::ZERO), "0.000sec");
        assert_eq!(format_segment_timestamp(Duration::new(4, 120_400_000)), "4.120sec");
        assert_eq!(format_segment_timestamp(Duration::new(4, 999_600_000)), "5.000sec");
    }

    #[test]
    fn test_format_elapsed_two_decimals() {
        assert_eq!(format_elapsed(Duration::from_millis(3_214)), "3.21");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00");
        assert_eq!(format_elapsed(Duration::from_millis(1_004)), "1.00");
    }
}
