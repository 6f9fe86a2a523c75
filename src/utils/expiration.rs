//! Expiration date parsing for creation requests.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Error returned for an unparseable expiration date.
#[derive(Debug, thiserror::Error)]
#[error("Invalid expiration date format: {0}")]
pub struct ExpirationParseError(pub String);

/// Parses a client-supplied expiration date.
///
/// # Accepted Formats
///
/// - RFC 3339 with offset: `2030-01-31T12:00:00+02:00`, `2030-01-31T10:00:00Z`
/// - Naive date-time, read as UTC: `2030-01-31T10:00:00`
/// - Date only, read as UTC midnight: `2030-01-31`
///
/// Past dates are accepted; a record created with one is simply expired.
pub fn parse_expiration(input: &str) -> Result<DateTime<Utc>, ExpirationParseError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ExpirationParseError(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc() {
        let dt = parse_expiration("2030-01-31T10:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 31, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_expiration("2030-01-31T12:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 31, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_expiration("2030-01-31T10:00:00.500Z").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let dt = parse_expiration("2030-01-31T10:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 31, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_expiration("2030-01-31").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_past_date_is_accepted() {
        assert!(parse_expiration("2001-01-01").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_expiration("tomorrow").is_err());
        assert!(parse_expiration("2030-13-01").is_err());
        assert!(parse_expiration("").is_err());
    }
}
