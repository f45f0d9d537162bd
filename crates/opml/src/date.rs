//! Lenient date parsing for `dateCreated`, `dateModified` and `created`

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

/// Parse an OPML date.
///
/// OPML asks for RFC 822 dates (`Thu, 27 Jul 2000 03:24:18 GMT`). asctime
/// (`Thu Jul 27 03:24:18 2000`, taken as UTC) and RFC 3339 are accepted as
/// well. Anything else, including bare epoch numbers, is `None`.
pub fn parse_date(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc2822) {
        return Some(datetime);
    }

    // RFC 2822 only knows the obsolete "UT"/"GMT" spellings
    if let Some(datetime) = value
        .strip_suffix("UTC")
        .and_then(|rest| OffsetDateTime::parse(&format!("{rest}GMT"), &Rfc2822).ok())
    {
        return Some(datetime);
    }

    let asctime = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:none] [hour]:[minute]:[second] [year]"
    );
    if let Ok(datetime) = PrimitiveDateTime::parse(&collapse_spaces(value), &asctime) {
        return Some(datetime.assume_utc());
    }

    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(datetime);
    }

    debug!(value, "unrecognized date");
    None
}

/// asctime pads single-digit days with a space ("Jul  7")
fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_rfc2822_gmt() {
        assert_eq!(
            parse_date("Thu, 27 Jul 2000 03:24:18 GMT"),
            Some(datetime!(2000-07-27 03:24:18 UTC))
        );
    }

    #[test]
    fn test_rfc2822_utc_zone_name() {
        assert_eq!(
            parse_date("Thu, 27 Jul 2000 03:24:18 UTC"),
            Some(datetime!(2000-07-27 03:24:18 UTC))
        );
        assert_eq!(parse_date("UTC"), None);
    }

    #[test]
    fn test_rfc2822_numeric_offset() {
        let parsed = parse_date("Fri, 15 Sep 2000 09:01:23 +0200");
        assert_eq!(parsed, Some(datetime!(2000-09-15 07:01:23 UTC)));
    }

    #[test]
    fn test_asctime() {
        assert_eq!(
            parse_date("Thu Jul 27 03:24:18 2000"),
            Some(datetime!(2000-07-27 03:24:18 UTC))
        );
        assert_eq!(
            parse_date("Fri Jul  7 10:00:00 2000"),
            Some(datetime!(2000-07-07 10:00:00 UTC))
        );
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(
            parse_date("2000-07-27T03:24:18Z"),
            Some(datetime!(2000-07-27 03:24:18 UTC))
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert!(parse_date("\n  Thu, 27 Jul 2000 03:24:18 GMT  \n").is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("1372185524793"), None);
        assert_eq!(parse_date("yesterday"), None);
    }
}
