use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static TIME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](\.\d{1,3})?$")
        .expect("time pattern compiles")
});

/// Stand-in for a participant without a recorded time
pub const MISSING_TIME: &str = "99:59:59";

/// Parses `HH:MM:SS[.mmm]` into milliseconds
///
/// Empty input, all-zero times and anything unparseable or too large to
/// hold in milliseconds yield `None`; such times sort after every real time.
pub fn parse_millis(time: &str) -> Option<u64> {
    let time = time.trim();
    if time.is_empty() || time == "00:00:00" || time == "00:00:00.000" {
        return None;
    }

    let (hms, fraction) = match time.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (time, None),
    };

    let mut parts = hms.split(':').map(|p| p.parse::<u64>().ok());
    let (hh, mm, ss) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Some(hh)), Some(Some(mm)), Some(Some(ss)), None) => (hh, mm, ss),
        _ => return None,
    };

    let millis = match fraction {
        Some(fraction) => fraction.parse::<u64>().ok()?,
        None => 0,
    };

    hh.checked_mul(3600)
        .and_then(|secs| secs.checked_add(mm.checked_mul(60)?))
        .and_then(|secs| secs.checked_add(ss))
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
}

/// Orders two recorded times, fastest first
///
/// A missing or blank time counts as [`MISSING_TIME`]; zero or unparseable
/// times go last of all.
pub fn compare(a: Option<&str>, b: Option<&str>) -> Ordering {
    let key = |t: Option<&str>| {
        let t = t.filter(|t| !t.trim().is_empty()).unwrap_or(MISSING_TIME);
        parse_millis(t).unwrap_or(u64::MAX)
    };
    key(a).cmp(&key(b))
}

/// Strict check used before a time is saved
pub fn is_valid_format(time: &str) -> bool {
    TIME_FORMAT.is_match(time)
}

/// Masks raw keyboard input into `HH:MM:SS.mmm`
///
/// Non-digits are dropped and separators reinserted; the result is capped at
/// 12 characters. Applying it to an already formatted time is a no-op.
///
/// # Example
/// ```
/// use triatlon_web::domain::results::race_time::mask_input;
///
/// assert_eq!(mask_input("012345678"), "01:23:45.678");
/// assert_eq!(mask_input("01:23:45.678"), "01:23:45.678");
/// ```
pub fn mask_input(raw: &str) -> String {
    let mut value: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if value.len() > 2 {
        value.insert(2, ':');
    }
    if value.len() > 5 {
        value.insert(5, ':');
    }
    if value.len() > 8 {
        value.insert(8, '.');
    }
    value.truncate(12);
    value
}
