//! Centralized time formatting utilities.
//!
//! All timecode display and entry goes through this module so the timeline
//! view, tooltips, and the CLI agree on one `mm:ss.mmm` rendering and on how
//! user-typed drafts are normalized.

/// A freeform time draft that parsed successfully.
///
/// `normalized` is the canonical [`format_timecode`] rendering of `seconds`,
/// suitable for writing back into the input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeformTime {
    pub seconds: f64,
    pub normalized: String,
}

/// Render seconds as `mm:ss.mmm`, with a `-` prefix for negative values.
///
/// Minutes are zero-padded to two digits but not capped, so values past an
/// hour render as `75:00.000` rather than wrapping.
///
/// # Examples
/// ```
/// use tactic_types::formatting::format_timecode;
/// assert_eq!(format_timecode(62.5), "01:02.500");
/// assert_eq!(format_timecode(0.0), "00:00.000");
/// assert_eq!(format_timecode(-3.25), "-00:03.250");
/// assert_eq!(format_timecode(6000.0), "100:00.000");
/// ```
pub fn format_timecode(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let abs = seconds.abs();
    let minutes = (abs / 60.0).floor() as u64;
    let secs = abs - minutes as f64 * 60.0;
    format!("{sign}{minutes:02}:{secs:06.3}")
}

/// Parse a strict `[-]mm:ss.mmm` timecode back into seconds.
///
/// This is the inverse of [`format_timecode`]: two or more minute digits,
/// exactly two second digits, and exactly three millisecond digits. Anything
/// else returns `None`.
///
/// # Examples
/// ```
/// use tactic_types::formatting::parse_timecode;
/// assert_eq!(parse_timecode("01:02.500"), Some(62.5));
/// assert_eq!(parse_timecode("-00:03.250"), Some(-3.25));
/// assert_eq!(parse_timecode("1:02.500"), None);
/// assert_eq!(parse_timecode("01:02.5"), None);
/// assert_eq!(parse_timecode(""), None);
/// ```
pub fn parse_timecode(text: &str) -> Option<f64> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text),
    };
    let (minutes, seconds) = rest.split_once(':')?;
    if minutes.len() < 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let b = seconds.as_bytes();
    if b.len() != 6 || b[2] != b'.' {
        return None;
    }
    if !b[..2].iter().all(u8::is_ascii_digit) || !b[3..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let m: f64 = minutes.parse().ok()?;
    let s: f64 = seconds.parse().ok()?;
    Some(sign * (m * 60.0 + s))
}

/// Tolerant parser for user-typed time drafts.
///
/// Accepted grammar: optional sign, optional `minutes:`, integer seconds,
/// optional `.fraction`. The fraction is read as milliseconds with short
/// forms scaled up (`.5` is 500ms, `.25` is 250ms) and digits past the third
/// truncated. A negative total is coerced to zero rather than rejected, so a
/// draft of `-5` commits as `00:00.000`.
///
/// # Examples
/// ```
/// use tactic_types::formatting::parse_freeform_time;
/// let t = parse_freeform_time("1:2.5").unwrap();
/// assert_eq!(t.seconds, 62.5);
/// assert_eq!(t.normalized, "01:02.500");
/// assert_eq!(parse_freeform_time("-5").unwrap().normalized, "00:00.000");
/// assert!(parse_freeform_time("1:2:3").is_none());
/// assert!(parse_freeform_time("").is_none());
/// ```
pub fn parse_freeform_time(text: &str) -> Option<FreeformTime> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (minutes, rest) = match rest.split_once(':') {
        Some((m, rest)) => (parse_digits(m)?, rest),
        None => (0, rest),
    };
    let (seconds, frac_ms) = match rest.split_once('.') {
        Some((s, frac)) => (parse_digits(s)?, parse_frac_ms(frac)?),
        None => (parse_digits(rest)?, 0),
    };
    let mut total_ms = minutes as i64 * 60_000 + seconds as i64 * 1000 + frac_ms as i64;
    if negative {
        total_ms = -total_ms;
    }
    let seconds = total_ms.max(0) as f64 / 1000.0;
    Some(FreeformTime {
        seconds,
        normalized: format_timecode(seconds),
    })
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Fraction digits to milliseconds: one digit is tenths, two are hundredths,
/// three are taken verbatim, anything further is truncated.
fn parse_frac_ms(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = &s[..s.len().min(3)];
    let value: u32 = digits.parse().ok()?;
    Some(match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    })
}
