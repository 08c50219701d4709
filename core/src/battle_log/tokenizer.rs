//! Free-text scanner for battle log entries.
//!
//! Anchors on `mm:ss.mmm` timestamps and reads one entry per anchor. Each
//! step function consumes a prefix of the input and hands back the remainder.

use memchr::memchr;

use super::LogEntry;

/// Extract every recognizable entry from pasted text.
///
/// Unmatchable stretches are skipped. Text with no timestamps yields an
/// empty vector, never an error.
pub fn tokenize(text: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut rest = text;
    while let Some((next, entry)) = next_entry(rest) {
        entries.push(entry);
        rest = next;
    }
    entries
}

/// Scan forward to the next timestamp anchor and read an entry there.
fn next_entry(input: &str) -> Option<(&str, LogEntry)> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    loop {
        let colon = pos + memchr(b':', &bytes[pos..])?;
        pos = colon + 1;
        // The minute digits sit two bytes before the colon.
        let Some(start) = colon.checked_sub(2) else {
            continue;
        };
        if !is_timestamp(&bytes[start..]) {
            continue;
        }
        if let Some(result) = read_entry(&input[start..]) {
            return Some(result);
        }
    }
}

/// Shape check for `\d\d:\d\d.\d\d\d` at the head of the slice.
fn is_timestamp(b: &[u8]) -> bool {
    b.len() >= 9
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
        && b[5] == b'.'
        && b[6].is_ascii_digit()
        && b[7].is_ascii_digit()
        && b[8].is_ascii_digit()
}

/// Read one entry starting at a validated timestamp.
fn read_entry(input: &str) -> Option<(&str, LogEntry)> {
    let time = input[..9].to_string();
    let rest = &input[9..];
    let rest = rest.strip_prefix(')').unwrap_or(rest);
    let rest = rest.trim_start();
    let (rest, character) = read_character(rest)?;
    let (rest, kind) = read_kind(rest);
    let (rest, target) = read_target(rest);
    Some((
        rest,
        LogEntry {
            time,
            character,
            kind,
            target,
        },
    ))
}

/// Character tokens run until whitespace or `>`. A leading cost marker `C`
/// is dropped when more of the token follows it.
fn read_character(input: &str) -> Option<(&str, String)> {
    let len = token_end(input);
    if len == 0 {
        return None;
    }
    let token = &input[..len];
    let token = match token.strip_prefix('C') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => token,
    };
    Some((&input[len..], token.to_string()))
}

/// Optional whitespace-separated type token. Consumed only when the whole
/// next token is one: `ON`, or a single digit with a hit (`타`) or slot
/// (`스`) suffix.
fn read_kind(input: &str) -> (&str, Option<String>) {
    let trimmed = input.trim_start();
    if trimmed.len() == input.len() {
        // No separator, so any type text already belongs to the character token.
        return (input, None);
    }
    let len = token_end(trimmed);
    let token = &trimmed[..len];
    if is_kind_token(token) {
        (&trimmed[len..], Some(token.to_string()))
    } else {
        (input, None)
    }
}

fn is_kind_token(token: &str) -> bool {
    if token == "ON" {
        return true;
    }
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(digit), Some('타' | '스'), None) if digit.is_ascii_digit()
    )
}

/// Optional `>target` suffix, recognized only when `>` directly follows the
/// previous token.
fn read_target(input: &str) -> (&str, Option<String>) {
    let Some(rest) = input.strip_prefix('>') else {
        return (input, None);
    };
    let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    if len == 0 {
        return (input, None);
    }
    (&rest[len..], Some(rest[..len].to_string()))
}

fn token_end(input: &str) -> usize {
    input
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(input.len())
}
