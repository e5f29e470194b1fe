//! Field sanitizers
//!
//! Each sanitizer turns attacker-influenceable text into a normalized,
//! allow-listed string with a hard length bound. They are pure and total:
//! any input (including the empty string) produces an output, never an error.
//!
//! This is hygiene before data leaves the client, not a security boundary.
//! Output must still be rendered as plain text only.

use crate::state::FormatClass;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Maximum length of a sanitized name, in characters
pub const NAME_MAX_LEN: usize = 80;
/// Maximum length of a sanitized email address, in characters
pub const EMAIL_MAX_LEN: usize = 254;
/// Maximum length of a sanitized phone number, in characters
pub const PHONE_MAX_LEN: usize = 16;
/// Maximum length of a sanitized free-text message, in characters
pub const MESSAGE_MAX_LEN: usize = 2000;
/// Maximum length of a sanitized URL, in characters
pub const URL_MAX_LEN: usize = 2048;
/// Longest message the relay forwards; a fully answered diagnostic fits
pub const SUMMARY_MAX_LEN: usize = 16_000;

static TAG_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static pattern"));
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("static pattern"));
static SCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("static pattern"));
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static pattern"));

/// Passes are re-run until the output is stable; removals can expose new
/// forbidden sequences (`-;-` becomes `--`), and every pass only shrinks.
const MAX_PASSES: usize = 16;

fn settle(input: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(input);
    for _ in 0..MAX_PASSES {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize(input: &str) -> String {
    input.nfkc().collect()
}

/// Remove ASCII control characters. With `keep_line_breaks`, `\n` and `\t`
/// survive.
fn strip_controls(input: &str, keep_line_breaks: bool) -> String {
    input
        .chars()
        .filter(|&c| {
            if keep_line_breaks && (c == '\n' || c == '\t') {
                return true;
            }
            !c.is_ascii_control()
        })
        .collect()
}

fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_all(regex: &Regex, input: &str) -> String {
    regex.replace_all(input, "").into_owned()
}

/// Sanitize a person's name: letters of any script, whitespace, hyphen and
/// apostrophe only.
pub fn sanitize_name(input: &str) -> String {
    settle(input, |s| {
        let s = strip_controls(&normalize(s), false);
        let s: String = s
            .chars()
            .filter(|&c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
            .collect();
        let s = collapse_whitespace(&s);
        truncate_chars(&s, NAME_MAX_LEN).trim().to_string()
    })
}

/// Sanitize an email address: lowercase, `[a-z0-9._%+-@]` only, a single `@`.
pub fn sanitize_email(input: &str) -> String {
    settle(input, |s| {
        let s = normalize(s).trim().to_lowercase();
        let s = strip_controls(&s, false);
        let s = strip_all(&TAG_LIKE, &s);
        let s: String = s
            .chars()
            .filter(|&c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || "._%+-@".contains(c)
            })
            .collect();
        let mut parts = s.split('@');
        let s = match (parts.next(), parts.next()) {
            (Some(local), Some(domain)) => format!("{local}@{domain}"),
            (Some(local), None) => local.to_string(),
            _ => String::new(),
        };
        truncate_chars(&s, EMAIL_MAX_LEN)
    })
}

/// Sanitize a phone number: ASCII digits with at most one leading `+`, no
/// leading zeros.
pub fn sanitize_phone(input: &str) -> String {
    settle(input, |s| {
        let s = strip_controls(&normalize(s), false);
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0'..='9' => out.push(c),
                '+' if out.is_empty() => out.push(c),
                _ => {}
            }
        }
        let (plus, digits) = match out.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", out.as_str()),
        };
        let s = format!("{plus}{}", digits.trim_start_matches('0'));
        truncate_chars(&s, PHONE_MAX_LEN)
    })
}

/// Sanitize free text: strips markup, comment and statement tokens, quoting
/// characters, template sigils and `javascript:` schemes. Newlines survive.
pub fn sanitize_message(input: &str) -> String {
    sanitize_message_within(input, MESSAGE_MAX_LEN)
}

/// [`sanitize_message`] with a caller-chosen length bound.
pub fn sanitize_message_within(input: &str, max_len: usize) -> String {
    settle(input, |s| {
        let s = strip_controls(&normalize(s), true);
        let s = strip_all(&TAG_LIKE, &s);
        let s: String = s.chars().filter(|&c| c != '<' && c != '>').collect();
        let s = strip_all(&BLOCK_COMMENT, &s);
        let s = s.replace("--", "");
        let s: String = s
            .chars()
            .filter(|c| !matches!(c, ';' | '\'' | '"' | '`' | '\\' | '{' | '}' | '$'))
            .collect();
        let mut s = s;
        while SCRIPT_SCHEME.is_match(&s) {
            s = strip_all(&SCRIPT_SCHEME, &s);
        }
        let s = SPACE_RUN.replace_all(&s, " ");
        truncate_chars(s.trim(), max_len).trim().to_string()
    })
}

/// Sanitize a website address typed by the user.
pub fn sanitize_url(input: &str) -> String {
    settle(input, |s| {
        let s = strip_controls(&normalize(s), false);
        let s: String = s
            .trim()
            .chars()
            .filter(|&c| {
                !c.is_whitespace()
                    && !matches!(c, '<' | '>' | '"' | '\'' | '`' | '\\' | '{' | '}')
            })
            .collect();
        let mut s = s;
        while SCRIPT_SCHEME.is_match(&s) {
            s = strip_all(&SCRIPT_SCHEME, &s);
        }
        truncate_chars(&s, URL_MAX_LEN)
    })
}

/// Pick the sanitizer for a step's format class.
pub fn sanitize_for(format: FormatClass, input: &str) -> String {
    match format {
        FormatClass::Plain => sanitize_message(input),
        FormatClass::Name => sanitize_name(input),
        FormatClass::Email => sanitize_email(input),
        FormatClass::Phone => sanitize_phone(input),
        FormatClass::Url => sanitize_url(input),
    }
}

/// Format phone digits for display as `(DD) DDDDD-DDDD`.
///
/// Non-digits are ignored. More than 11 digits are shown unformatted.
pub fn format_phone_mask(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();
    if len == 0 || len > 11 {
        return digits;
    }
    let area = &digits[..len.min(2)];
    if len <= 2 {
        return format!("({area}");
    }
    if len <= 6 {
        return format!("({area}) {}", &digits[2..]);
    }
    let split = if len > 10 { 7 } else { 6 };
    format!("({area}) {}-{}", &digits[2..split], &digits[split..])
}
