// src/tag.rs
//
// Lexical tag recognition for depth counting.
//
// - `<name` counts as an opening tag only when the next byte ends the name
//   (whitespace, '>' or '/'), so `<divider>` never counts as `<div`.
// - `</name>` counts as a closing tag; whitespace before the '>' is allowed.
// - Tag names match ASCII case-insensitively. Attributes are never inspected.

/* ============================ Utility predicates ========================= */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

/// True if `s[i..]` starts with `name`, ignoring ASCII case.
fn name_at(s: &[u8], i: usize, name: &[u8]) -> bool {
    s.get(i..i + name.len())
        .map_or(false, |got| got.eq_ignore_ascii_case(name))
}

/* =============================== Tag tokens ============================== */

/// A recognized tag token. The payload is the number of bytes to skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Open(usize),
    Close(usize),
}

/// Recognize an opening or closing `name` tag at `s[i]` (s[i] == '<').
pub fn token_at(s: &[u8], i: usize, name: &[u8]) -> Option<Token> {
    if s.get(i) != Some(&b'<') {
        return None;
    }

    if s.get(i + 1) == Some(&b'/') {
        let mut j = i + 2;
        if !name_at(s, j, name) {
            return None;
        }
        j += name.len();
        while j < s.len() && is_ws(s[j]) {
            j += 1;
        }
        return (s.get(j) == Some(&b'>')).then(|| Token::Close(j + 1 - i));
    }

    let j = i + 1;
    if !name_at(s, j, name) {
        return None;
    }
    match s.get(j + name.len()) {
        Some(&b) if !is_name_char(b) => Some(Token::Open(1 + name.len())),
        _ => None,
    }
}

/// Count opening and closing `name` tags in `s`.
pub fn count(s: &[u8], name: &[u8]) -> (usize, usize) {
    let mut opens = 0usize;
    let mut closes = 0usize;
    let mut i = 0usize;
    while let Some(off) = memchr::memchr(b'<', &s[i..]) {
        i += off;
        match token_at(s, i, name) {
            Some(Token::Open(len)) => {
                opens += 1;
                i += len;
            }
            Some(Token::Close(len)) => {
                closes += 1;
                i += len;
            }
            None => i += 1,
        }
    }
    (opens, closes)
}
