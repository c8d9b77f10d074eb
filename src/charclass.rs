//! Character-class predicates shared by the readers and matchers.
//!
//! These are the only places character membership is decided; the readers
//! and matchers express their grammars purely in terms of these predicates
//! plus state transitions.

/// Returns true for combining marks, which may follow a letter inside
/// internationalized domain labels and URL paths.
pub(crate) const fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Letters, digits, and marks in any script, plus underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric() || is_combining_mark(c)
}

/// A character that may begin (or continue) a domain label. Hyphens and
/// dots are handled by the reader states, not here.
pub(crate) fn is_domain_label_start(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// A character valid inside an email local part, other than the dot.
pub(crate) fn is_local_part_char(c: char) -> bool {
    c.is_alphanumeric()
        || is_combining_mark(c)
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '-'
        )
}

/// First character of a URI scheme (RFC 3986 §3.1).
pub(crate) const fn is_scheme_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Subsequent characters of a URI scheme.
pub(crate) const fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// RFC 3986 `sub-delims`.
pub(crate) const fn is_sub_delim(c: char) -> bool {
    matches!(c, '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=')
}

/// A character the authority reader consumes as part of a registered name.
/// ASCII unreserved and sub-delims per RFC 3986, widened to non-ASCII
/// letters and marks for internationalized hosts.
pub(crate) fn is_reg_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '-' | '.' | '_' | '~')
        || is_sub_delim(c)
        || (!c.is_ascii() && (c.is_alphanumeric() || is_combining_mark(c)))
}

/// A character the authority reader accepts as the first byte of an
/// authority. Provisional-only punctuation cannot open a match, so the set
/// is narrower than [`is_reg_name_char`].
pub(crate) fn is_authority_start(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c) || matches!(c, '_' | '~' | '%')
}

/// A character valid inside the userinfo component (`user:pass`).
pub(crate) fn is_userinfo_char(c: char) -> bool {
    is_reg_name_char(c) || matches!(c, ':' | '%')
}

/// URL-suffix characters that are confirmed the moment they are seen.
/// Brackets are excluded; the suffix reader balances those itself.
pub(crate) fn is_suffix_confirmed_char(c: char) -> bool {
    c.is_alphanumeric()
        || is_combining_mark(c)
        || matches!(
            c,
            '-' | '+' | '&' | '@' | '#' | '/' | '%' | '=' | '~' | '_' | '|' | '\'' | '$' | '*'
        )
}

/// URL-suffix characters that are consumed but only confirmed when a later
/// confirmable character arrives, so trailing sentence punctuation is
/// excluded automatically.
pub(crate) const fn is_suffix_deferred_char(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | '!' | '?')
}

/// Opening bracket tracked by the suffix reader.
pub(crate) const fn is_open_bracket(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

/// Closing bracket tracked by the suffix reader.
pub(crate) const fn is_close_bracket(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Returns the opening counterpart of a closing bracket.
pub(crate) const fn open_bracket_for(c: char) -> char {
    match c {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}
