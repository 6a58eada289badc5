//! Operand parsing
//!
//! Query values arrive as `application/x-www-form-urlencoded` text and are
//! parsed into `f64`. NaN is never a valid operand.

use url::form_urlencoded;

/// Decoded query string parameters, in request order
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string (without leading `?`)
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { pairs }
    }

    /// First value for `name`, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parse the first value for `name` as an operand
    pub fn operand(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(parse_operand)
    }
}

/// Parse the longest numeric prefix of `raw`
///
/// Leading whitespace is skipped, then an optional sign followed by either
/// `Infinity` or a decimal literal (`12`, `1.`, `.5`, `3e-2`). Trailing
/// characters after the prefix are ignored, so `12abc` reads as 12. Input
/// with no numeric prefix (`abc`, `inf`, `NaN`, `.`) yields `None`.
pub fn parse_operand(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // The prefix is plain ASCII, so slicing at `end` is on a char boundary
    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
