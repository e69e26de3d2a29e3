//! Coercion of raw configuration tokens into typed setting values.
//!
//! Recognizers run in a fixed order: `none`, then `true`/`false`, then the
//! numeric grammar, and finally the untouched string. Coercion never fails.
//!
//! Numeric grammar:
//!
//! ```text
//! number   := ws* sign? ws* body ws*
//! body     := real | imag | real ('+'|'-') imag
//! imag     := real ('j'|'J')
//! real     := digits ('.' digits?)? exponent? | '.' digits exponent?
//! exponent := ('e'|'E') ('+'|'-')? digits
//! ```

use crate::value::{Complex, SettingValue};

/// Convert a raw token into the narrowest typed value its literal form implies.
pub fn coerce(token: &str) -> SettingValue {
    let trimmed = token.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return SettingValue::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return SettingValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return SettingValue::Bool(false);
    }
    parse_number(trimmed).unwrap_or_else(|| SettingValue::Str(token.to_string()))
}

/// Whether `token` is accepted by the numeric grammar.
pub fn is_number(token: &str) -> bool {
    parse_number(token.trim()).is_some()
}

fn parse_number(text: &str) -> Option<SettingValue> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, text[1..].trim_start()),
        Some(b'+') => (false, text[1..].trim_start()),
        _ => (false, text),
    };

    let mut cursor = Cursor::new(rest);
    let first = cursor.real()?;
    if cursor.at_end() {
        return first.to_value(negative);
    }

    if cursor.imaginary_suffix() {
        if !cursor.at_end() {
            return None;
        }
        let im = apply_sign(first.to_f64()?, negative);
        return Some(SettingValue::Complex(Complex::imaginary(im)));
    }

    let im_negative = match cursor.bump()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let second = cursor.real()?;
    if !cursor.imaginary_suffix() || !cursor.at_end() {
        return None;
    }
    let re = apply_sign(first.to_f64()?, negative);
    let im = apply_sign(second.to_f64()?, im_negative);
    Some(SettingValue::Complex(Complex::new(re, im)))
}

fn apply_sign(value: f64, negative: bool) -> f64 {
    if negative {
        -value
    } else {
        value
    }
}

/// Unsigned real literal as written in the source text.
struct RealLiteral<'a> {
    text: &'a str,
    fractional: bool,
}

impl RealLiteral<'_> {
    /// Finite value of the literal. `1e999` overflows to infinity and is
    /// rejected, leaving the token a string.
    fn to_f64(&self) -> Option<f64> {
        self.text.parse::<f64>().ok().filter(|x| x.is_finite())
    }

    fn to_value(&self, negative: bool) -> Option<SettingValue> {
        if self.fractional {
            return self.to_f64().map(|x| SettingValue::Float(apply_sign(x, negative)));
        }
        // `007` is not a decimal integer literal; `0` and `000` are.
        if self.text.len() > 1 && self.text.starts_with('0') && self.text.bytes().any(|b| b != b'0')
        {
            return None;
        }
        let parsed = if negative {
            format!("-{}", self.text).parse::<i64>()
        } else {
            self.text.parse::<i64>()
        };
        parsed.ok().map(SettingValue::Int)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn at_end(&self) -> bool {
        self.pos == self.text.len()
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn imaginary_suffix(&mut self) -> bool {
        if matches!(self.peek(), Some(b'j' | b'J')) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn real(&mut self) -> Option<RealLiteral<'a>> {
        let start = self.pos;
        let int_digits = self.digits();
        let mut fractional = false;

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let frac_digits = self.digits();
            if int_digits == 0 && frac_digits == 0 {
                self.pos = start;
                return None;
            }
            fractional = true;
        } else if int_digits == 0 {
            return None;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                // Dangling `e`; leave it for the caller to reject.
                self.pos = mark;
            } else {
                fractional = true;
            }
        }

        Some(RealLiteral {
            text: &self.text[start..self.pos],
            fractional,
        })
    }
}
