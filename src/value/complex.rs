//! Complex numbers as produced by the coercer.

use std::fmt;

/// Complex number with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely imaginary value, as written `2j`.
    pub fn imaginary(im: f64) -> Self {
        Self { re: 0.0, im }
    }
}

/// Renders in the literal form the coercer reads back: `1+2j`, `-1.5-2j`, `2j`.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re == 0.0 && self.re.is_sign_positive() {
            return write!(f, "{}j", self.im);
        }
        if self.im.is_sign_negative() {
            write!(f, "{}-{}j", self.re, -self.im)
        } else {
            write!(f, "{}+{}j", self.re, self.im)
        }
    }
}
