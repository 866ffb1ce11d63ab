use std::fmt;

use crate::error::ExportError;
use crate::math::Point2;

/// An sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidColor`] for any other form or for
    /// out-of-range channels.
    pub fn parse(input: &str) -> Result<Self, ExportError> {
        let s = input.trim();
        let invalid = || ExportError::InvalidColor(input.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            let digit = |c: char| c.to_digit(16).ok_or_else(invalid);
            let digits: Vec<u32> = hex.chars().map(digit).collect::<Result<_, _>>()?;
            #[allow(clippy::cast_possible_truncation)]
            let channel = |hi: u32, lo: u32| (hi * 16 + lo) as u8;
            return match digits.as_slice() {
                [r, g, b] => Ok(Self::opaque(channel(*r, *r), channel(*g, *g), channel(*b, *b))),
                [r1, r2, g1, g2, b1, b2] => Ok(Self::opaque(channel(*r1, *r2), channel(*g1, *g2), channel(*b1, *b2))),
                _ => Err(invalid()),
            };
        }

        let (body, with_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        let channel = |part: &str| part.parse::<u8>().map_err(|_| invalid());
        match (parts.as_slice(), with_alpha) {
            ([r, g, b], false) => Ok(Self::opaque(channel(*r)?, channel(*g)?, channel(*b)?)),
            ([r, g, b, a], true) => {
                let a: f64 = a.parse().map_err(|_| invalid())?;
                if !(0.0..=1.0).contains(&a) {
                    return Err(invalid());
                }
                Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?, a))
            }
            _ => Err(invalid()),
        }
    }

    /// `true` when the alpha exceeds `alpha_threshold`.
    #[must_use]
    pub fn is_visible(&self, alpha_threshold: f64) -> bool {
        self.a > alpha_threshold
    }

    /// `#rrggbb`, alpha dropped.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Looks up the color under a run of points, typically from a source
/// image the drawing is traced from.
pub trait ColorSampler {
    /// `None` when the points fall outside the sampled area.
    fn sample(&self, points: &[Point2]) -> Option<Rgba>;
}

impl<F> ColorSampler for F
where
    F: Fn(&[Point2]) -> Option<Rgba>,
{
    fn sample(&self, points: &[Point2]) -> Option<Rgba> {
        self(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#ccc").unwrap(), Rgba::opaque(0xcc, 0xcc, 0xcc));
        assert_eq!(Rgba::parse("#1a2B3c").unwrap(), Rgba::opaque(0x1a, 0x2b, 0x3c));
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#ggg").is_err());
    }

    #[test]
    fn parses_functional_forms() {
        let c = Rgba::parse("rgba(10, 20, 30, 0.5)").unwrap();
        assert_eq!((c.r, c.g, c.b), (10, 20, 30));
        assert!((c.a - 0.5).abs() < f64::EPSILON);
        assert_eq!(Rgba::parse(" rgb(255,0,0) ").unwrap(), Rgba::opaque(255, 0, 0));
        assert!(Rgba::parse("rgba(1, 2, 3)").is_err());
        assert!(Rgba::parse("rgb(256, 0, 0)").is_err());
        assert!(Rgba::parse("rgba(1, 2, 3, 2)").is_err());
        assert!(Rgba::parse("cyan").is_err());
    }

    #[test]
    fn visibility_and_display() {
        let faint = Rgba::new(0, 0, 0, 0.1);
        assert!(!faint.is_visible(0.5));
        assert!(faint.is_visible(0.0));
        assert_eq!(Rgba::opaque(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(faint.to_string(), "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn closures_are_samplers() {
        let sampler = |pts: &[Point2]| pts.first().map(|_| Rgba::opaque(1, 2, 3));
        assert!(sampler.sample(&[]).is_none());
        assert_eq!(sampler.sample(&[Point2::origin()]).unwrap().b, 3);
    }
}
