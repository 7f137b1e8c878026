//! Parameter types for trim operations.
//!
//! These types describe *how much* and *which way* to crop, not the crop
//! itself. They flow from the config file / CLI into the
//! [`calculations`](super::calculations) functions that compute the rectangle.
//!
//! ## Types
//!
//! - [`Padding`] — Whole-pixel margin added around the opaque box. Built from any real number.
//! - [`EdgeMode`] — How inclusive opaque extents become exclusive crop edges.
//! - [`EmptyPolicy`] — What to do with a fully transparent image.

use serde::{Deserialize, Serialize};

/// Margin in whole pixels added on every side of the opaque box.
///
/// Negative values shrink the box. The value is always finite; conversion
/// from `f64` rounds to nearest and saturates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Padding(i64);

impl Padding {
    pub fn new(pixels: i64) -> Self {
        Self(pixels)
    }

    /// Coerce a real number into a pixel padding.
    ///
    /// NaN has no pixel meaning; it is reported and treated as zero so the
    /// crop arithmetic never sees it.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            log::warn!("padding is not a number, using 0");
            return Self(0);
        }
        // `as` saturates at i64::MIN/MAX, so ±inf clamps to the full canvas later.
        Self(value.round() as i64)
    }

    /// Coerce user text into a padding, warning and falling back to zero when
    /// it is not a number.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => {
                log::warn!("padding {text:?} is not a number, using 0");
                Self(0)
            }
        }
    }

    pub fn pixels(self) -> i64 {
        self.0
    }
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Padding> for f64 {
    fn from(padding: Padding) -> Self {
        padding.0 as f64
    }
}

/// How the scanner's inclusive extents become crop edges.
///
/// The scanner reports the last opaque column/row. A crop region needs the
/// edge *after* it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMode {
    /// `right = last opaque column + 1`: the whole opaque region is kept.
    #[default]
    Exclusive,
    /// `right = last opaque column`, used directly as the exclusive edge.
    /// Drops the last opaque column and row; kept for output compatibility
    /// with older trims.
    Legacy,
}

/// Outcome for an image with no pixel of non-zero alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPolicy {
    /// Report an `EmptyImage` error; the file is left untouched.
    #[default]
    Report,
    /// Report a full-canvas result with zero distances; the file is left untouched.
    Passthrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_to_nearest_pixel() {
        assert_eq!(Padding::from_f64(10.0).pixels(), 10);
        assert_eq!(Padding::from_f64(2.4).pixels(), 2);
        assert_eq!(Padding::from_f64(2.5).pixels(), 3);
        assert_eq!(Padding::from_f64(-3.6).pixels(), -4);
    }

    #[test]
    fn padding_nan_is_zero() {
        assert_eq!(Padding::from_f64(f64::NAN).pixels(), 0);
    }

    #[test]
    fn padding_infinity_saturates() {
        assert_eq!(Padding::from_f64(f64::INFINITY).pixels(), i64::MAX);
        assert_eq!(Padding::from_f64(f64::NEG_INFINITY).pixels(), i64::MIN);
    }

    #[test]
    fn padding_parse_accepts_numbers() {
        assert_eq!(Padding::parse("12").pixels(), 12);
        assert_eq!(Padding::parse(" 7.6 ").pixels(), 8);
        assert_eq!(Padding::parse("-5").pixels(), -5);
    }

    #[test]
    fn padding_parse_falls_back_to_zero() {
        assert_eq!(Padding::parse("ten").pixels(), 0);
        assert_eq!(Padding::parse("").pixels(), 0);
    }

    #[test]
    fn padding_deserializes_from_float_or_integer() {
        #[derive(Deserialize)]
        struct Wrapper {
            padding: Padding,
        }
        let w: Wrapper = toml::from_str("padding = 4.0").unwrap();
        assert_eq!(w.padding, Padding::new(4));
        let w: Wrapper = toml::from_str("padding = 12").unwrap();
        assert_eq!(w.padding, Padding::new(12));
    }

    #[test]
    fn edge_mode_default_is_exclusive() {
        assert_eq!(EdgeMode::default(), EdgeMode::Exclusive);
    }

    #[test]
    fn empty_policy_default_is_report() {
        assert_eq!(EmptyPolicy::default(), EmptyPolicy::Report);
    }
}
