//! Degrees-minutes-seconds notation and coordinate formatting.

use super::MAX_PRECISION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compass hemisphere letter of a DMS value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    /// North (positive latitude)
    N,
    /// South (negative latitude)
    S,
    /// East (positive longitude)
    E,
    /// West (negative longitude)
    W,
}

impl Hemisphere {
    /// Hemisphere for a signed decimal value
    #[must_use]
    pub fn for_decimal(decimal: f64, is_longitude: bool) -> Self {
        match (is_longitude, decimal < 0.0) {
            (false, false) => Self::N,
            (false, true) => Self::S,
            (true, false) => Self::E,
            (true, true) => Self::W,
        }
    }

    /// Whether values in this hemisphere are negative
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::S | Self::W)
    }

    /// Whether this is a longitude hemisphere
    #[must_use]
    pub const fn is_longitude(self) -> bool {
        matches!(self, Self::E | Self::W)
    }

    /// Single-letter form
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::N => 'N',
            Self::S => 'S',
            Self::E => 'E',
            Self::W => 'W',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Self::N),
            "S" => Ok(Self::S),
            "E" => Ok(Self::E),
            "W" => Ok(Self::W),
            other => Err(format!("unknown hemisphere '{other}', expected N, S, E or W")),
        }
    }
}

/// An angle split into degrees, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees (unsigned, not reduced to a valid range)
    pub degrees: u64,
    /// Whole minutes, `0..60`
    pub minutes: u32,
    /// Seconds rounded to hundredths, `0.0..60.0`
    pub seconds: f64,
    /// Hemisphere carrying the sign
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Split a signed decimal angle into DMS components.
    ///
    /// Seconds are rounded to hundredths; a rounding carry propagates into
    /// minutes and degrees so seconds never read `60.00`. Magnitudes are not
    /// range-checked; `1e10` converts to `10000000000°0'0.00"`. Magnitudes
    /// beyond `u64` centiseconds (about 5e13 degrees) saturate.
    #[must_use]
    pub fn from_decimal(decimal: f64, is_longitude: bool) -> Self {
        let hemisphere = Hemisphere::for_decimal(decimal, is_longitude);
        let centiseconds = (decimal.abs() * 360_000.0).round() as u64;

        let degrees = centiseconds / 360_000;
        let minutes = (centiseconds % 360_000) / 6_000;
        let seconds = (centiseconds % 6_000) as f64 / 100.0;

        Self {
            degrees,
            minutes: minutes as u32,
            seconds,
            hemisphere,
        }
    }

    /// Signed decimal degrees
    #[must_use]
    pub fn to_decimal(&self) -> f64 {
        from_dms(
            self.degrees as f64,
            f64::from(self.minutes),
            self.seconds,
            self.hemisphere,
        )
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{:.2}\"{}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

impl FromStr for Dms {
    type Err = String;

    /// Parse the `D°M'S"X` form produced by `Display` (whitespace tolerated)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (degrees, rest) = compact
            .split_once('°')
            .ok_or_else(|| format!("missing degree sign in '{s}'"))?;
        let (minutes, rest) = rest
            .split_once('\'')
            .ok_or_else(|| format!("missing minute mark in '{s}'"))?;
        let (seconds, hemisphere) = rest
            .split_once('"')
            .ok_or_else(|| format!("missing second mark in '{s}'"))?;

        let degrees = degrees
            .parse::<u64>()
            .map_err(|e| format!("bad degrees '{degrees}': {e}"))?;
        let minutes = minutes
            .parse::<u32>()
            .map_err(|e| format!("bad minutes '{minutes}': {e}"))?;
        let seconds = seconds
            .parse::<f64>()
            .map_err(|e| format!("bad seconds '{seconds}': {e}"))?;
        let hemisphere = hemisphere.parse::<Hemisphere>()?;

        if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
            return Err(format!("minutes and seconds must be below 60 in '{s}'"));
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        })
    }
}

/// Components of `decimal` in DMS notation
#[must_use]
pub fn to_dms_parts(decimal: f64, is_longitude: bool) -> Dms {
    Dms::from_decimal(decimal, is_longitude)
}

/// Format `decimal` as a DMS string, e.g. `37°46'29.64"N`.
#[must_use]
pub fn to_dms(decimal: f64, is_longitude: bool) -> String {
    Dms::from_decimal(decimal, is_longitude).to_string()
}

/// Decimal degrees from DMS components; S and W produce negative values.
#[must_use]
pub fn from_dms(degrees: f64, minutes: f64, seconds: f64, hemisphere: Hemisphere) -> f64 {
    let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
    if hemisphere.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Fixed-point `"lat, lng"` string with `precision` decimals.
///
/// Precision is capped at [`MAX_PRECISION`].
#[must_use]
pub fn format_coordinates(lat: f64, lng: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    format!("{lat:.precision$}, {lng:.precision$}")
}
