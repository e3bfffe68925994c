use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit sRGB color written as `#rrggbb`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HexColor(pub Srgb<u8>);

impl HexColor {
    pub const BLACK: HexColor = HexColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn components(self) -> [u8; 3] {
        let (r, g, b) = self.0.into_components();
        [r, g, b]
    }
}

impl FromStr for HexColor {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        // palette also accepts the 3 digit shorthand, which block files never use,
        // and slices by byte so anything non-ascii has to be rejected first
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(crate::Error::InvalidHexColor(s.to_string()));
        }

        Srgb::from_str(digits)
            .map(Self)
            .map_err(|_| crate::Error::InvalidHexColor(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.components();
        let hex = u32::from_be_bytes([0, r, g, b]);
        write!(f, "#{hex:06x}")
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;

        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// Channel-wise mean of `colors`, rounding half to even.
pub fn average(colors: &[HexColor]) -> crate::Result<HexColor> {
    if colors.is_empty() {
        return Err(crate::Error::EmptyColorList);
    }

    let mut total = [0u64; 3];

    for color in colors {
        for (sum, channel) in total.iter_mut().zip(color.components()) {
            *sum += channel as u64;
        }
    }

    let count = colors.len() as f64;
    let [r, g, b] = total.map(|sum| (sum as f64 / count).round_ties_even() as u8);

    Ok(HexColor::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        let a: HexColor = "#83e03e".parse().unwrap();
        let b: HexColor = " 83E03E ".parse().unwrap();

        assert_eq!(a, HexColor::new(0x83, 0xe0, 0x3e));
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("#fff".parse::<HexColor>().is_err());
        assert!("#12345g".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
        assert!("#aé456".parse::<HexColor>().is_err());
        assert!("éééé".parse::<HexColor>().is_err());
    }

    #[test]
    fn displays_lowercase_padded() {
        assert_eq!(HexColor::new(0x0a, 0xBC, 0x01).to_string(), "#0abc01");
        assert_eq!(HexColor::BLACK.to_string(), "#000000");
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&HexColor::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");

        let color: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(color, HexColor::new(255, 0, 16));
    }

    #[test]
    fn average_black_and_white_is_mid_gray() {
        let colors = [HexColor::BLACK, HexColor::new(255, 255, 255)];

        assert_eq!(average(&colors).unwrap().to_string(), "#808080");
    }

    #[test]
    fn average_rounds_half_to_even() {
        // 0.5 -> 0, 2.5 -> 2, 3.5 -> 4
        let colors = [HexColor::new(0, 2, 3), HexColor::new(1, 3, 4)];

        assert_eq!(average(&colors).unwrap(), HexColor::new(0, 2, 4));
    }

    #[test]
    fn average_of_nothing_fails() {
        assert!(matches!(average(&[]), Err(crate::Error::EmptyColorList)));
    }
}
