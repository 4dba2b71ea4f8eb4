use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| Error::format(format!("color {s:?} does not start with '#'")))?;
        if digits.len() != 6 {
            return Err(Error::format(format!("color {s:?} needs 6 hex digits")));
        }
        let mut rgb = [0; 3];
        hex::decode_to_slice(digits, &mut rgb)
            .map_err(|e| Error::format(format!("color {s:?}: {e}")))?;
        let [r, g, b] = rgb;
        Ok(Self { r, g, b })
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", hex::encode(self.to_array()))
    }
}
impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod test {
    use crate::{Color, Error};

    #[test]
    fn parse_and_print() {
        let color: Color = "#fdde59".parse().unwrap();
        assert_eq!(color, Color::new(0xfd, 0xde, 0x59));
        assert_eq!(color.to_string(), "#fdde59");
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_malformed() {
        for s in ["fdde59", "#fdde5", "#fdde590", "#gggggg", "", "#"] {
            assert!(
                matches!(s.parse::<Color>(), Err(Error::Format { .. })),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap(), Color::new(1, 2, 3));
        assert!(serde_json::from_str::<Color>("\"010203\"").is_err());
    }
}
