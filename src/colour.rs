use std::str::FromStr;

/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0 and are
    /// clamped into that range
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey {
            g: g.clamp(0.0, 1.0),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::new_rgb(c.0.into(), c.1.into(), c.2.into())
    }
}

impl<T: Into<f32>> From<[T; 3]> for Colour {
    fn from(c: [T; 3]) -> Self {
        let [r, g, b] = c;
        Colour::new_rgb(r.into(), g.into(), b.into())
    }
}

/// Returned when a colour string isn't three comma-separated numbers
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a colour of the form `r,g,b`, got `{0}`")]
pub struct ParseColourError(pub String);

/// Parses colours written as `"r,g,b"` with each component on a 0 to 1 scale (not 0 to 255),
/// i.e. `"1,0,0"` is red. Whitespace around components is ignored.
impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split(',')
            .map(|c| c.trim().parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|_| ParseColourError(s.to_string()))?;

        match components.as_slice() {
            &[r, g, b] => Ok(Colour::new_rgb(r, g, b)),
            _ => Err(ParseColourError(s.to_string())),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}
