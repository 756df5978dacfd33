use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
    /// Reference to a custom property, resolved against the element being
    /// styled and its composed ancestors.
    Var {
        name: String,
        fallback: Option<Box<Color>>,
    },
}

/// 24-bit colour as sent to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(srgb: Srgb<u8>) -> Self {
        let (r, g, b) = srgb.into_components();
        Self::new(r, g, b)
    }
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// `var(--name, fallback)`
    pub fn var(name: impl Into<String>, fallback: Color) -> Self {
        Self::Var {
            name: name.into(),
            fallback: Some(Box::new(fallback)),
        }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        let nibbles: Vec<u8> = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        let [r, g, b] = match *nibbles.as_slice() {
            [r, g, b] => [r * 17, g * 17, b * 17],
            [r1, r2, g1, g2, b1, b2] => [r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2],
            _ => return None,
        };
        Some(Self::rgb(r, g, b))
    }

    /// Concrete colour without custom property lookup. Variables take their
    /// fallback, or black without one.
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h } => {
                let srgb: Srgb = Oklch::new(*l, *c, *h).into_color();
                srgb.into_format::<u8>().into()
            }
            Self::Var { fallback, .. } => fallback.as_deref().map(Color::to_rgb).unwrap_or_default(),
        }
    }
}
