/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Colors reach the engine already resolved; parsing color strings is the
/// caller's business. Raw channel slices can be checked with
/// [`Color::from_slice`]:
///
/// ```
/// use glseries_core::Color;
///
/// let gray = Color::from_hex(0xDDDDDD);
/// assert_eq!(Color::from_slice(&[1.0, 0.0, 0.0, 1.0]), Some(Color::rgb(1.0, 0.0, 0.0)));
/// assert_eq!(Color::from_slice(&[1.0, 0.0]), None);
/// # let _ = gray;
/// ```
///
/// `#[repr(C)]` + `Pod`, so it can be written straight into a uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    // Series palette.
    pub const SERIES_RED: Color = Color::rgb(0.8, 0.4, 0.0);
    pub const SERIES_GREEN: Color = Color::rgb(0.4, 0.8, 0.0);
    pub const SERIES_GRAY: Color = Color::rgb(0.866_666_7, 0.866_666_7, 0.866_666_7);
    pub const SERIES_DARK_GRAY: Color = Color::rgb(0.6, 0.6, 0.6);

    /// Number of channels a color slice must carry.
    pub const CHANNELS: usize = 4;

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGB values and a CSS-style opacity.
    ///
    /// The stored alpha is `sqrt(opacity)`, which keeps translucent series
    /// readable when the backend blends with `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.
    pub fn from_rgb_u8_opacity(r: u8, g: u8, b: u8, opacity: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: opacity.clamp(0.0, 1.0).sqrt(),
        }
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0x999999`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8_opacity(r, g, b, 1.0)
    }

    /// Read a color from a channel slice. Returns `None` unless the slice
    /// holds exactly [`Color::CHANNELS`] values.
    pub fn from_slice(channels: &[f32]) -> Option<Self> {
        match *channels {
            [r, g, b, a] => Some(Self { r, g, b, a }),
            _ => None,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Fully transparent colors never produce a visible pass.
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        let [r, g, b, a] = arr;
        Self { r, g, b, a }
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

static_assertions::assert_eq_size!(Color, [f32; 4]);
