use nalgebra::{Quaternion, Vector3};
use std::fmt;
use std::f32::consts::PI;

/// RGB color packed as 16-bit RGB565.
///
/// The original 8-bit channels are kept alongside the packed word so that
/// repeated color math stays loss-free until the packed value is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    packed: u16,
}

impl RGBColor {
    pub const BLACK: RGBColor = RGBColor::new(0, 0, 0);
    pub const WHITE: RGBColor = RGBColor::new(255, 255, 255);
    pub const RED: RGBColor = RGBColor::new(255, 0, 0);
    pub const GREEN: RGBColor = RGBColor::new(0, 255, 0);
    pub const BLUE: RGBColor = RGBColor::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RGBColor {
            r,
            g,
            b,
            packed: Self::pack(r, g, b),
        }
    }

    /// Bits 15-0 are RRRRRGGGGGGBBBBB.
    const fn pack(r: u8, g: u8, b: u8) -> u16 {
        (((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | ((b >> 3) as u16)
    }

    /// The encoded 16-bit RGB565 value.
    pub const fn packed(&self) -> u16 {
        self.packed
    }

    /// Scales brightness so that 255 maps to `max_brightness`.
    pub fn scale(&self, max_brightness: u8) -> Self {
        let scale = |c: u8| (u16::from(c) * u16::from(max_brightness) / 255) as u8;
        RGBColor::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Adds `value` to each channel, saturating at 255.
    pub fn add(&self, value: u8) -> Self {
        RGBColor::new(
            self.r.saturating_add(value),
            self.g.saturating_add(value),
            self.b.saturating_add(value),
        )
    }

    /// Shifts the hue by `degrees`, rotating the RGB vector about the
    /// gray diagonal with a quaternion.
    pub fn hue_shift(&self, degrees: f32) -> Self {
        let half_rad = degrees * PI / 360.0;
        let hue_ratio = 0.5 * half_rad.sin();
        let q = Quaternion::new(half_rad.cos(), hue_ratio, hue_ratio, hue_ratio);

        let v = Vector3::new(f32::from(self.r), f32::from(self.g), f32::from(self.b));
        let rotated = (q * Quaternion::from_imag(v) * q.conjugate()).imag();

        RGBColor::new(
            rotated.x.clamp(0.0, 255.0) as u8,
            rotated.y.clamp(0.0, 255.0) as u8,
            rotated.z.clamp(0.0, 255.0) as u8,
        )
    }

    /// Linear interpolation between two colors; `ratio` 0 yields `a`.
    pub fn interpolate(a: RGBColor, b: RGBColor, ratio: f32) -> RGBColor {
        let lerp = |x: u8, y: u8| (f32::from(x) * (1.0 - ratio) + f32::from(y) * ratio) as u8;
        RGBColor::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.r, self.g, self.b)
    }
}
