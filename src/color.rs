//! Color model for floem-spectrum: the committed [`SpectrumColor`]
//! representation, the derived `Hsv` form, and the conversion rules
//! between them.
//!
//! A committed color is always HEX or RGBA. HSV only ever exists as a
//! derived intermediate (spectrum knob math, hue slider), never as storage.
//! Conversions are total: a source that cannot be parsed substitutes a
//! caller-provided fallback hex instead of failing, so a half-typed hex
//! string can never break rendering.

use log::debug;

use crate::hex_entry;
use crate::math;

/// Derived HSV form: `h` in degrees (0–360), `s` and `v` in percent (0–100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// True iff the color carries no hue information (zero saturation).
    pub fn is_monochrome(&self) -> bool {
        self.s == 0.0
    }
}

/// The committed color formats. HSV is intentionally absent: it is derived,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgba,
}

/// Which committed formats the format cycler may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectableFormats {
    pub hex: bool,
    pub rgba: bool,
}

impl Default for SelectableFormats {
    fn default() -> Self {
        Self {
            hex: true,
            rgba: true,
        }
    }
}

impl SelectableFormats {
    pub fn contains(&self, format: ColorFormat) -> bool {
        match format {
            ColorFormat::Hex => self.hex,
            ColorFormat::Rgba => self.rgba,
        }
    }

    pub(crate) fn insert(&mut self, format: ColorFormat) {
        match format {
            ColorFormat::Hex => self.hex = true,
            ColorFormat::Rgba => self.rgba = true,
        }
    }
}

/// A committed color. Never represents "no color".
///
/// The `Hex` variant holds the raw string as entered: either a validated
/// 3/6-digit hex code (optional leading `#`) or, transiently while the user
/// types, a partial string of 0–6 hex digits.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumColor {
    Hex(String),
    Rgba { r: u8, g: u8, b: u8, a: f64 },
}

impl Default for SpectrumColor {
    fn default() -> Self {
        Self::Hex(String::new())
    }
}

impl SpectrumColor {
    pub fn format(&self) -> ColorFormat {
        match self {
            SpectrumColor::Hex(_) => ColorFormat::Hex,
            SpectrumColor::Rgba { .. } => ColorFormat::Rgba,
        }
    }

    /// Alpha channel. HEX carries none, so it reads as fully opaque.
    pub fn alpha(&self) -> f64 {
        match self {
            SpectrumColor::Hex(_) => 1.0,
            SpectrumColor::Rgba { a, .. } => *a,
        }
    }
}

/// Parse a 3- or 6-digit hex string (optional leading `#`) into RGB channels.
///
/// Anything else — wrong length, stray characters, a typing intermediate —
/// is `None`.
pub(crate) fn parse_hex(raw: &str) -> Option<(u8, u8, u8)> {
    let stripped = raw.strip_prefix('#').unwrap_or(raw);
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
            let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
            let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
            let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
            let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Canonical 6-digit lowercase hex with leading `#`.
pub(crate) fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Resolve a color to RGB channels, substituting `fallback_hex` for any hex
/// value that is not a complete 3/6-digit code.
///
/// The fallback is itself resolved leniently; if it too fails to parse
/// (it should not — it is only ever assigned from validated hex) the result
/// is black rather than a panic.
fn effective_rgb(color: &SpectrumColor, fallback_hex: &str) -> (u8, u8, u8) {
    match color {
        SpectrumColor::Hex(raw) => parse_hex(raw).unwrap_or_else(|| {
            debug!("unparseable hex {raw:?}, falling back to {fallback_hex:?}");
            parse_hex(fallback_hex).unwrap_or((0, 0, 0))
        }),
        SpectrumColor::Rgba { r, g, b, .. } => (*r, *g, *b),
    }
}

/// Convert a committed color into `target` format.
///
/// A HEX source only converts directly when it is a complete 3/6-digit code;
/// otherwise `fallback_hex` stands in as the effective source. RGBA passes
/// through to the arithmetic as-is. Target HEX is canonical lowercase
/// `#rrggbb`; target RGBA keeps the source alpha (1.0 for HEX sources).
pub fn convert(source: &SpectrumColor, target: ColorFormat, fallback_hex: &str) -> SpectrumColor {
    let (r, g, b) = effective_rgb(source, fallback_hex);
    match target {
        ColorFormat::Hex => SpectrumColor::Hex(format_hex(r, g, b)),
        ColorFormat::Rgba => SpectrumColor::Rgba {
            r,
            g,
            b,
            a: source.alpha(),
        },
    }
}

/// Derive the HSV form of a committed color, with the same fallback rule as
/// [`convert`]. `h` in degrees, `s`/`v` in percent. Unrounded.
pub fn color_to_hsv(color: &SpectrumColor, fallback_hex: &str) -> Hsv {
    let (r, g, b) = effective_rgb(color, fallback_hex);
    let (h, s, v) = math::rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    Hsv::new(h * 360.0, s * 100.0, v * 100.0)
}

/// Build a committed color from HSV components, in `target` format, carrying
/// `alpha` for RGBA targets.
pub fn hsv_to_color(hsv: &Hsv, target: ColorFormat, alpha: f64) -> SpectrumColor {
    let (r, g, b) = math::hsv_to_rgb(
        (hsv.h / 360.0).rem_euclid(1.0),
        (hsv.s / 100.0).clamp(0.0, 1.0),
        (hsv.v / 100.0).clamp(0.0, 1.0),
    );
    let r = (r * 255.0).round() as u8;
    let g = (g * 255.0).round() as u8;
    let b = (b * 255.0).round() as u8;
    match target {
        ColorFormat::Hex => SpectrumColor::Hex(format_hex(r, g, b)),
        ColorFormat::Rgba => SpectrumColor::Rgba { r, g, b, a: alpha },
    }
}

/// True iff the color converts to an HSV with zero saturation.
pub fn is_monochrome(color: &SpectrumColor, fallback_hex: &str) -> bool {
    color_to_hsv(color, fallback_hex).is_monochrome()
}

/// Canonical display string for a committed color.
///
/// HEX displays the raw string as entered (typing intermediates included);
/// RGBA displays `r, g, b` channel values.
pub fn display_string(color: &SpectrumColor) -> String {
    match color {
        SpectrumColor::Hex(raw) => raw.clone(),
        SpectrumColor::Rgba { r, g, b, .. } => format!("{}, {}, {}", r, g, b),
    }
}

/// A committed color is hex-valid when it is a complete (non-typing) code.
pub(crate) fn is_valid_hex_color(color: &SpectrumColor) -> bool {
    match color {
        SpectrumColor::Hex(raw) => hex_entry::is_committed_hex(raw),
        SpectrumColor::Rgba { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex("ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex("#f00"), Some((255, 0, 0)));
        assert_eq!(parse_hex("abc"), Some((0xaa, 0xbb, 0xcc)));
        assert_eq!(parse_hex("ff00"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_convert_hex_to_rgba() {
        let c = convert(
            &SpectrumColor::Hex("#3b82f6".into()),
            ColorFormat::Rgba,
            "#000000",
        );
        assert_eq!(
            c,
            SpectrumColor::Rgba {
                r: 0x3b,
                g: 0x82,
                b: 0xf6,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_convert_partial_hex_uses_fallback() {
        let c = convert(&SpectrumColor::Hex("ff00".into()), ColorFormat::Rgba, "#102030");
        assert_eq!(
            c,
            SpectrumColor::Rgba {
                r: 0x10,
                g: 0x20,
                b: 0x30,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_convert_rgba_to_canonical_hex() {
        let c = convert(
            &SpectrumColor::Rgba {
                r: 255,
                g: 128,
                b: 0,
                a: 0.5,
            },
            ColorFormat::Hex,
            "#000000",
        );
        assert_eq!(c, SpectrumColor::Hex("#ff8000".into()));
    }

    #[test]
    fn test_hex_hsv_round_trip_preserves_color() {
        for hex in ["#ff0000", "#3b82f6", "#00ff7f", "#123456", "#ffffff"] {
            let hsv = color_to_hsv(&SpectrumColor::Hex(hex.into()), "#000000");
            let back = hsv_to_color(&hsv, ColorFormat::Hex, 1.0);
            assert_eq!(back, SpectrumColor::Hex(hex.into()));
        }
    }

    #[test]
    fn test_shorthand_hex_to_hsv() {
        let hsv = color_to_hsv(&SpectrumColor::Hex("#f00".into()), "#000000");
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 100.0);
        assert_eq!(hsv.v, 100.0);
    }

    #[test]
    fn test_is_monochrome() {
        assert!(is_monochrome(&SpectrumColor::Hex("#808080".into()), "#000000"));
        assert!(!is_monochrome(&SpectrumColor::Hex("#ff0000".into()), "#000000"));
        assert!(Hsv::new(0.0, 0.0, 50.0).is_monochrome());
        assert!(!Hsv::new(0.0, 1.0, 50.0).is_monochrome());
    }

    #[test]
    fn test_hsv_to_color_full_brightness_white() {
        let c = hsv_to_color(&Hsv::new(0.0, 0.0, 100.0), ColorFormat::Hex, 1.0);
        assert_eq!(c, SpectrumColor::Hex("#ffffff".into()));
    }

    #[test]
    fn test_alpha_carried_through() {
        assert_eq!(SpectrumColor::Hex("#ffffff".into()).alpha(), 1.0);
        let rgba = SpectrumColor::Rgba {
            r: 1,
            g: 2,
            b: 3,
            a: 0.25,
        };
        assert_eq!(rgba.alpha(), 0.25);
        let converted = convert(&rgba, ColorFormat::Rgba, "#000000");
        assert_eq!(converted.alpha(), 0.25);
    }
}
