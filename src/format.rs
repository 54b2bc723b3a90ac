//! Format cycling: step the active representation through the committed
//! formats in a fixed priority order.

use crate::color::{self, SpectrumColor, ColorFormat, SelectableFormats};

/// The committed formats, in cycling priority order.
pub(crate) const FORMAT_PRIORITY: [ColorFormat; 2] = [ColorFormat::Hex, ColorFormat::Rgba];

/// Step forward from the current color's format, with wraparound, skipping
/// formats the host has not made selectable, and convert the value into the
/// format landed on.
///
/// Terminates because the active format is itself always selectable; the
/// loop is still bounded for totality.
pub fn cycle_format(current: &SpectrumColor, selectable: SelectableFormats, fallback_hex: &str) -> SpectrumColor {
    let index = FORMAT_PRIORITY
        .iter()
        .position(|f| *f == current.format())
        .unwrap_or(0);
    for step in 1..=FORMAT_PRIORITY.len() {
        let candidate = FORMAT_PRIORITY[(index + step) % FORMAT_PRIORITY.len()];
        if selectable.contains(candidate) {
            return color::convert(current, candidate, fallback_hex);
        }
    }
    color::convert(current, current.format(), fallback_hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_hex_to_rgba_and_back() {
        let selectable = SelectableFormats::default();
        let rgba = cycle_format(&SpectrumColor::Hex("#ff8000".into()), selectable, "#000000");
        assert_eq!(
            rgba,
            SpectrumColor::Rgba {
                r: 255,
                g: 128,
                b: 0,
                a: 1.0
            }
        );
        let hex = cycle_format(&rgba, selectable, "#000000");
        assert_eq!(hex, SpectrumColor::Hex("#ff8000".into()));
    }

    #[test]
    fn test_single_selectable_format_is_a_fixpoint() {
        let selectable = SelectableFormats {
            hex: true,
            rgba: false,
        };
        let out = cycle_format(&SpectrumColor::Hex("#ff0000".into()), selectable, "#000000");
        assert_eq!(out, SpectrumColor::Hex("#ff0000".into()));
    }

    #[test]
    fn test_cycle_canonicalizes_typing_value_via_fallback() {
        let selectable = SelectableFormats::default();
        let out = cycle_format(&SpectrumColor::Hex("ff0".into()), selectable, "#000000");
        // "ff0" is a complete shorthand code, converted directly.
        assert_eq!(
            out,
            SpectrumColor::Rgba {
                r: 255,
                g: 255,
                b: 0,
                a: 1.0
            }
        );

        let out = cycle_format(&SpectrumColor::Hex("ff0000".into()), selectable, "#123456");
        assert_eq!(
            out,
            SpectrumColor::Rgba {
                r: 255,
                g: 0,
                b: 0,
                a: 1.0
            }
        );

        // A partial value cannot convert; the fallback stands in.
        let out = cycle_format(&SpectrumColor::Hex("ff00".into()), selectable, "#123456");
        assert_eq!(
            out,
            SpectrumColor::Rgba {
                r: 0x12,
                g: 0x34,
                b: 0x56,
                a: 1.0
            }
        );
    }
}
