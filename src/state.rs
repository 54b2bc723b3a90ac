//! Color state manager: owns the authoritative current color plus the two
//! pieces of fallback memory that make lossy conversions safe — the last
//! known-valid hex and the last known-valid hue.
//!
//! Every operation here degrades to a fallback value instead of failing;
//! nothing in this module can interrupt interactive rendering.

use log::{debug, trace};

use crate::color::{self, SpectrumColor, ColorFormat, Hsv, SelectableFormats};

/// Round to two decimal places on the 0–100 scale.
fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mutable picker state, one instance per widget.
///
/// `last_valid_color` and `latest_valid_hue` are plain fields rather than
/// captured closure state so they can be unit-tested without a rendering
/// context.
#[derive(Debug, Clone)]
pub struct ColorState {
    current: SpectrumColor,
    selectable: SelectableFormats,
    last_valid_color: String,
    latest_valid_hue: f64,
    hsv_override: Option<Hsv>,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            current: SpectrumColor::default(),
            selectable: SelectableFormats::default(),
            last_valid_color: "#000000".to_string(),
            latest_valid_hue: 0.0,
            hsv_override: None,
        }
    }
}

impl ColorState {
    pub fn new(initial: SpectrumColor) -> Self {
        let mut state = Self::default();
        state.on_external_color_update(initial, None);
        state
    }

    /// The authoritative current color.
    pub fn current(&self) -> &SpectrumColor {
        &self.current
    }

    pub fn selectable(&self) -> SelectableFormats {
        self.selectable
    }

    /// The fallback hex for any input that fails validation. Only ever
    /// assigned from successfully-validated hex strings.
    pub fn last_valid_color(&self) -> &str {
        &self.last_valid_color
    }

    /// Hue of the last non-achromatic color, in degrees. Monochrome colors
    /// consult this instead of supplying their own (undefined) hue.
    pub fn latest_valid_hue(&self) -> f64 {
        self.latest_valid_hue
    }

    /// Replace `current` wholesale with the host-supplied color.
    ///
    /// A missing `selectable_override` defaults to all formats. The active
    /// format is always widened into the selectable set, and a committed
    /// hex value refreshes `last_valid_color`.
    pub fn on_external_color_update(
        &mut self,
        new_color: SpectrumColor,
        selectable_override: Option<SelectableFormats>,
    ) {
        trace!("external color update: {new_color:?}");
        self.selectable = selectable_override.unwrap_or_default();
        self.selectable.insert(new_color.format());
        if color::is_valid_hex_color(&new_color) {
            if let SpectrumColor::Hex(raw) = &new_color {
                self.last_valid_color = if raw.starts_with('#') {
                    raw.clone()
                } else {
                    format!("#{raw}")
                };
            }
        }
        self.current = new_color;
    }

    /// The HSV form of the current color.
    ///
    /// When an override is set (mid-drag, to avoid re-deriving through a
    /// lossy round trip) it comes back verbatim. Otherwise HSV is derived
    /// from `current` and rounded: hue to the nearest whole degree, `s` and
    /// `v` to two decimal places on the 0–100 scale. Integer hue avoids
    /// visible banding in the hue gradient while sub-integer s/v keeps the
    /// knob position smooth. An achromatic result takes its hue from
    /// `latest_valid_hue` rather than surfacing 0.
    pub fn get_hsv(&self) -> Hsv {
        if let Some(hsv) = self.hsv_override {
            return hsv;
        }
        let derived = color::color_to_hsv(&self.current, &self.last_valid_color);
        let h = if derived.is_monochrome() {
            debug!(
                "achromatic color, substituting hue {}",
                self.latest_valid_hue
            );
            self.latest_valid_hue
        } else {
            derived.h.round()
        };
        Hsv::new(h, round_percent(derived.s), round_percent(derived.v))
    }

    /// Remember the hue of a freshly computed color, but only when it
    /// actually carries one (saturation above zero).
    pub fn record_hue_if_chromatic(&mut self, hsv: &Hsv) {
        if hsv.s > 0.0 {
            self.latest_valid_hue = hsv.h;
        }
    }

    /// Pin `get_hsv` to an exact value for the duration of a drag.
    pub fn set_hsv_override(&mut self, hsv: Hsv) {
        self.hsv_override = Some(hsv);
    }

    pub fn clear_hsv_override(&mut self) {
        self.hsv_override = None;
    }

    /// Convert the current color into `target`, using the state's own
    /// fallback memory for unparseable sources.
    pub fn convert_current(&self, target: ColorFormat) -> SpectrumColor {
        color::convert(&self.current, target, &self.last_valid_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ColorState::default();
        assert_eq!(state.current(), &SpectrumColor::Hex(String::new()));
        assert_eq!(state.last_valid_color(), "#000000");
        assert_eq!(state.latest_valid_hue(), 0.0);
        assert!(state.selectable().hex);
        assert!(state.selectable().rgba);
    }

    #[test]
    fn test_valid_hex_updates_last_valid() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#ff0000".into()), None);
        assert_eq!(state.last_valid_color(), "#ff0000");
        state.on_external_color_update(SpectrumColor::Hex("00ff00".into()), None);
        assert_eq!(state.last_valid_color(), "#00ff00");
    }

    #[test]
    fn test_typing_hex_keeps_last_valid() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#ff0000".into()), None);
        // 4 chars: a typing intermediate, stored verbatim but never promoted.
        state.on_external_color_update(SpectrumColor::Hex("ff00".into()), None);
        assert_eq!(state.current(), &SpectrumColor::Hex("ff00".into()));
        assert_eq!(state.last_valid_color(), "#ff0000");
    }

    #[test]
    fn test_rgba_keeps_last_valid() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#ff0000".into()), None);
        state.on_external_color_update(
            SpectrumColor::Rgba {
                r: 1,
                g: 2,
                b: 3,
                a: 1.0,
            },
            None,
        );
        assert_eq!(state.last_valid_color(), "#ff0000");
    }

    #[test]
    fn test_active_format_is_widened() {
        let mut state = ColorState::default();
        state.on_external_color_update(
            SpectrumColor::Hex("#ff0000".into()),
            Some(SelectableFormats {
                hex: false,
                rgba: true,
            }),
        );
        // The active format is always selectable.
        assert!(state.selectable().hex);
        assert!(state.selectable().rgba);
    }

    #[test]
    fn test_get_hsv_rounds() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#3b82f6".into()), None);
        let hsv = state.get_hsv();
        assert_eq!(hsv.h, hsv.h.round());
        assert_eq!(hsv.s, (hsv.s * 100.0).round() / 100.0);
        assert_eq!(hsv.v, (hsv.v * 100.0).round() / 100.0);
        assert_eq!(hsv.h, 217.0);
    }

    #[test]
    fn test_get_hsv_override_verbatim() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#ff0000".into()), None);
        let pinned = Hsv::new(359.6, 12.345, 67.891);
        state.set_hsv_override(pinned);
        assert_eq!(state.get_hsv(), pinned);
        state.clear_hsv_override();
        assert_ne!(state.get_hsv(), pinned);
    }

    #[test]
    fn test_achromatic_hue_substitution() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#00ff00".into()), None);
        state.record_hue_if_chromatic(&state.get_hsv());
        assert_eq!(state.latest_valid_hue(), 120.0);

        state.on_external_color_update(SpectrumColor::Hex("#808080".into()), None);
        let hsv = state.get_hsv();
        assert_eq!(hsv.s, 0.0);
        assert_eq!(hsv.h, 120.0);
    }

    #[test]
    fn test_record_hue_ignores_monochrome() {
        let mut state = ColorState::default();
        state.record_hue_if_chromatic(&Hsv::new(200.0, 50.0, 50.0));
        assert_eq!(state.latest_valid_hue(), 200.0);
        // A drag that lands at s = 0 must leave the hue memory untouched.
        state.record_hue_if_chromatic(&Hsv::new(0.0, 0.0, 80.0));
        assert_eq!(state.latest_valid_hue(), 200.0);
    }

    #[test]
    fn test_drag_to_top_left_yields_white() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#ff0000".into()), None);
        let hue = state.get_hsv().h;
        assert_eq!(hue, 0.0);
        let rect = crate::coords::SpectrumRect::new(0.0, 0.0, 200.0, 100.0);
        let hsv = crate::coords::pointer_to_color(0.0, 0.0, rect, hue);
        assert_eq!(hsv, Hsv::new(0.0, 0.0, 100.0));
        let white = color::hsv_to_color(&hsv, ColorFormat::Hex, 1.0);
        assert_eq!(white, SpectrumColor::Hex("#ffffff".into()));
    }

    #[test]
    fn test_convert_current_with_typing_value() {
        let mut state = ColorState::default();
        state.on_external_color_update(SpectrumColor::Hex("#102030".into()), None);
        state.on_external_color_update(SpectrumColor::Hex("ab".into()), None);
        // Typing intermediates never convert; the last valid color stands in.
        assert_eq!(
            state.convert_current(ColorFormat::Rgba),
            SpectrumColor::Rgba {
                r: 0x10,
                g: 0x20,
                b: 0x30,
                a: 1.0
            }
        );
    }
}
