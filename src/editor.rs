//! Color editor: wires the color state manager to the spectrum surface, hue
//! and alpha sliders, and text inputs, and emits the host callbacks.
//!
//! The host-visible contract is a single loop: an accepted interaction
//! produces a new committed color (signal write + `on_color_change`), and
//! the updated color flows back in through the color signal on the next
//! cycle, where the state manager re-validates it.

use std::cell::Cell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::dyn_container;

#[cfg(feature = "alpha")]
use crate::alpha_slider::alpha_slider;
use crate::color::{self, ColorFormat, Hsv, SelectableFormats, SpectrumColor};
use crate::constants;
use crate::format;
use crate::gesture::GestureConfig;
use crate::hue_slider::hue_slider;
#[cfg(feature = "alpha")]
use crate::inputs::alpha_input;
use crate::inputs::{channel_input, copy_button, cycle_button, hex_input};
use crate::spectrum::spectrum_area;
use crate::state::ColorState;

/// Host-facing configuration for the picker.
pub struct PickerOptions {
    /// Formats the cycle button may land on. The active format is always
    /// kept selectable regardless.
    pub selectable: SelectableFormats,
    /// Gesture policy for the spectrum surface and the sliders.
    pub gesture: GestureConfig,
    /// Whether the panel starts expanded.
    pub shown: bool,
    /// Invoked once per accepted interaction with the new color. Pointer-
    /// and slider-driven changes also carry the exact HSV they were
    /// computed from, so the host can feed it back without a lossy round
    /// trip.
    pub on_color_change: Option<Rc<dyn Fn(&SpectrumColor, Option<Hsv>)>>,
    /// Invoked when the swatch trigger requests the panel be opened or
    /// closed.
    pub on_toggle: Option<Rc<dyn Fn(bool)>>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            selectable: SelectableFormats::default(),
            gesture: GestureConfig::default(),
            shown: true,
            on_color_change: None,
            on_toggle: None,
        }
    }
}

/// Creates the color editor around a host-owned color signal.
pub(crate) fn color_editor(
    color: RwSignal<SpectrumColor>,
    options: PickerOptions,
) -> impl IntoView {
    let PickerOptions {
        selectable,
        gesture,
        shown: shown_initially,
        on_color_change,
        on_toggle,
    } = options;

    let state = RwSignal::new(ColorState::default());
    state.update(|st| st.on_external_color_update(color.get_untracked(), Some(selectable)));

    let initial = state.get_untracked();
    let hsv = RwSignal::new(initial.get_hsv());
    let alpha = RwSignal::new(color.get_untracked().alpha());
    let active_format = RwSignal::new(color.get_untracked().format());
    let hex_text = RwSignal::new(match color.get_untracked() {
        SpectrumColor::Hex(raw) => raw,
        rgba => match color::convert(&rgba, ColorFormat::Hex, initial.last_valid_color()) {
            SpectrumColor::Hex(raw) => raw,
            _ => String::new(),
        },
    });
    let (red, green, blue) = match initial.convert_current(ColorFormat::Rgba) {
        SpectrumColor::Rgba { r, g, b, .. } => (
            RwSignal::new(r as f64),
            RwSignal::new(g as f64),
            RwSignal::new(b as f64),
        ),
        _ => (
            RwSignal::new(0.0),
            RwSignal::new(0.0),
            RwSignal::new(0.0),
        ),
    };
    let shown = RwSignal::new(shown_initially);

    let notify: Rc<dyn Fn(&SpectrumColor, Option<Hsv>)> = Rc::new(move |c, value| {
        if let Some(cb) = &on_color_change {
            cb(c, value);
        }
    });

    // Non-reactive guard: true while an external color update is being
    // pushed into the interactive signals, so the interaction effects below
    // don't re-emit what just came in.
    let sync_guard = Rc::new(Cell::new(false));

    // External color → state + interactive signals
    {
        let guard = sync_guard.clone();
        create_effect(move |prev: Option<SpectrumColor>| {
            let c = color.get();
            if prev.as_ref() == Some(&c) {
                return c;
            }
            state.update(|st| st.on_external_color_update(c.clone(), Some(selectable)));

            guard.set(true);
            let emitted =
                color::hsv_to_color(&hsv.get_untracked(), c.format(), alpha.get_untracked());
            if emitted == c {
                // Our own emission coming back: keep the interactive HSV
                // verbatim instead of re-deriving through a lossy round trip.
                let pinned = hsv.get_untracked();
                state.update(|st| st.set_hsv_override(pinned));
            } else {
                state.update(|st| st.clear_hsv_override());
                let derived = state.get_untracked().get_hsv();
                if hsv.get_untracked() != derived {
                    hsv.set(derived);
                }
            }
            if let SpectrumColor::Rgba { a, .. } = &c {
                if (alpha.get_untracked() - *a).abs() > 1e-9 {
                    alpha.set(*a);
                }
            }
            if active_format.get_untracked() != c.format() {
                active_format.set(c.format());
            }
            if let SpectrumColor::Hex(raw) = &c {
                if hex_text.get_untracked() != *raw {
                    hex_text.set(raw.clone());
                }
            }
            if let SpectrumColor::Rgba { r, g, b, .. } =
                state.get_untracked().convert_current(ColorFormat::Rgba)
            {
                if red.get_untracked().round() as u8 != r {
                    red.set(r as f64);
                }
                if green.get_untracked().round() as u8 != g {
                    green.set(g as f64);
                }
                if blue.get_untracked().round() as u8 != b {
                    blue.set(b as f64);
                }
            }
            guard.set(false);
            c
        });
    }

    // Pointer/slider-driven HSV or alpha change → new committed color
    {
        let notify = notify.clone();
        let guard = sync_guard.clone();
        create_effect(move |prev: Option<Hsv>| {
            let value = hsv.get();
            let a = alpha.get();
            if prev.is_none() || guard.get() {
                return value;
            }
            state.update(|st| {
                st.record_hue_if_chromatic(&value);
                st.set_hsv_override(value);
            });
            let fmt = active_format.get_untracked();
            let new_color = color::hsv_to_color(&value, fmt, a);
            let current = color.get_untracked();
            let fallback = state.get_untracked().last_valid_color().to_string();
            let changed = color::convert(&current, ColorFormat::Rgba, &fallback)
                != color::convert(&new_color, ColorFormat::Rgba, &fallback);
            if changed {
                color.set(new_color.clone());
                notify(&new_color, Some(value));
            }
            value
        });
    }

    // RGBA channel edits → new committed color
    {
        let notify = notify.clone();
        let guard = sync_guard.clone();
        create_effect(move |prev: Option<(f64, f64, f64)>| {
            let channels = (red.get(), green.get(), blue.get());
            if prev.is_none() || guard.get() {
                return channels;
            }
            if active_format.get_untracked() != ColorFormat::Rgba {
                return channels;
            }
            let (r, g, b) = channels;
            let new_color = SpectrumColor::Rgba {
                r: r.round() as u8,
                g: g.round() as u8,
                b: b.round() as u8,
                a: alpha.get_untracked(),
            };
            if color.get_untracked() != new_color {
                state.update(|st| st.clear_hsv_override());
                color.set(new_color.clone());
                notify(&new_color, None);
            }
            channels
        });
    }

    // Hex field edits → new committed color (typing states included)
    {
        let notify = notify.clone();
        let guard = sync_guard.clone();
        create_effect(move |prev: Option<String>| {
            let raw = hex_text.get();
            if prev.is_none() || guard.get() {
                return raw;
            }
            if active_format.get_untracked() != ColorFormat::Hex {
                return raw;
            }
            let new_color = SpectrumColor::Hex(raw.clone());
            if color.get_untracked() != new_color {
                state.update(|st| st.clear_hsv_override());
                color.set(new_color.clone());
                notify(&new_color, None);
            }
            raw
        });
    }

    let on_cycle: Rc<dyn Fn()> = {
        let notify = notify.clone();
        Rc::new(move || {
            let st = state.get_untracked();
            let new_color =
                format::cycle_format(st.current(), st.selectable(), st.last_valid_color());
            if *st.current() != new_color {
                active_format.set(new_color.format());
                color.set(new_color.clone());
                notify(&new_color, None);
            }
        })
    };

    // Swatch trigger: tap to open/close the panel
    let trigger = h_stack((
        empty().style(move |st| {
            let c = color.get();
            let fb = state.get();
            let (r, g, b, a) =
                match color::convert(&c, ColorFormat::Rgba, fb.last_valid_color()) {
                    SpectrumColor::Rgba { r, g, b, a } => (r, g, b, a),
                    _ => (0, 0, 0, 1.0),
                };
            st.width(24.0)
                .height(24.0)
                .border_radius(constants::RADIUS)
                .border(1.0)
                .border_color(Color::rgb8(180, 180, 180))
                .background(Color::rgba8(r, g, b, (a * 255.0).round() as u8))
        }),
        label(move || color::display_string(&color.get())).style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .color(Color::rgb8(80, 80, 80))
        }),
    ))
    .style(|st| st.gap(constants::GAP).items_center())
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        let next = !shown.get_untracked();
        shown.set(next);
        if let Some(cb) = &on_toggle {
            cb(next);
        }
    });

    let revert_hex = move || state.get_untracked().last_valid_color().to_string();

    let build_panel = {
        let on_cycle = on_cycle.clone();
        move || {
            let on_cycle = on_cycle.clone();
            v_stack((
                spectrum_area(hsv, gesture),
                hue_slider(hsv, gesture),
                #[cfg(feature = "alpha")]
                h_stack((
                    alpha_slider(alpha, hsv, gesture).style(|s| s.flex_grow(1.0)),
                    alpha_input(alpha),
                ))
                .style(|s| s.gap(4.0).items_center()),
                dyn_container(
                    move || active_format.get(),
                    move |fmt| match fmt {
                        ColorFormat::Hex => {
                            let oc = on_cycle.clone();
                            h_stack((
                                hex_input(hex_text, revert_hex),
                                copy_button(move || hex_text.get()),
                                cycle_button(oc),
                            ))
                            .style(|st| st.gap(constants::GAP / 2.0).items_center())
                            .into_any()
                        }
                        ColorFormat::Rgba => {
                            let oc = on_cycle.clone();
                            h_stack((
                                channel_input("R", red, 255.0),
                                channel_input("G", green, 255.0),
                                channel_input("B", blue, 255.0),
                                copy_button(move || {
                                    format!(
                                        "{}, {}, {}",
                                        red.get().round() as i64,
                                        green.get().round() as i64,
                                        blue.get().round() as i64,
                                    )
                                }),
                                cycle_button(oc),
                            ))
                            .style(|st| st.gap(constants::GAP / 2.0).items_center())
                            .into_any()
                        }
                    },
                ),
            ))
            .style(|st| st.gap(constants::GAP))
            .into_any()
        }
    };

    v_stack((
        trigger,
        dyn_container(
            move || shown.get(),
            move |is_shown| {
                if is_shown {
                    build_panel()
                } else {
                    empty().into_any()
                }
            },
        ),
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding(constants::PADDING)
            .background(Color::rgb8(242, 242, 242))
    })
}
