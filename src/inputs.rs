//! Text-entry components: hex field, RGBA channel fields, alpha percentage,
//! and the copy / format-cycle buttons.

use std::rc::Rc;

use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::constants;
use crate::hex_entry;

/// A hex input field with typing-vs-committed semantics.
///
/// Every keystroke runs through [`hex_entry::normalize_typed_hex`]: invalid
/// edits are silently rejected in place, typing intermediates (0–6 digits)
/// are kept verbatim, and complete codes are canonicalized with a leading
/// `#`. The validated value is mirrored into `hex` on every edit, so the
/// host sees typing states as they happen. On Enter or focus-lost a value
/// that never became a complete code reverts to `revert_to()`.
pub(crate) fn hex_input(
    hex: RwSignal<String>,
    revert_to: impl Fn() -> String + Copy + 'static,
) -> impl IntoView {
    let text = RwSignal::new(hex.get_untracked());

    // External hex → text
    create_effect(move |_| {
        let val = hex.get();
        if text.get_untracked() != val {
            text.set(val);
        }
    });

    // Text edits → validated value, rejected edits restored in place
    create_effect(move |prev: Option<String>| {
        let raw = text.get();
        let previous = prev.unwrap_or_else(|| hex.get_untracked());
        let normalized = hex_entry::normalize_typed_hex(&raw, &previous);
        if normalized != raw {
            text.set(normalized.clone());
        }
        if hex.get_untracked() != normalized {
            hex.set(normalized.clone());
        }
        normalized
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        if !hex_entry::is_committed_hex(&raw) {
            let fallback = revert_to();
            if text.get_untracked() != fallback {
                text.set(fallback.clone());
            }
            if hex.get_untracked() != fallback {
                hex.set(fallback);
            }
        }
    };
    let on_commit_clone = on_commit;

    text_input(text)
        .style(|s| {
            s.width(constants::HEX_INPUT_WIDTH)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(3.0)
        })
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event_stop(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                {
                    on_commit_clone();
                }
            }
        })
}

/// A numeric channel input over a direct value range (e.g. 0–255).
///
/// An empty field commits as 0; anything unparseable resets to the current
/// value. Committed values are clamped to `[0, max]` and rounded.
pub(crate) fn channel_input(
    lbl: &'static str,
    signal: RwSignal<f64>,
    max: f64,
) -> impl IntoView {
    let text = RwSignal::new(format!("{}", signal.get_untracked().round() as i64));

    // Signal → text (external updates)
    create_effect(move |_| {
        let val = signal.get();
        let expected = format!("{}", val.round() as i64);
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let trimmed = raw.trim();
        // An empty field reads as zero, not as an error.
        let parsed = if trimmed.is_empty() {
            Some(0.0)
        } else {
            trimmed.parse::<f64>().ok()
        };
        if let Some(num) = parsed {
            let clamped = num.clamp(0.0, max).round();
            if clamped != signal.get_untracked().round() {
                signal.set(clamped);
            }
            let formatted = format!("{}", clamped as i64);
            if raw != formatted {
                text.set(formatted);
            }
        } else {
            let formatted = format!("{}", signal.get_untracked().round() as i64);
            if raw != formatted {
                text.set(formatted);
            }
        }
    };
    let on_commit_clone = on_commit;

    v_stack((
        text_input(text)
            .style(|s| {
                s.width(constants::INPUT_WIDTH)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if let floem::event::Event::KeyDown(ke) = e {
                    if ke.key.logical_key
                        == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                    {
                        on_commit_clone();
                        return EventPropagation::Stop;
                    }
                }
                EventPropagation::Continue
            }),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// An editable percentage input for alpha (0–100%).
///
/// The signal is normalized 0.0–1.0; the field shows whole percent. Empty
/// input commits as 0%.
#[cfg(feature = "alpha")]
pub(crate) fn alpha_input(signal: RwSignal<f64>) -> impl IntoView {
    let text = RwSignal::new(format!(
        "{}",
        (signal.get_untracked() * 100.0).round() as i64
    ));

    // Signal → text
    create_effect(move |_| {
        let val = signal.get();
        let display = format!("{}", (val * 100.0).round() as i64);
        if text.get_untracked() != display {
            text.set(display);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let trimmed = raw.trim();
        let parsed = if trimmed.is_empty() {
            Some(0.0)
        } else {
            trimmed.parse::<f64>().ok()
        };
        if let Some(num) = parsed {
            let clamped = num.clamp(0.0, 100.0);
            let new_display = clamped.round() as i64;
            let old_display = (signal.get_untracked() * 100.0).round() as i64;
            if new_display != old_display {
                signal.set(clamped / 100.0);
            }
            let formatted = format!("{}", new_display);
            if trimmed != formatted {
                text.set(formatted);
            }
        } else {
            let formatted = format!("{}", (signal.get_untracked() * 100.0).round() as i64);
            if raw != formatted {
                text.set(formatted);
            }
        }
    };
    let on_commit_clone = on_commit;

    h_stack((
        text_input(text)
            .style(|s| {
                s.width(28.0)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if let floem::event::Event::KeyDown(ke) = e {
                    if ke.key.logical_key
                        == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                    {
                        on_commit_clone();
                        return EventPropagation::Stop;
                    }
                }
                EventPropagation::Continue
            }),
        label(|| "%").style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
    ))
    .style(|s| s.items_center().gap(2.0))
}

fn icon_button(
    icon: lucide_icons::Icon,
    on_activate: impl Fn() + 'static,
) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(move || icon.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .align_self(Some(floem::taffy::AlignItems::Start))
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        on_activate();
    })
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    icon_button(lucide_icons::Icon::Copy, move || {
        copy_to_clipboard(&get_text());
    })
}

/// Steps the active color format on each tap.
pub(crate) fn cycle_button(on_cycle: Rc<dyn Fn()>) -> impl IntoView {
    icon_button(lucide_icons::Icon::Repeat, move || {
        on_cycle();
    })
}

fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}
