//! # floem-spectrum
//!
//! A spectrum color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! Provides a 2D saturation/brightness spectrum, a hue slider, an optional
//! alpha slider, and direct hex/RGBA text entry, keeping the committed
//! color representations mutually consistent. Achromatic colors keep the
//! last interactively chosen hue, and half-typed hex values never escape
//! as invalid colors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_spectrum::{spectrum_picker, SpectrumColor};
//!
//! let color = RwSignal::new(SpectrumColor::Hex("#3b82f6".into()));
//! // Use `spectrum_picker(color)` in your Floem view tree.
//! ```

mod color;
mod coords;
mod format;
mod gesture;
mod hex_entry;
mod math;
mod state;

#[cfg(feature = "alpha")]
mod alpha_slider;
#[cfg(feature = "alpha")]
mod checkerboard;
mod constants;
mod editor;
mod hue_slider;
mod inputs;
mod spectrum;

pub use color::{
    color_to_hsv, convert, display_string, hsv_to_color, is_monochrome, ColorFormat, Hsv,
    SelectableFormats, SpectrumColor,
};
pub use coords::{pointer_to_color, spectrum_position, SpectrumAxis, SpectrumRect};
pub use editor::PickerOptions;
pub use format::cycle_format;
pub use gesture::{GestureConfig, GestureEvent, GestureHandle, GestureRegistry, PressKind, PressTracker};
pub use hex_entry::{is_committed_hex, is_typing_hex, normalize_typed_hex};
pub use state::ColorState;

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

fn load_icon_font() {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
}

/// Creates the color picker view with default options.
///
/// The picker reads from and writes to `color`. Any external change to the
/// signal is reflected in the UI, and each accepted user interaction
/// replaces the signal's value wholesale.
pub fn spectrum_picker(color: RwSignal<SpectrumColor>) -> impl IntoView {
    spectrum_picker_with(color, PickerOptions::default())
}

/// Creates the color picker view with explicit [`PickerOptions`]
/// (selectable formats, gesture policy, change/toggle callbacks).
pub fn spectrum_picker_with(
    color: RwSignal<SpectrumColor>,
    options: PickerOptions,
) -> impl IntoView {
    load_icon_font();
    editor::color_editor(color, options)
}
