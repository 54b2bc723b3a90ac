//! Standalone demo: opens a window with the spectrum color picker.

use std::rc::Rc;

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_spectrum::{spectrum_picker_with, SpectrumColor, PickerOptions};

fn main() {
    env_logger::init();

    let color = RwSignal::new(SpectrumColor::Hex("#3b82f6".into()));

    floem::Application::new()
        .window(
            move |_| {
                let options = PickerOptions {
                    on_color_change: Some(Rc::new(|c, hsv| {
                        log::info!("color changed: {c:?} (hsv: {hsv:?})");
                    })),
                    ..Default::default()
                };
                spectrum_picker_with(color, options).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((232.0, 420.0))
                    .title("floem-spectrum"),
            ),
        )
        .run();
}
