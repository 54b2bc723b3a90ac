//! Hue slider (0–360 degrees).
//!
//! The track is a seven-stop gradient through the fully-saturated hues;
//! it is static, so no rasterization or caching is needed.

use floem::kurbo::{Rect, Shape};
use floem::peniko::{Color, Gradient};

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsv;
use crate::constants;
use crate::gesture::{GestureConfig, PressTracker};

enum HueUpdate {
    Value(f64),
}

pub(crate) struct HueSlider {
    id: ViewId,
    tracker: PressTracker,
    hue: f64,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(f64)>>,
}

/// Creates a horizontal hue slider.
///
/// Reads `hsv.h` and writes a new hue back on drag, leaving saturation and
/// brightness untouched.
pub(crate) fn hue_slider(hsv: RwSignal<Hsv>, gesture: GestureConfig) -> HueSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        let h = hsv.get().h;
        id.update_state(HueUpdate::Value(h));
    });

    HueSlider {
        id,
        tracker: PressTracker::new(gesture),
        hue: hsv.get_untracked().h,
        size: Default::default(),
        on_change: Some(Box::new(move |h| {
            hsv.update(|value| value.h = h);
        })),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl HueSlider {
    fn update_from_pointer(&mut self, x: f64) {
        let w = self.size.width as f64;
        let r = constants::THUMB_RADIUS;
        let usable = w - 2.0 * r;
        if usable > 0.0 {
            self.hue = ((x - r) / usable).clamp(0.0, 1.0) * 360.0;
        }
    }

    fn emit(&self) {
        if let Some(cb) = &self.on_change {
            cb(self.hue);
        }
    }
}

impl View for HueSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<HueUpdate>() {
            let HueUpdate::Value(h) = *update;
            self.hue = h;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.tracker.begin(e.pos.x, e.pos.y);
                self.update_from_pointer(e.pos.x);
                self.emit();
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.tracker.update(e.pos.x, e.pos.y) {
                    self.update_from_pointer(e.pos.x);
                    self.emit();
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                if self.tracker.finish(e.pos.x, e.pos.y).is_some() {
                    self.update_from_pointer(e.pos.x);
                    self.emit();
                    self.id.request_layout();
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.tracker.cancel();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);

        // Full hue ramp, red back to red
        let ramp = Gradient::new_linear((0.0, h / 2.0), (w, h / 2.0)).with_stops([
            Color::rgb8(255, 0, 0),
            Color::rgb8(255, 255, 0),
            Color::rgb8(0, 255, 0),
            Color::rgb8(0, 255, 255),
            Color::rgb8(0, 0, 255),
            Color::rgb8(255, 0, 255),
            Color::rgb8(255, 0, 0),
        ]);
        // BezPath for the same vello Rect fast-path reason as the other tracks
        let path = rect.to_path(0.1);
        cx.fill(&path, &ramp, 0.0);
        cx.restore();

        // Slider outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb (circular ring; left = 0°, right = 360°)
        let radius = constants::THUMB_RADIUS;
        let thumb_x = radius + (self.hue / 360.0).clamp(0.0, 1.0) * (w - 2.0 * radius);
        let thumb_cy = h / 2.0;
        let circle = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius);
        cx.stroke(
            &circle,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let inner = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius - 1.5);
        cx.stroke(&inner, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let innermost = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius - 3.0);
        cx.stroke(
            &innermost,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
