//! 2D saturation/brightness spectrum surface.
//!
//! The surface is two layered gradients over the same rect: white → the
//! fully-saturated, fully-bright hue color horizontally, then transparent
//! black → opaque black vertically, composited source-over. Only a hue
//! change alters the gradients; saturation/brightness changes just move
//! the knob.

use floem::kurbo::{Circle, Rect, Shape};
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
use crate::coords::{self, SpectrumAxis, SpectrumRect};
use crate::gesture::{GestureConfig, PressTracker};
use crate::math;

enum SpectrumUpdate {
    Value(Hsv),
}

pub(crate) struct SpectrumArea {
    id: ViewId,
    tracker: PressTracker,
    hsv: Hsv,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(Hsv)>>,
}

/// Creates the 2D spectrum surface.
///
/// Reads hue from `hsv` and writes the pointer-derived saturation and
/// brightness back into it; hue is never changed by surface interaction.
pub(crate) fn spectrum_area(hsv: RwSignal<Hsv>, gesture: GestureConfig) -> SpectrumArea {
    let id = ViewId::new();

    create_effect(move |_| {
        let value = hsv.get();
        id.update_state(SpectrumUpdate::Value(value));
    });

    SpectrumArea {
        id,
        tracker: PressTracker::new(gesture),
        hsv: hsv.get_untracked(),
        size: Default::default(),
        on_change: Some(Box::new(move |value| {
            hsv.set(value);
        })),
    }
    .style(|s| {
        s.height(constants::SPECTRUM_HEIGHT)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl SpectrumArea {
    fn local_rect(&self) -> SpectrumRect {
        SpectrumRect::new(0.0, 0.0, self.size.width as f64, self.size.height as f64)
    }

    fn update_from_pointer(&mut self, x: f64, y: f64) {
        self.hsv = coords::pointer_to_color(x, y, self.local_rect(), self.hsv.h);
    }

    fn knob_position(&self) -> (f64, f64) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        let x = coords::spectrum_position(&self.hsv, SpectrumAxis::Saturation) / 100.0 * w;
        let y = coords::spectrum_position(&self.hsv, SpectrumAxis::Brightness) / 100.0 * h;
        (x, y)
    }

    fn emit(&self) {
        if let Some(cb) = &self.on_change {
            cb(self.hsv);
        }
    }
}

impl View for SpectrumArea {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<SpectrumUpdate>() {
            let SpectrumUpdate::Value(value) = *update;
            self.hsv = value;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.tracker.begin(e.pos.x, e.pos.y);
                self.update_from_pointer(e.pos.x, e.pos.y);
                self.emit();
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.tracker.update(e.pos.x, e.pos.y) {
                    self.update_from_pointer(e.pos.x, e.pos.y);
                    self.emit();
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                // A release outside the surface still clamps and emits.
                if self.tracker.finish(e.pos.x, e.pos.y).is_some() {
                    self.update_from_pointer(e.pos.x, e.pos.y);
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
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);

        // Convert to BezPath so the vello renderer uses the general path
        // handler (its Rect fast-path only supports solid colors).
        let path = rect.to_path(0.1);

        // White (left) → fully-saturated, fully-bright hue (right)
        let (r, g, b) = math::hsv_to_rgb(self.hsv.h / 360.0, 1.0, 1.0);
        let hue_color = Color::rgba(r, g, b, 1.0);
        let horizontal = Gradient::new_linear((0.0, h / 2.0), (w, h / 2.0))
            .with_stops([Color::WHITE, hue_color]);
        cx.fill(&path, &horizontal, 0.0);

        // Transparent black (top) → opaque black (bottom), source-over
        let vertical = Gradient::new_linear((w / 2.0, 0.0), (w / 2.0, h))
            .with_stops([Color::rgba(0.0, 0.0, 0.0, 0.0), Color::rgba(0.0, 0.0, 0.0, 1.0)]);
        cx.fill(&path, &vertical, 0.0);

        cx.restore();

        // Surface outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Knob
        let (knob_x, knob_y) = self.knob_position();
        let knob_pt = floem::kurbo::Point::new(knob_x, knob_y);
        let outer = Circle::new(knob_pt, constants::KNOB_RADIUS + 1.0);
        cx.stroke(
            &outer,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let ring = Circle::new(knob_pt, constants::KNOB_RADIUS);
        cx.stroke(&ring, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let inner = Circle::new(knob_pt, constants::KNOB_RADIUS - 1.5);
        cx.stroke(
            &inner,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
