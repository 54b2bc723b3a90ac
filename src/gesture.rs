//! Gesture binding boundary: normalizes a press into tap-vs-drag and owns
//! listener bookkeeping through opaque handles.
//!
//! The color engine never touches listener lifetime itself: a bound handler
//! is represented by a [`GestureHandle`] returned at bind time and revoked
//! exactly once at unbind time. The handle→handler map lives here.

use std::collections::HashMap;

use log::trace;

use crate::constants;

/// Gesture policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Pixel distance a press may travel before it stops being a tap.
    pub drag_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: constants::DRAG_THRESHOLD,
        }
    }
}

/// Uniform pointer events carrying page coordinates, as delivered by the
/// host's event source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
}

/// What a finished press turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    Drag,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin_x: f64,
    origin_y: f64,
    dragging: bool,
}

/// Classifies a single press into tap or drag.
///
/// Events are consumed strictly in down → move* → up order; each move is
/// processed synchronously before the next is accepted. A release anywhere
/// — including outside the originating surface — still finishes the press,
/// so no gesture is silently dropped.
#[derive(Debug, Default)]
pub struct PressTracker {
    config: GestureConfig,
    press: Option<Press>,
}

impl PressTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// True once the current press has traveled past the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.press.map(|p| p.dragging).unwrap_or(false)
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.press = Some(Press {
            origin_x: x,
            origin_y: y,
            dragging: false,
        });
    }

    /// Feed a move. Returns true while a press is active (the caller should
    /// recompute and emit a color), false for hover moves.
    pub fn update(&mut self, x: f64, y: f64) -> bool {
        let threshold = self.config.drag_threshold;
        match &mut self.press {
            Some(press) => {
                let dx = x - press.origin_x;
                let dy = y - press.origin_y;
                if !press.dragging && (dx * dx + dy * dy).sqrt() > threshold {
                    press.dragging = true;
                }
                true
            }
            None => false,
        }
    }

    /// Finish the press. Returns what it was, or `None` if no press was
    /// active (a stray up event).
    pub fn finish(&mut self, x: f64, y: f64) -> Option<PressKind> {
        self.update(x, y);
        let press = self.press.take()?;
        Some(if press.dragging {
            PressKind::Drag
        } else {
            PressKind::Tap
        })
    }

    /// Abandon the press without classifying it (focus loss).
    pub fn cancel(&mut self) {
        self.press = None;
    }
}

/// Opaque ownership token for a bound gesture handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureHandle(u64);

/// Owns the mapping from handle to handler.
///
/// Binding returns a fresh handle; unbinding revokes it exactly once —
/// a second unbind with the same handle is a no-op that reports `false`.
#[derive(Default)]
pub struct GestureRegistry {
    next_handle: u64,
    bindings: HashMap<GestureHandle, Box<dyn FnMut(GestureEvent)>>,
}

impl GestureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, handler: impl FnMut(GestureEvent) + 'static) -> GestureHandle {
        let handle = GestureHandle(self.next_handle);
        self.next_handle += 1;
        self.bindings.insert(handle, Box::new(handler));
        trace!("bound gesture handler {handle:?}");
        handle
    }

    /// Remove a binding. Returns whether one was actually removed.
    pub fn unbind(&mut self, handle: GestureHandle) -> bool {
        let removed = self.bindings.remove(&handle).is_some();
        trace!("unbound gesture handler {handle:?} (removed: {removed})");
        removed
    }

    /// Deliver an event to the handler behind `handle`, if still bound.
    pub fn dispatch(&mut self, handle: GestureHandle, event: GestureEvent) -> bool {
        match self.bindings.get_mut(&handle) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_short_press_is_tap() {
        let mut tracker = PressTracker::new(GestureConfig::default());
        tracker.begin(100.0, 100.0);
        tracker.update(104.0, 103.0);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.finish(104.0, 103.0), Some(PressKind::Tap));
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_press_past_threshold_is_drag() {
        let mut tracker = PressTracker::new(GestureConfig::default());
        tracker.begin(100.0, 100.0);
        tracker.update(100.0, 111.0);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.finish(100.0, 111.0), Some(PressKind::Drag));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold the press is still a tap.
        let mut tracker = PressTracker::new(GestureConfig {
            drag_threshold: 10.0,
        });
        tracker.begin(0.0, 0.0);
        tracker.update(10.0, 0.0);
        assert!(!tracker.is_dragging());
        tracker.update(10.1, 0.0);
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_drag_sticks_after_return_to_origin() {
        let mut tracker = PressTracker::new(GestureConfig::default());
        tracker.begin(0.0, 0.0);
        tracker.update(50.0, 0.0);
        tracker.update(0.0, 0.0);
        assert_eq!(tracker.finish(0.0, 0.0), Some(PressKind::Drag));
    }

    #[test]
    fn test_hover_moves_are_ignored() {
        let mut tracker = PressTracker::new(GestureConfig::default());
        assert!(!tracker.update(10.0, 10.0));
        assert_eq!(tracker.finish(10.0, 10.0), None);
    }

    #[test]
    fn test_configurable_threshold() {
        let mut tracker = PressTracker::new(GestureConfig { drag_threshold: 2.0 });
        tracker.begin(0.0, 0.0);
        tracker.update(3.0, 0.0);
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_registry_unbinds_exactly_once() {
        let mut registry = GestureRegistry::new();
        let handle = registry.bind(|_| {});
        assert_eq!(registry.len(), 1);
        assert!(registry.unbind(handle));
        assert!(!registry.unbind(handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut registry = GestureRegistry::new();
        let handle = registry.bind(move |ev| sink.borrow_mut().push(ev));

        assert!(registry.dispatch(handle, GestureEvent::PointerDown { x: 1.0, y: 2.0 }));
        assert!(registry.dispatch(handle, GestureEvent::PointerUp { x: 1.0, y: 2.0 }));
        assert_eq!(seen.borrow().len(), 2);

        registry.unbind(handle);
        assert!(!registry.dispatch(handle, GestureEvent::PointerMove { x: 0.0, y: 0.0 }));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_handles_stay_unique() {
        let mut registry = GestureRegistry::new();
        let a = registry.bind(|_| {});
        let b = registry.bind(|_| {});
        assert_ne!(a, b);
        registry.unbind(a);
        let c = registry.bind(|_| {});
        assert_ne!(b, c);
    }
}
