//! Gesture classification and dispatch for one item.
//!
//! A gesture is press → moves → release. The host calls
//! [`GestureClassifier::begin`] on press, which returns a [`GestureSession`]
//! that carries everything transient about that gesture; the session is
//! passed back into [`GestureClassifier::update`] for each move and consumed
//! by [`GestureClassifier::end`] on release.
//!
//! Move frames are routed by `(zoom status, active touches)`:
//!
//! | status | touches | action                                   |
//! |--------|---------|------------------------------------------|
//! | any    | 2       | pinch (zoom unless the frame rebaselines) |
//! | Normal | 1       | swipe navigation                         |
//! | Zoom   | 1       | pan within the item                      |

use crate::clock::Clock;
use crate::constants::MOVEMENT_THRESHOLD;
use crate::effects::{Effect, ScaleTarget};
use crate::events::{GestureDelta, TouchEvent};
use crate::geometry::ViewportSize;
use crate::pinch::{PinchTracker, PinchUpdate};
use crate::swipe::{SwipeMode, SwipeNavigator, SwipeSession};
use crate::tap::TapTimer;
use crate::zoom::{Transform, ZoomPanController, ZoomPanState, ZoomStatus};

/// Transient state of one press-to-release gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    /// Item the gesture started on. Navigation steps are relative to it, so
    /// a drag that keeps moving after the list pages does not cascade.
    pub origin_index: usize,
    /// The press completed a double tap; the rest of the gesture is ignored.
    pub double_tap: bool,
    /// The viewer has taken the gesture from the surrounding container.
    pub claimed: bool,
    /// At least one move had two active touches.
    pub saw_pinch: bool,
    /// Active touches on the previous frame of this gesture.
    pub last_touches: usize,
    pub swipe: Option<SwipeSession>,
}

/// Whether a move is decisive enough for the viewer to take the gesture.
pub fn claims_move(delta: &GestureDelta) -> bool {
    delta.dx.abs() > MOVEMENT_THRESHOLD
        || delta.dy.abs() > MOVEMENT_THRESHOLD
        || delta.is_pinch()
}

pub struct GestureClassifier<C: Clock> {
    clock: C,
    item_index: usize,
    controller: ZoomPanController,
    tap: TapTimer,
    pinch: PinchTracker,
    swipe: SwipeNavigator,
}

impl<C: Clock> GestureClassifier<C> {
    /// Fresh, unzoomed classifier for the item at `item_index`.
    pub fn new(
        clock: C,
        viewport: ViewportSize,
        item_index: usize,
        item_count: usize,
        mode: SwipeMode,
    ) -> Self {
        let now = clock.now();
        Self {
            clock,
            item_index,
            controller: ZoomPanController::new(viewport),
            tap: TapTimer::new(now),
            pinch: PinchTracker::new(viewport, now),
            swipe: SwipeNavigator::new(mode, item_count, viewport.width),
        }
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn state(&self) -> &ZoomPanState {
        self.controller.state()
    }

    pub fn transform(&self) -> Transform {
        self.controller.transform()
    }

    pub fn pinch(&self) -> &PinchTracker {
        &self.pinch
    }

    /// Press. Runs double-tap detection and opens a session.
    pub fn begin(&mut self, event: &TouchEvent) -> (GestureSession, Option<Effect>) {
        let mut session = GestureSession {
            origin_index: self.item_index,
            double_tap: false,
            claimed: false,
            saw_pinch: false,
            last_touches: event.touches.len(),
            swipe: None,
        };

        if !self.tap.record_and_classify(event.timestamp) {
            return (session, None);
        }
        let Some(location) = event.first() else {
            tracing::debug!("double tap without a contact point");
            return (session, None);
        };

        session.double_tap = true;
        session.claimed = true;
        let target = self.controller.double_tap(location);
        (session, Some(self.after_commit(target)))
    }

    /// Move. Returns the effect the frame produced, if any.
    pub fn update(
        &mut self,
        session: &mut GestureSession,
        event: &TouchEvent,
        delta: GestureDelta,
    ) -> Option<Effect> {
        if session.double_tap {
            return None;
        }

        let second_finger_down = session.last_touches == 1 && delta.active_touches == 2;
        session.last_touches = delta.active_touches;

        if self.swipe.mode() == SwipeMode::ReleaseThreshold
            && delta.active_touches == 1
            && session.swipe.is_none()
        {
            session.swipe = event.first().map(|start| SwipeSession { start });
        }

        if !session.claimed {
            if !claims_move(&delta) {
                tracing::trace!(dx = delta.dx, dy = delta.dy, "move yielded to container");
                return None;
            }
            session.claimed = true;
        }

        let status = self.controller.state().status;
        match (status, delta.active_touches) {
            (_, 2) => {
                session.saw_pinch = true;
                if second_finger_down {
                    self.pinch.restart();
                }
                self.on_pinch(event)
            }
            (ZoomStatus::Normal, 1) => {
                let cooled = self.pinch.cooldown_elapsed(self.clock.now());
                self.swipe
                    .on_single_finger_move(delta.dx, status, session.origin_index, cooled)
                    .map(Effect::from)
            }
            (ZoomStatus::Zoom, 1) => {
                let target = self.controller.pan_move(delta.dx, delta.dy)?;
                Some(self.after_commit(target))
            }
            (_, touches) => {
                tracing::trace!(touches, "move with unsupported touch count");
                None
            }
        }
    }

    /// Release. Consumes the session.
    pub fn end(
        &mut self,
        session: GestureSession,
        event: &TouchEvent,
        delta: GestureDelta,
    ) -> Option<Effect> {
        if session.saw_pinch || delta.is_pinch() {
            tracing::debug!("pinch released");
            self.pinch.release();
            return None;
        }
        if session.double_tap {
            return None;
        }

        let release_at = event.first()?;
        self.swipe
            .on_release(
                session.swipe,
                release_at,
                self.controller.state().status,
                session.origin_index,
            )
            .map(Effect::from)
    }

    fn on_pinch(&mut self, event: &TouchEvent) -> Option<Effect> {
        let Some(touches) = event.first_pair() else {
            tracing::debug!("pinch frame with fewer than two contacts");
            return None;
        };
        let zoom_level = self.controller.state().zoom_level;
        match self.pinch.update(touches, self.clock.now(), zoom_level) {
            PinchUpdate::Rebaselined => None,
            PinchUpdate::Ratio(ratio) => {
                let anchor = self.pinch.anchor();
                let target = self.controller.pinch_update_at(ratio, anchor);
                Some(self.after_commit(target))
            }
        }
    }

    fn after_commit(&mut self, target: ScaleTarget) -> Effect {
        self.pinch.sync_center(self.controller.state().center);
        Effect::AnimateScale(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, Timestamp};
    use crate::effects::NavigationRequest;
    use crate::events::TouchPoint;

    const VIEWPORT: ViewportSize = ViewportSize::new(375.0, 667.0);

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    fn classifier(clock: &ManualClock, mode: SwipeMode) -> GestureClassifier<ManualClock> {
        GestureClassifier::new(clock.clone(), VIEWPORT, 2, 6, mode)
    }

    #[test]
    fn test_claims_move_threshold() {
        assert!(!claims_move(&GestureDelta::new(5.0, -5.0, 1)));
        assert!(claims_move(&GestureDelta::new(5.1, 0.0, 1)));
        assert!(claims_move(&GestureDelta::new(0.0, -6.0, 1)));
        assert!(claims_move(&GestureDelta::new(0.0, 0.0, 2)));
    }

    #[test]
    fn test_small_moves_are_yielded() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (mut session, effect) = gc.begin(&TouchEvent::single(ms(1_000), 100.0, 100.0));
        assert!(effect.is_none());
        let ev = TouchEvent::single(ms(1_010), 103.0, 100.0);
        assert_eq!(gc.update(&mut session, &ev, GestureDelta::new(3.0, 0.0, 1)), None);
        assert!(!session.claimed);

        let ev = TouchEvent::single(ms(1_020), 60.0, 100.0);
        let effect = gc.update(&mut session, &ev, GestureDelta::new(-40.0, 0.0, 1));
        assert!(session.claimed);
        assert_eq!(
            effect,
            Some(Effect::Navigate(NavigationRequest { target_index: 3 }))
        );
    }

    #[test]
    fn test_swipe_suppressed_right_after_activation() {
        let clock = ManualClock::new(ms(1_000));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_200));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_400), 100.0, 100.0));
        let ev = TouchEvent::single(ms(1_210), 150.0, 100.0);
        assert_eq!(gc.update(&mut session, &ev, GestureDelta::new(50.0, 0.0, 1)), None);
    }

    #[test]
    fn test_double_tap_short_circuits_gesture() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (first, _) = gc.begin(&TouchEvent::single(ms(1_000), 100.0, 200.0));
        gc.end(first, &TouchEvent::single(ms(1_050), 100.0, 200.0), GestureDelta::default());

        let (mut second, effect) = gc.begin(&TouchEvent::single(ms(1_150), 100.0, 200.0));
        assert!(second.double_tap);
        assert!(matches!(effect, Some(Effect::AnimateScale(_))));
        assert_eq!(gc.state().status, ZoomStatus::Zoom);

        let ev = TouchEvent::single(ms(1_200), 50.0, 200.0);
        assert_eq!(gc.update(&mut second, &ev, GestureDelta::new(-50.0, 0.0, 1)), None);
        assert_eq!(gc.state().zoom_level, 1.3);
    }

    #[test]
    fn test_pinch_dead_frame_then_zoom() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_000), 150.0, 300.0));

        let a = TouchPoint::new(150.0, 300.0);
        let b = TouchPoint::new(250.0, 300.0);
        let first = gc.update(
            &mut session,
            &TouchEvent::pair(ms(1_000), a, b),
            GestureDelta::new(0.0, 0.0, 2),
        );
        assert_eq!(first, None);
        assert_eq!(gc.state().zoom_level, 1.0);

        clock.set(ms(1_100));
        let spread = TouchPoint::new(350.0, 300.0);
        let second = gc.update(
            &mut session,
            &TouchEvent::pair(ms(1_100), a, spread),
            GestureDelta::new(0.0, 0.0, 2),
        );
        // (200 + 150) / (100 + 150)
        let expected = 350.0 / 250.0;
        assert!((gc.state().zoom_level - expected).abs() < 1e-5);
        assert!(
            matches!(second, Some(Effect::AnimateScale(t)) if (t.scale - expected).abs() < 1e-5)
        );

        gc.end(
            session,
            &TouchEvent::pair(ms(1_150), a, spread),
            GestureDelta::new(0.0, 0.0, 2),
        );
        assert_eq!(gc.pinch().baseline().timestamp, Timestamp::ZERO);
    }

    #[test]
    fn test_second_finger_landing_again_starts_a_fresh_pinch() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_000), 150.0, 300.0));
        let pinch = GestureDelta::new(0.0, 0.0, 2);

        let a = TouchPoint::new(150.0, 300.0);
        let near = TouchEvent::pair(ms(1_000), a, TouchPoint::new(250.0, 300.0));
        gc.update(&mut session, &near, pinch);
        clock.set(ms(1_100));
        let apart = TouchEvent::pair(ms(1_100), a, TouchPoint::new(350.0, 300.0));
        gc.update(&mut session, &apart, pinch);
        let zoomed = gc.state().zoom_level;
        assert!((zoomed - 1.4).abs() < 1e-5);

        // One finger lifts, then lands far away well inside the pinch window.
        clock.set(ms(1_150));
        let lone = TouchEvent::single(ms(1_150), 150.0, 300.0);
        gc.update(&mut session, &lone, GestureDelta::new(0.0, 0.0, 1));

        clock.set(ms(1_200));
        let wide = TouchEvent::pair(
            ms(1_200),
            TouchPoint::new(100.0, 300.0),
            TouchPoint::new(400.0, 300.0),
        );
        assert_eq!(gc.update(&mut session, &wide, pinch), None);
        assert_eq!(gc.state().zoom_level, zoomed);
        assert_eq!(gc.pinch().baseline().timestamp, ms(1_200));

        // Later frames are measured against the contacts that just landed.
        clock.set(ms(1_250));
        let wider = TouchEvent::pair(
            ms(1_250),
            TouchPoint::new(50.0, 300.0),
            TouchPoint::new(450.0, 300.0),
        );
        gc.update(&mut session, &wider, pinch);
        let ratio = (400.0 * zoomed + 150.0) / (300.0 * zoomed + 150.0);
        assert!((gc.state().zoom_level - zoomed * ratio).abs() < 1e-4);
    }

    #[test]
    fn test_three_touch_frames_do_nothing() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_000), 100.0, 300.0));
        let crowd = TouchEvent::new(
            ms(1_016),
            vec![
                TouchPoint::new(60.0, 300.0),
                TouchPoint::new(160.0, 300.0),
                TouchPoint::new(260.0, 300.0),
            ],
        );
        let effect = gc.update(&mut session, &crowd, GestureDelta::new(-40.0, 0.0, 3));
        assert_eq!(effect, None);
        assert!(session.claimed);
        assert!(!session.saw_pinch);
        assert_eq!(session.last_touches, 3);
        assert_eq!(*gc.state(), ZoomPanState::default());
    }

    #[test]
    fn test_trailing_finger_after_pinch_is_not_a_swipe() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::Continuous);
        clock.set(ms(1_000));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_000), 150.0, 300.0));
        let a = TouchPoint::new(150.0, 300.0);
        let b = TouchPoint::new(250.0, 300.0);
        gc.update(&mut session, &TouchEvent::pair(ms(1_000), a, b), GestureDelta::new(0.0, 0.0, 2));

        clock.set(ms(1_100));
        let ev = TouchEvent::single(ms(1_100), 200.0, 300.0);
        assert_eq!(gc.update(&mut session, &ev, GestureDelta::new(50.0, 0.0, 1)), None);
    }

    #[test]
    fn test_release_threshold_mode_pages_on_release() {
        let clock = ManualClock::new(ms(0));
        let mut gc = classifier(&clock, SwipeMode::ReleaseThreshold);
        clock.set(ms(1_000));
        let (mut session, _) = gc.begin(&TouchEvent::single(ms(1_000), 300.0, 300.0));
        let ev = TouchEvent::single(ms(1_020), 290.0, 300.0);
        assert_eq!(gc.update(&mut session, &ev, GestureDelta::new(-10.0, 0.0, 1)), None);
        let ev = TouchEvent::single(ms(1_080), 100.0, 300.0);
        assert_eq!(gc.update(&mut session, &ev, GestureDelta::new(-200.0, 0.0, 1)), None);

        let effect = gc.end(session, &ev, GestureDelta::new(-200.0, 0.0, 1));
        // Start recorded at the first move (x = 290): 190 > 125.
        assert_eq!(
            effect,
            Some(Effect::Navigate(NavigationRequest { target_index: 3 }))
        );
    }
}
