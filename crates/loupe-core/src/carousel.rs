//! Carousel host: the seam between the gesture core and the list that shows
//! the items.
//!
//! The carousel keeps the index of the item in focus, owns that item's
//! [`GestureClassifier`], holds the open gesture session between callbacks,
//! and applies the effects the classifier returns:
//!
//! - scale retargets go to the built-in [`ScaleAnimation`] and, when one is
//!   attached, to the host's [`ScaleAnimator`];
//! - navigation requests go to the attached [`NavigationHandle`]. With no
//!   handle attached the request is dropped with a warning.
//!
//! Changing focus discards the previous item's zoom state.

use crate::animation::ScaleAnimation;
use crate::classifier::{GestureClassifier, GestureSession};
use crate::clock::{Clock, Timestamp};
use crate::constants::MIN_ZOOM_LEVEL;
use crate::effects::{Effect, ScaleTarget};
use crate::error::NavigationError;
use crate::events::{GestureDelta, TouchEvent};
use crate::geometry::{ViewportSize, clamp_index};
use crate::swipe::SwipeMode;
use crate::zoom::{Transform, ZoomPanState};

/// Capability to reposition the list. Provided by the host once the list
/// exists.
pub trait NavigationHandle {
    fn scroll_to_index(&mut self, index: usize) -> Result<(), NavigationError>;
}

/// Host-side animated transform. Each call replaces the previous target.
pub trait ScaleAnimator {
    fn animate_to(&mut self, target: ScaleTarget, now: Timestamp);
}

pub struct Carousel<C: Clock + Clone> {
    clock: C,
    viewport: ViewportSize,
    item_count: usize,
    mode: SwipeMode,
    active: GestureClassifier<C>,
    session: Option<GestureSession>,
    animation: ScaleAnimation,
    navigation: Option<Box<dyn NavigationHandle>>,
    animator: Option<Box<dyn ScaleAnimator>>,
}

impl<C: Clock + Clone> Carousel<C> {
    /// Carousel focused on the first item, with no collaborators attached.
    pub fn new(clock: C, viewport: ViewportSize, item_count: usize, mode: SwipeMode) -> Self {
        let active = GestureClassifier::new(clock.clone(), viewport, 0, item_count, mode);
        Self {
            clock,
            viewport,
            item_count,
            mode,
            active,
            session: None,
            animation: ScaleAnimation::new(MIN_ZOOM_LEVEL),
            navigation: None,
            animator: None,
        }
    }

    pub fn attach_navigation(&mut self, handle: Box<dyn NavigationHandle>) {
        self.navigation = Some(handle);
    }

    pub fn detach_navigation(&mut self) -> Option<Box<dyn NavigationHandle>> {
        self.navigation.take()
    }

    pub fn attach_animator(&mut self, animator: Box<dyn ScaleAnimator>) {
        self.animator = Some(animator);
    }

    pub fn current_index(&self) -> usize {
        self.active.item_index()
    }

    pub fn state(&self) -> &ZoomPanState {
        self.active.state()
    }

    /// Committed transform of the focused item.
    pub fn transform(&self) -> Transform {
        self.active.transform()
    }

    /// Scale currently on screen, mid-animation included.
    pub fn displayed_scale(&self) -> f32 {
        self.animation.value_at(self.clock.now())
    }

    pub fn begin(&mut self, event: &TouchEvent) -> Option<Effect> {
        if self.session.is_some() {
            tracing::debug!("press while a gesture is open; restarting session");
        }
        let (session, effect) = self.active.begin(event);
        self.session = Some(session);
        self.apply(effect)
    }

    pub fn update(&mut self, event: &TouchEvent, delta: GestureDelta) -> Option<Effect> {
        let Some(mut session) = self.session.take() else {
            tracing::debug!("move without a press; ignored");
            return None;
        };
        let effect = self.active.update(&mut session, event, delta);
        self.session = Some(session);
        self.apply(effect)
    }

    pub fn end(&mut self, event: &TouchEvent, delta: GestureDelta) -> Option<Effect> {
        let Some(session) = self.session.take() else {
            tracing::debug!("release without a press; ignored");
            return None;
        };
        let effect = self.active.end(session, event, delta);
        self.apply(effect)
    }

    /// Hand a navigation request to the list and move focus on success.
    pub fn try_navigate(&mut self, index: usize) -> Result<usize, NavigationError> {
        let target = clamp_index(index as isize, self.item_count);
        let handle = self
            .navigation
            .as_mut()
            .ok_or(NavigationError::Detached(target))?;
        handle.scroll_to_index(target)?;
        self.focus(target);
        Ok(target)
    }

    /// Make `index` the focused item. A new item starts unzoomed.
    pub fn focus(&mut self, index: usize) {
        let index = clamp_index(index as isize, self.item_count);
        if index == self.active.item_index() {
            return;
        }
        tracing::info!(from = self.active.item_index(), to = index, "item focused");
        self.active = GestureClassifier::new(
            self.clock.clone(),
            self.viewport,
            index,
            self.item_count,
            self.mode,
        );
        self.animation = ScaleAnimation::new(MIN_ZOOM_LEVEL);
    }

    fn apply(&mut self, effect: Option<Effect>) -> Option<Effect> {
        match effect? {
            Effect::AnimateScale(target) => {
                let now = self.clock.now();
                self.animation.retarget(target, now);
                if let Some(animator) = self.animator.as_mut() {
                    animator.animate_to(target, now);
                }
            }
            Effect::Navigate(request) => {
                if let Err(err) = self.try_navigate(request.target_index) {
                    tracing::warn!("navigation dropped: {err}");
                }
            }
        }
        effect
    }
}
