//! Loupe Core: gesture interpretation for swipeable zoom viewers.
//!
//! This crate turns a raw multi-touch stream into a zoom level, a pan
//! offset, and discrete next/previous navigation requests. No rendering or
//! framework dependencies: hosts feed touch events in and apply the returned
//! effects (scale retargets, navigation requests) to their own collaborators.

pub mod animation;
pub mod carousel;
pub mod classifier;
pub mod clock;
pub mod constants;
pub mod effects;
pub mod error;
pub mod events;
pub mod geometry;
pub mod pinch;
pub mod swipe;
pub mod tap;
pub mod zoom;

// Re-exports for convenience.
pub use animation::ScaleAnimation;
pub use carousel::{Carousel, NavigationHandle, ScaleAnimator};
pub use classifier::{GestureClassifier, GestureSession};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use effects::{Effect, NavigationRequest, ScaleTarget};
pub use error::NavigationError;
pub use events::{GestureDelta, TouchEvent, TouchPoint};
pub use geometry::{NormalizedCenter, ViewportSize};
pub use swipe::SwipeMode;
pub use zoom::{Transform, ZoomPanController, ZoomPanState, ZoomStatus};
