//! Drives a [`Carousel`] from script events on a manual clock.

use std::cell::RefCell;
use std::rc::Rc;

use loupe_core::{Carousel, ManualClock, NavigationError, NavigationHandle, Timestamp};

use crate::config::ReplayConfig;
use crate::report::{Frame, Summary};
use crate::script::ScriptEvent;

/// Stand-in list: accepts every request and remembers it.
#[derive(Debug, Clone, Default)]
struct ListLog(Rc<RefCell<Vec<usize>>>);

impl NavigationHandle for ListLog {
    fn scroll_to_index(&mut self, index: usize) -> Result<(), NavigationError> {
        tracing::debug!(index, "list scrolled");
        self.0.borrow_mut().push(index);
        Ok(())
    }
}

pub struct Replay {
    clock: ManualClock,
    carousel: Carousel<ManualClock>,
    list: ListLog,
    frames: usize,
}

impl Replay {
    pub fn new(config: &ReplayConfig) -> Self {
        let clock = ManualClock::new(Timestamp::ZERO);
        let mut carousel = Carousel::new(
            clock.clone(),
            config.viewport,
            config.item_count,
            config.mode,
        );
        carousel.focus(config.start_index);

        let list = ListLog::default();
        if !config.detached {
            carousel.attach_navigation(Box::new(list.clone()));
        }

        Self {
            clock,
            carousel,
            list,
            frames: 0,
        }
    }

    /// Apply one event at its own timestamp and report the result.
    pub fn step(&mut self, event: &ScriptEvent) -> Frame {
        self.clock.set(event.timestamp());
        let touch = event.touch_event();
        let effect = match event {
            ScriptEvent::Start { .. } => self.carousel.begin(&touch),
            ScriptEvent::Move { .. } => self.carousel.update(&touch, event.delta()),
            ScriptEvent::Release { .. } => self.carousel.end(&touch, event.delta()),
        };

        let frame = Frame {
            seq: self.frames,
            t: event.timestamp(),
            kind: event.kind(),
            effect,
            index: self.carousel.current_index(),
            state: *self.carousel.state(),
            transform: self.carousel.transform(),
            displayed_scale: self.carousel.displayed_scale(),
        };
        self.frames += 1;
        frame
    }

    pub fn run(&mut self, events: &[ScriptEvent]) -> Vec<Frame> {
        events.iter().map(|event| self.step(event)).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            frames: self.frames,
            navigations: self.list.0.borrow().clone(),
            final_index: self.carousel.current_index(),
            final_state: *self.carousel.state(),
        }
    }
}
