//! Mouse and touch input funnelled into one begin/move/end gesture model.
//!
//! Releases are expected from a global listener: an `Up`/`End` is honoured no matter
//! where it happens, otherwise a release outside the surface would leave picking stuck.
use crate::{ColorPicker, DisplayPoint};
use common_types::ColorCode;

/// The state transitions of one picking gesture.
pub trait PointerSession {
    fn begin(&mut self, point: DisplayPoint) -> Option<ColorCode>;
    fn update(&mut self, point: DisplayPoint) -> Option<ColorCode>;
    fn end(&mut self);
}

impl PointerSession for ColorPicker {
    fn begin(&mut self, point: DisplayPoint) -> Option<ColorCode> {
        self.begin_pick(point)
    }

    fn update(&mut self, point: DisplayPoint) -> Option<ColorCode> {
        self.continue_pick(point)
    }

    fn end(&mut self) {
        self.end_pick();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseEvent {
    Down(DisplayPoint),
    Move(DisplayPoint),
    Up,
}

/// Touch events carry every active touch point; only the first one picks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent<'a> {
    Start(&'a [DisplayPoint]),
    Move(&'a [DisplayPoint]),
    End,
}

/// Feed a mouse event into a pointer session. Returns the newly picked color, if any.
pub fn dispatch_mouse<S: PointerSession + ?Sized>(
    session: &mut S,
    event: MouseEvent,
) -> Option<ColorCode> {
    match event {
        MouseEvent::Down(point) => session.begin(point),
        MouseEvent::Move(point) => session.update(point),
        MouseEvent::Up => {
            session.end();
            None
        }
    }
}

/// Feed a touch event into a pointer session. Returns the newly picked color, if any.
pub fn dispatch_touch<S: PointerSession + ?Sized>(
    session: &mut S,
    event: TouchEvent<'_>,
) -> Option<ColorCode> {
    match event {
        TouchEvent::Start(touches) => touches.first().and_then(|point| session.begin(*point)),
        TouchEvent::Move(touches) => touches.first().and_then(|point| session.update(*point)),
        TouchEvent::End => {
            session.end();
            None
        }
    }
}
