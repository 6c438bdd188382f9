use web_sys::HtmlCanvasElement;

use sketchpad_shared::Board;

use crate::render::CanvasSurface;

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub board: Board<CanvasSurface>,
    pub pointer: PointerSession,
}

impl State {
    pub fn new(canvas: HtmlCanvasElement, board: Board<CanvasSurface>) -> Self {
        Self {
            canvas,
            board,
            pointer: PointerSession::default(),
        }
    }
}

/// Tracks the one pointer that owns the current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSession {
    active: Option<i32>,
}

impl PointerSession {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn owns(&self, pointer_id: i32) -> bool {
        self.active == Some(pointer_id)
    }

    /// Returns false while another pointer holds the session.
    pub fn claim(&mut self, pointer_id: i32) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(pointer_id);
        true
    }

    /// Ends the session if `pointer_id` owns it. Up, cancel and lost
    /// capture all funnel through here.
    pub fn release(&mut self, pointer_id: i32) -> bool {
        if !self.owns(pointer_id) {
            return false;
        }
        self.active = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_pointer_is_refused_while_session_is_held() {
        let mut session = PointerSession::default();
        assert!(session.claim(1));
        assert!(!session.claim(2));
        assert!(session.owns(1));
        assert!(!session.owns(2));
    }

    #[test]
    fn lost_capture_frees_the_session_for_the_next_press() {
        let mut session = PointerSession::default();
        assert!(session.claim(7));

        assert!(session.release(7));
        assert!(!session.is_active());
        assert!(session.claim(8));
        assert!(session.owns(8));
    }

    #[test]
    fn release_from_foreign_pointer_is_ignored() {
        let mut session = PointerSession::default();
        session.claim(3);
        assert!(!session.release(4));
        assert!(session.owns(3));
        assert!(!PointerSession::default().release(3));
    }
}
