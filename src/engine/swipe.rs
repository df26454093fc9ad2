use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal distance a drag must cover before release commits a swipe.
pub const SWIPE_THRESHOLD: f64 = 100.0;
/// Off-screen offset a committed card is slammed to before it settles.
const COMMIT_OFFSET: f64 = 1000.0;
const MAX_ROTATION_DEG: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DragOffset {
    pub x: f64,
    pub y: f64,
}

/// What a drag call did. Stray events (a move or release with no active
/// drag, or any drag once the deck is exhausted) are `Ignored`, never an
/// error: pointer streams deliver out-of-order events routinely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Dragging,
    SnapBack,
    Commit(SwipeDirection),
}

/// Emitted by `settle` once per committed swipe. `completed` is true only
/// on the swipe that consumes the final candidate.
#[derive(Debug, Clone, Serialize)]
pub struct SwipeEvent {
    pub direction: SwipeDirection,
    pub candidate: Uuid,
    pub completed: bool,
}

/// Drag state over a finite, ordered candidate deck. The cursor only moves
/// forward; `reset` is the sole exit from the exhausted state.
#[derive(Debug)]
pub struct SwipeSession {
    candidates: Vec<Uuid>,
    cursor: usize,
    anchor: (f64, f64),
    offset: DragOffset,
    dragging: bool,
    pending: Option<SwipeDirection>,
}

impl SwipeSession {
    pub fn new(candidates: Vec<Uuid>) -> Self {
        Self {
            candidates,
            cursor: 0,
            anchor: (0.0, 0.0),
            offset: DragOffset::default(),
            dragging: false,
            pending: None,
        }
    }

    pub fn current(&self) -> Option<Uuid> {
        self.candidates.get(self.cursor).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    pub fn offset(&self) -> DragOffset {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_start(&mut self, x: f64, y: f64) -> DragOutcome {
        if self.dragging || self.pending.is_some() || self.exhausted() {
            return DragOutcome::Ignored;
        }
        self.anchor = (x, y);
        self.dragging = true;
        DragOutcome::Dragging
    }

    pub fn drag_move(&mut self, x: f64, y: f64) -> DragOutcome {
        if !self.dragging {
            return DragOutcome::Ignored;
        }
        self.offset = DragOffset {
            x: x - self.anchor.0,
            y: y - self.anchor.1,
        };
        DragOutcome::Dragging
    }

    pub fn drag_end(&mut self) -> DragOutcome {
        if !self.dragging {
            return DragOutcome::Ignored;
        }
        self.dragging = false;

        if self.offset.x.abs() > SWIPE_THRESHOLD {
            let direction = if self.offset.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            self.offset = DragOffset {
                x: COMMIT_OFFSET.copysign(self.offset.x),
                y: 0.0,
            };
            self.pending = Some(direction);
            DragOutcome::Commit(direction)
        } else {
            self.offset = DragOffset::default();
            DragOutcome::SnapBack
        }
    }

    /// Finishes a committed swipe after the caller's settle delay: yields
    /// the swiped candidate, advances the cursor, and clears the offset.
    pub fn settle(&mut self) -> Option<SwipeEvent> {
        let direction = self.pending.take()?;
        let candidate = self.current()?;
        self.cursor += 1;
        self.offset = DragOffset::default();
        Some(SwipeEvent {
            direction,
            candidate,
            completed: self.exhausted(),
        })
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.anchor = (0.0, 0.0);
        self.offset = DragOffset::default();
        self.dragging = false;
        self.pending = None;
    }

    /// Card tilt in degrees, proportional to the horizontal drag.
    pub fn rotation(&self) -> f64 {
        self.offset.x / 300.0 * MAX_ROTATION_DEG
    }

    /// Opacity of the connect/skip indicator, saturating at the threshold.
    pub fn indicator_opacity(&self) -> f64 {
        (self.offset.x.abs() / SWIPE_THRESHOLD).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{DragOffset, DragOutcome, SwipeDirection, SwipeSession};

    fn deck(n: u128) -> Vec<Uuid> {
        (1..=n).map(Uuid::from_u128).collect()
    }

    fn swipe_left(session: &mut SwipeSession) -> Option<super::SwipeEvent> {
        assert_eq!(session.drag_start(200.0, 300.0), DragOutcome::Dragging);
        session.drag_move(50.0, 300.0);
        assert_eq!(
            session.drag_end(),
            DragOutcome::Commit(SwipeDirection::Left)
        );
        session.settle()
    }

    #[test]
    fn left_drag_past_threshold_commits_and_advances() {
        let mut session = SwipeSession::new(deck(3));

        let event = swipe_left(&mut session).expect("committed swipe settles");
        assert_eq!(event.direction, SwipeDirection::Left);
        assert_eq!(event.candidate, Uuid::from_u128(1));
        assert!(!event.completed);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.offset(), DragOffset::default());
    }

    #[test]
    fn completion_fires_exactly_once_on_the_last_swipe() {
        let mut session = SwipeSession::new(deck(3));

        assert!(!swipe_left(&mut session).unwrap().completed);
        assert!(!swipe_left(&mut session).unwrap().completed);
        let last = swipe_left(&mut session).unwrap();
        assert!(last.completed);
        assert_eq!(session.cursor(), 3);
        assert!(session.exhausted());

        // Exhausted deck: no further drags, no further settles.
        assert_eq!(session.drag_start(200.0, 300.0), DragOutcome::Ignored);
        assert!(session.settle().is_none());
    }

    #[test]
    fn short_drag_snaps_back_without_advancing() {
        let mut session = SwipeSession::new(deck(2));

        session.drag_start(200.0, 300.0);
        session.drag_move(300.0, 310.0); // exactly at the threshold
        assert_eq!(session.drag_end(), DragOutcome::SnapBack);

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.offset(), DragOffset::default());
        assert!(session.settle().is_none());
    }

    #[test]
    fn right_drag_commits_right() {
        let mut session = SwipeSession::new(deck(1));

        session.drag_start(100.0, 100.0);
        session.drag_move(280.0, 90.0);
        assert_eq!(
            session.drag_end(),
            DragOutcome::Commit(SwipeDirection::Right)
        );

        let event = session.settle().unwrap();
        assert_eq!(event.direction, SwipeDirection::Right);
        assert!(event.completed);
    }

    #[test]
    fn stray_move_and_release_are_ignored() {
        let mut session = SwipeSession::new(deck(2));

        assert_eq!(session.drag_move(500.0, 0.0), DragOutcome::Ignored);
        assert_eq!(session.drag_end(), DragOutcome::Ignored);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.offset(), DragOffset::default());
    }

    #[test]
    fn drag_start_while_dragging_keeps_the_first_anchor() {
        let mut session = SwipeSession::new(deck(2));

        session.drag_start(100.0, 100.0);
        assert_eq!(session.drag_start(400.0, 400.0), DragOutcome::Ignored);
        session.drag_move(250.0, 100.0);
        assert_eq!(
            session.drag_end(),
            DragOutcome::Commit(SwipeDirection::Right)
        );
    }

    #[test]
    fn drag_offset_tracks_both_axes() {
        let mut session = SwipeSession::new(deck(1));

        session.drag_start(100.0, 200.0);
        session.drag_move(160.0, 170.0);
        let offset = session.offset();
        assert_eq!(offset.x, 60.0);
        assert_eq!(offset.y, -30.0);
    }

    #[test]
    fn reset_restarts_an_exhausted_session() {
        let mut session = SwipeSession::new(deck(1));
        swipe_left(&mut session);
        assert!(session.exhausted());

        session.reset();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.current(), Some(Uuid::from_u128(1)));
        assert_eq!(session.drag_start(0.0, 0.0), DragOutcome::Dragging);
    }

    #[test]
    fn derived_visuals_follow_the_offset() {
        let mut session = SwipeSession::new(deck(1));

        session.drag_start(0.0, 0.0);
        session.drag_move(150.0, 0.0);
        assert!((session.rotation() - 7.5).abs() < 1e-9);
        assert_eq!(session.indicator_opacity(), 1.0);

        session.drag_move(-50.0, 0.0);
        assert!((session.rotation() + 2.5).abs() < 1e-9);
        assert_eq!(session.indicator_opacity(), 0.5);
    }
}
