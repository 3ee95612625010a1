//! Drag gesture tracking.
//!
//! The tracker turns a stream of pointer samples into a committed panel
//! offset and a close/no-close decision. Offsets grow as the panel moves
//! toward its hidden side, so the same arithmetic serves every
//! direction; only the axis and the closing sign differ.

use crate::direction::Direction;
use crate::input::PointerId;
use kurbo::Point;

/// Overscroll bound used until the panel has been measured.
pub const DEFAULT_OVERSCROLL_BOUND: f64 = -195.0;

/// Scratch state for one press, created on touch start and dropped on
/// release or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Contact being tracked. Other contacts are ignored.
    pub pointer: PointerId,
    /// Axis coordinate where the press started.
    pub origin_axis: f64,
    /// Committed offset when the press started.
    pub origin_offset: f64,
    /// Axis coordinate of the last applied sample.
    pub thumb: f64,
    /// Last applied sample, `None` until the first move is applied.
    pub last_sample: Option<f64>,
    /// Offset produced by the last applied sample.
    pub last_offset: f64,
}

/// Result of feeding a move sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMove {
    /// Sample was not applied; the platform keeps its default behavior.
    Ignored,
    /// Sample moved the panel. The platform's scroll handling should be
    /// suppressed for this event.
    Applied {
        offset: f64,
        /// Whether releasing now would close the drawer.
        would_close: bool,
    },
}

/// Result of ending a press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No press was being tracked for this contact.
    Ignored,
    /// The drag crossed the threshold; the drawer should close.
    Close,
    /// The panel returns to `offset` (the rest offset).
    SnapBack { offset: f64 },
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    direction: Direction,
    allow_close: bool,
    close_threshold: f64,
    /// Panel extent along the axis (0 until measured).
    panel_extent: f64,
    overscroll_bound: f64,
    measured: bool,
    offset: f64,
    session: Option<DragSession>,
}

impl GestureTracker {
    pub fn new(direction: Direction, allow_close: bool, close_threshold: f64) -> Self {
        Self {
            direction,
            allow_close,
            close_threshold,
            panel_extent: 0.0,
            overscroll_bound: DEFAULT_OVERSCROLL_BOUND,
            measured: false,
            offset: direction.rest_offset(0.0),
            session: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Committed panel offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn rest_offset(&self) -> f64 {
        self.direction.rest_offset(self.panel_extent)
    }

    pub fn panel_extent(&self) -> f64 {
        self.panel_extent
    }

    pub fn overscroll_bound(&self) -> f64 {
        self.overscroll_bound
    }

    pub fn is_touching(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Record measured geometry.
    ///
    /// The first measurement sets the overscroll bound; later ones can
    /// only tighten it, so content growing mid-gesture never widens the
    /// allowance.
    pub fn set_layout(&mut self, container_extent: f64, panel_extent: f64, buffer: f64) {
        let bound = container_extent - panel_extent - buffer;
        if !self.measured || bound < self.overscroll_bound {
            self.overscroll_bound = bound;
        }
        self.measured = true;

        let was_at_rest = self.offset == self.rest_offset();
        self.panel_extent = panel_extent;
        if self.session.is_none() && was_at_rest {
            self.offset = self.rest_offset();
        }
    }

    /// Lowest travel (offset past rest) a drag may reach.
    fn travel_floor(&self) -> f64 {
        self.overscroll_bound.min(0.0)
    }

    /// Whether a move to `new_offset` may be applied.
    ///
    /// The offset itself must stay positive. For top, bottom and left the
    /// rest offset is 0, so only travel toward the hidden side passes. A
    /// right drawer rests at its extent and may also be pulled toward the
    /// open side, as far as the overscroll bound allows.
    fn admits(&self, new_offset: f64) -> bool {
        new_offset > 0.0 && new_offset - self.rest_offset() > self.travel_floor()
    }

    /// Begin tracking a press. A press that starts while another contact
    /// is down is ignored.
    pub fn touch_start(&mut self, pointer: PointerId, position: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        let axis = self.direction.axis().coord(position);
        self.session = Some(DragSession {
            pointer,
            origin_axis: axis,
            origin_offset: self.offset,
            thumb: axis,
            last_sample: None,
            last_offset: 0.0,
        });
        true
    }

    /// Feed a move sample.
    ///
    /// `viewport_visible` freezes dragging while the panel's scroll
    /// anchor is out of view, leaving the gesture to the content scroll.
    pub fn touch_move(
        &mut self,
        pointer: PointerId,
        position: Point,
        viewport_visible: bool,
    ) -> DragMove {
        let Some(session) = self.session.as_ref() else {
            return DragMove::Ignored;
        };
        if session.pointer != pointer {
            return DragMove::Ignored;
        }

        let axis = self.direction.axis().coord(position);
        let delta = axis - session.thumb;
        let new_offset = self.offset + delta * self.direction.closing_sign();

        if !viewport_visible || !self.admits(new_offset) {
            return DragMove::Ignored;
        }

        if let Some(session) = self.session.as_mut() {
            session.thumb = axis;
            session.last_sample = Some(axis);
            session.last_offset = new_offset;
        }
        self.offset = new_offset;

        DragMove::Applied {
            offset: new_offset,
            would_close: self.would_close(),
        }
    }

    /// End a press.
    pub fn touch_end(&mut self, pointer: PointerId) -> Release {
        match self.session.as_ref() {
            Some(session) if session.pointer == pointer => {}
            _ => return Release::Ignored,
        }

        let close = self.would_close();
        self.session = None;
        // Closing is only a request, so the offset returns to rest either
        // way.
        self.offset = self.rest_offset();
        if close {
            Release::Close
        } else {
            Release::SnapBack {
                offset: self.offset,
            }
        }
    }

    /// Abandon a press without closing.
    pub fn touch_cancel(&mut self, pointer: PointerId) -> Release {
        match self.session.as_ref() {
            Some(session) if session.pointer == pointer => {
                self.session = None;
                self.offset = self.rest_offset();
                Release::SnapBack {
                    offset: self.offset,
                }
            }
            _ => Release::Ignored,
        }
    }

    /// Drop any press and return to rest, e.g. on programmatic close.
    pub fn reset(&mut self) {
        self.session = None;
        self.offset = self.rest_offset();
    }

    /// Close predicate for the current press.
    ///
    /// False when closing is disabled, when no move has been applied, or
    /// when the panel is still pulled past its rest position. Otherwise
    /// the displacement toward the hidden side must exceed the threshold.
    pub fn would_close(&self) -> bool {
        if !self.allow_close {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let Some(last) = session.last_sample else {
            return false;
        };
        session.last_offset >= self.rest_offset()
            && self.direction.closing_displacement(session.origin_axis, last)
                > self.close_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CLOSE_THRESHOLD;

    fn tracker(direction: Direction) -> GestureTracker {
        GestureTracker::new(direction, true, DEFAULT_CLOSE_THRESHOLD)
    }

    /// A point whose coordinate along `direction`'s axis is `axis`.
    fn at(direction: Direction, axis: f64) -> Point {
        match direction.axis() {
            crate::direction::Axis::Vertical => Point::new(50.0, axis),
            crate::direction::Axis::Horizontal => Point::new(axis, 50.0),
        }
    }

    fn drag(tracker: &mut GestureTracker, samples: &[f64]) -> Release {
        let direction = tracker.direction();
        tracker.touch_start(1, at(direction, samples[0]));
        for &sample in &samples[1..] {
            tracker.touch_move(1, at(direction, sample), true);
        }
        tracker.touch_end(1)
    }

    #[test]
    fn test_bottom_drag_past_threshold_closes() {
        let mut t = tracker(Direction::Bottom);
        t.touch_start(1, at(Direction::Bottom, 0.0));
        t.touch_move(1, at(Direction::Bottom, 40.0), true);
        let applied = t.touch_move(1, at(Direction::Bottom, 90.0), true);

        assert_eq!(
            applied,
            DragMove::Applied {
                offset: 90.0,
                would_close: true
            }
        );
        assert!((t.offset() - 90.0).abs() < f64::EPSILON);
        assert_eq!(t.touch_end(1), Release::Close);
    }

    #[test]
    fn test_every_direction_closes_past_threshold() {
        for direction in Direction::ALL {
            let mut t = tracker(direction);
            let end = 200.0 + 100.0 * direction.closing_sign();
            assert_eq!(drag(&mut t, &[200.0, end]), Release::Close, "{direction}");
        }
    }

    #[test]
    fn test_every_direction_snaps_back_under_threshold() {
        for direction in Direction::ALL {
            let mut t = tracker(direction);
            let end = 200.0 + 50.0 * direction.closing_sign();
            let rest = t.rest_offset();
            assert_eq!(
                drag(&mut t, &[200.0, end]),
                Release::SnapBack { offset: rest },
                "{direction}"
            );
            assert!((t.offset() - rest).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_right_drag_toward_open_side_snaps_back() {
        let mut t = tracker(Direction::Right);
        t.set_layout(1000.0, 300.0, 20.0);
        assert!((t.offset() - 300.0).abs() < f64::EPSILON);

        // Content fits, so the panel cannot be pulled past rest.
        t.touch_start(1, Point::new(100.0, 0.0));
        assert_eq!(t.touch_move(1, Point::new(20.0, 0.0), true), DragMove::Ignored);
        assert_eq!(t.touch_end(1), Release::SnapBack { offset: 300.0 });
    }

    #[test]
    fn test_right_pull_toward_open_side_within_bound() {
        let mut t = tracker(Direction::Right);
        // Panel wider than its container: 200 - 300 - 20 = -120.
        t.set_layout(200.0, 300.0, 20.0);
        assert!((t.offset() - 300.0).abs() < f64::EPSILON);

        t.touch_start(1, Point::new(100.0, 0.0));
        let moved = t.touch_move(1, Point::new(20.0, 0.0), true);
        assert_eq!(
            moved,
            DragMove::Applied {
                offset: 220.0,
                would_close: false
            }
        );
        // Past the bound is refused.
        assert_eq!(t.touch_move(1, Point::new(-30.0, 0.0), true), DragMove::Ignored);
        assert!((t.offset() - 220.0).abs() < f64::EPSILON);
        assert_eq!(t.touch_end(1), Release::SnapBack { offset: 300.0 });
    }

    #[test]
    fn test_open_side_drag_ignored_with_fitting_content() {
        for direction in [Direction::Top, Direction::Bottom, Direction::Left] {
            let mut t = tracker(direction);
            t.set_layout(800.0, 400.0, 20.0);
            t.touch_start(1, at(direction, 300.0));
            let end = 300.0 - 100.0 * direction.closing_sign();
            assert_eq!(
                t.touch_move(1, at(direction, end), true),
                DragMove::Ignored,
                "{direction}"
            );
            assert!(t.offset().abs() < f64::EPSILON, "{direction}");
        }
    }

    #[test]
    fn test_open_side_drag_ignored_before_measure() {
        for direction in [Direction::Top, Direction::Bottom, Direction::Left] {
            let mut t = tracker(direction);
            t.touch_start(1, at(direction, 500.0));
            let end = 500.0 - 100.0 * direction.closing_sign();
            assert_eq!(
                t.touch_move(1, at(direction, end), true),
                DragMove::Ignored,
                "{direction}"
            );
            assert!(t.offset().abs() < f64::EPSILON, "{direction}");
        }
    }

    #[test]
    fn test_zero_length_touch_never_closes() {
        let mut t = tracker(Direction::Bottom);
        t.touch_start(1, at(Direction::Bottom, 500.0));
        assert!(!t.would_close());
        assert_eq!(t.touch_end(1), Release::SnapBack { offset: 0.0 });
    }

    #[test]
    fn test_allow_close_false_never_closes() {
        let mut t = GestureTracker::new(Direction::Bottom, false, DEFAULT_CLOSE_THRESHOLD);
        assert_eq!(
            drag(&mut t, &[0.0, 100.0, 400.0]),
            Release::SnapBack { offset: 0.0 }
        );
    }

    #[test]
    fn test_invisible_viewport_freezes_drag() {
        let mut t = tracker(Direction::Bottom);
        t.touch_start(1, at(Direction::Bottom, 0.0));
        assert_eq!(
            t.touch_move(1, at(Direction::Bottom, 120.0), false),
            DragMove::Ignored
        );
        assert!((t.offset()).abs() < f64::EPSILON);
        assert_eq!(t.touch_end(1), Release::SnapBack { offset: 0.0 });
    }

    #[test]
    fn test_second_contact_ignored() {
        let mut t = tracker(Direction::Bottom);
        assert!(t.touch_start(1, at(Direction::Bottom, 0.0)));
        assert!(!t.touch_start(2, at(Direction::Bottom, 300.0)));
        assert_eq!(
            t.touch_move(2, at(Direction::Bottom, 400.0), true),
            DragMove::Ignored
        );
        assert_eq!(t.touch_end(2), Release::Ignored);
        assert!(t.is_touching());
    }

    #[test]
    fn test_tall_content_keeps_open_side_swipes_for_scroll() {
        let mut t = tracker(Direction::Bottom);
        // Panel taller than container: 800 - 1200 - 20 = -420.
        t.set_layout(800.0, 1200.0, 20.0);
        assert!((t.overscroll_bound() + 420.0).abs() < f64::EPSILON);

        t.touch_start(1, at(Direction::Bottom, 500.0));
        assert_eq!(
            t.touch_move(1, at(Direction::Bottom, 300.0), true),
            DragMove::Ignored
        );
        assert!(t.offset().abs() < f64::EPSILON);

        // The same press may still pull the panel toward closed.
        assert_eq!(
            t.touch_move(1, at(Direction::Bottom, 540.0), true),
            DragMove::Applied {
                offset: 40.0,
                would_close: false
            }
        );
    }

    #[test]
    fn test_close_release_returns_offset_to_rest() {
        let mut t = tracker(Direction::Bottom);
        assert_eq!(drag(&mut t, &[0.0, 120.0]), Release::Close);
        assert!(t.offset().abs() < f64::EPSILON);

        // The next press starts from rest, not from the released offset.
        t.touch_start(1, at(Direction::Bottom, 0.0));
        let origin = t.session().map(|s| s.origin_offset);
        assert_eq!(origin, Some(0.0));
    }

    #[test]
    fn test_remeasure_only_tightens_bound() {
        let mut t = tracker(Direction::Bottom);
        t.set_layout(800.0, 1000.0, 20.0);
        t.set_layout(800.0, 900.0, 20.0);
        assert!((t.overscroll_bound() + 220.0).abs() < f64::EPSILON);
        t.set_layout(800.0, 1100.0, 20.0);
        assert!((t.overscroll_bound() + 320.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speculative_close_toggles() {
        let mut t = tracker(Direction::Top);
        t.touch_start(1, at(Direction::Top, 400.0));
        let over = t.touch_move(1, at(Direction::Top, 300.0), true);
        assert_eq!(
            over,
            DragMove::Applied {
                offset: 100.0,
                would_close: true
            }
        );
        let under = t.touch_move(1, at(Direction::Top, 350.0), true);
        assert_eq!(
            under,
            DragMove::Applied {
                offset: 50.0,
                would_close: false
            }
        );
    }

    #[test]
    fn test_cancel_discards_session() {
        let mut t = tracker(Direction::Left);
        t.touch_start(7, at(Direction::Left, 300.0));
        t.touch_move(7, at(Direction::Left, 100.0), true);
        assert_eq!(t.touch_cancel(7), Release::SnapBack { offset: 0.0 });
        assert!(!t.is_touching());
        assert!(!t.would_close());
    }

    #[test]
    fn test_new_session_does_not_see_previous_samples() {
        let mut t = tracker(Direction::Bottom);
        t.touch_start(1, at(Direction::Bottom, 0.0));
        t.touch_move(1, at(Direction::Bottom, 60.0), true);
        t.touch_end(1);

        t.touch_start(1, at(Direction::Bottom, 0.0));
        assert!(!t.would_close());
        assert_eq!(t.session().and_then(|s| s.last_sample), None);
    }
}
