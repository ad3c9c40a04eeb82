pub const BALL_SIZE: f64 = 24.0;
pub const BALL_OFFSET: f64 = 10.0;
pub const VIEWPORT_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// What the host page reports about the current selection: the text, the
/// selection's bounding rectangle when one exists, and the release point of
/// the pointer as a fallback anchor.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub text: String,
    pub rect: Option<Rect>,
    pub pointer: Point,
}

impl SelectionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffordanceState {
    Hidden,
    Visible(Point),
}

/// The floating ball. One instance per widget, flipped between hidden and
/// visible; nothing is recreated across selections.
#[derive(Debug)]
pub struct Affordance {
    state: AffordanceState,
}

impl Affordance {
    pub fn new() -> Affordance {
        Affordance {
            state: AffordanceState::Hidden,
        }
    }

    pub fn state(&self) -> AffordanceState {
        self.state
    }

    /// Pointer released after the selection settled. A non-empty selection
    /// shows the ball next to the selection rectangle, or at the pointer when
    /// the rectangle is degenerate; an empty one hides it.
    pub fn pointer_released(
        &mut self,
        selection: &SelectionSnapshot,
        viewport: Viewport,
    ) -> AffordanceState {
        if selection.is_empty() {
            self.state = AffordanceState::Hidden;
            return self.state;
        }

        let anchor = match selection.rect {
            Some(rect) if rect.width() > 0.0 && rect.height() > 0.0 => Point {
                x: rect.right + BALL_OFFSET,
                y: rect.top,
            },
            _ => selection.pointer,
        };
        self.state = AffordanceState::Visible(clamp_to_viewport(anchor, viewport));
        self.state
    }

    pub fn selection_cleared(&mut self) {
        self.state = AffordanceState::Hidden;
    }
}

impl Default for Affordance {
    fn default() -> Affordance {
        Affordance::new()
    }
}

fn clamp_to_viewport(point: Point, viewport: Viewport) -> Point {
    let max_x = viewport.width - BALL_SIZE - VIEWPORT_MARGIN;
    let max_y = viewport.height - BALL_SIZE - VIEWPORT_MARGIN;
    Point {
        x: point.x.max(VIEWPORT_MARGIN).min(max_x),
        y: point.y.max(VIEWPORT_MARGIN).min(max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn selection(text: &str, rect: Option<Rect>) -> SelectionSnapshot {
        SelectionSnapshot {
            text: text.into(),
            rect,
            pointer: Point { x: 200.0, y: 300.0 },
        }
    }

    #[test]
    fn ball_sits_beside_the_selection_rect() {
        let mut affordance = Affordance::new();
        let rect = Rect {
            left: 80.0,
            top: 50.0,
            right: 100.0,
            bottom: 66.0,
        };
        let state = affordance.pointer_released(&selection("hello", Some(rect)), VIEWPORT);
        assert_eq!(state, AffordanceState::Visible(Point { x: 110.0, y: 50.0 }));
    }

    #[test]
    fn degenerate_rect_falls_back_to_the_pointer() {
        let mut affordance = Affordance::new();
        let rect = Rect {
            left: 80.0,
            top: 50.0,
            right: 80.0,
            bottom: 50.0,
        };
        let state = affordance.pointer_released(&selection("hello", Some(rect)), VIEWPORT);
        assert_eq!(
            state,
            AffordanceState::Visible(Point { x: 200.0, y: 300.0 })
        );
    }

    #[test]
    fn whitespace_selection_hides_the_ball() {
        let mut affordance = Affordance::new();
        affordance.pointer_released(&selection("hello", None), VIEWPORT);
        let state = affordance.pointer_released(&selection("  \n", None), VIEWPORT);
        assert_eq!(state, AffordanceState::Hidden);
    }

    #[test]
    fn position_is_clamped_inside_the_viewport() {
        let mut affordance = Affordance::new();
        let rect = Rect {
            left: 780.0,
            top: -40.0,
            right: 799.0,
            bottom: -20.0,
        };
        let state = affordance.pointer_released(&selection("edge", Some(rect)), VIEWPORT);
        assert_eq!(
            state,
            AffordanceState::Visible(Point {
                x: 800.0 - BALL_SIZE - VIEWPORT_MARGIN,
                y: VIEWPORT_MARGIN,
            })
        );
    }

    #[test]
    fn clearing_the_selection_hides_the_ball() {
        let mut affordance = Affordance::new();
        affordance.pointer_released(&selection("hello", None), VIEWPORT);
        affordance.selection_cleared();
        assert_eq!(affordance.state(), AffordanceState::Hidden);
    }
}
