//! Pointer input consumed by the force stage.
//!
//! The solver never polls devices. Callers sample the pointer once per tick
//! and hand over a [`PointerState`] in the grid's normalised coordinate
//! space: the origin is the centre of the domain and one unit equals the
//! domain height.

/// The active pointer gesture for a tick. Exactly one applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// No button held: no force is injected.
    #[default]
    None,
    /// Primary-button drag: force follows the pointer displacement.
    Drag,
    /// Secondary-button impulse: a random push around the pointer.
    Impulse,
}

impl Gesture {
    /// Derive the gesture from raw button states.
    ///
    /// The secondary button takes precedence when both are held.
    pub fn from_buttons(primary: bool, secondary: bool) -> Self {
        if secondary {
            Self::Impulse
        } else if primary {
            Self::Drag
        } else {
            Self::None
        }
    }
}

/// Pointer position for the current and previous tick plus the gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position this tick.
    pub position: [f32; 2],
    /// Pointer position on the previous tick.
    pub previous: [f32; 2],
    /// The gesture held this tick.
    pub gesture: Gesture,
}

impl PointerState {
    /// A pointer resting at `position` with no gesture.
    pub fn idle(position: [f32; 2]) -> Self {
        Self {
            position,
            previous: position,
            gesture: Gesture::None,
        }
    }

    /// A drag from `from` to `to` within a single tick.
    pub fn drag(from: [f32; 2], to: [f32; 2]) -> Self {
        Self {
            position: to,
            previous: from,
            gesture: Gesture::Drag,
        }
    }

    /// Map a pixel position to normalised grid space.
    ///
    /// `(x - width/2) / height` horizontally and `(y - height/2) / height`
    /// vertically, so the screen centre maps to the origin. The previous
    /// position is set equal to the new one.
    pub fn from_screen(x: f32, y: f32, screen_width: f32, screen_height: f32) -> Self {
        Self::idle([
            (x - screen_width * 0.5) / screen_height,
            (y - screen_height * 0.5) / screen_height,
        ])
    }

    /// The state for the next tick: the current position becomes `previous`.
    pub fn advance(self, position: [f32; 2], gesture: Gesture) -> Self {
        Self {
            position,
            previous: self.position,
            gesture,
        }
    }

    /// Pointer displacement since the previous tick.
    pub fn delta(&self) -> [f32; 2] {
        [
            self.position[0] - self.previous[0],
            self.position[1] - self.previous[1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_button_wins() {
        assert_eq!(Gesture::from_buttons(true, true), Gesture::Impulse);
        assert_eq!(Gesture::from_buttons(true, false), Gesture::Drag);
        assert_eq!(Gesture::from_buttons(false, false), Gesture::None);
    }

    #[test]
    fn screen_centre_maps_to_origin() {
        let p = PointerState::from_screen(960.0, 540.0, 1920.0, 1080.0);
        assert_eq!(p.position, [0.0, 0.0]);
        let corner = PointerState::from_screen(1920.0, 1080.0, 1920.0, 1080.0);
        assert!((corner.position[0] - 960.0 / 1080.0).abs() < 1e-6);
        assert!((corner.position[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn advance_carries_previous_position() {
        let p = PointerState::idle([0.1, 0.2]).advance([0.3, 0.2], Gesture::Drag);
        assert_eq!(p.previous, [0.1, 0.2]);
        let d = p.delta();
        assert!((d[0] - 0.2).abs() < 1e-6);
        assert_eq!(d[1], 0.0);
    }
}
