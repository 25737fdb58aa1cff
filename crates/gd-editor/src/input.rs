//! Input abstraction layer.
//!
//! Hosts translate mouse, touch and pen events into zone-local
//! `InputEvent`s. Moves and releases are delivered from a global listener,
//! so they may land anywhere, including outside the zone.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                (x, y)
            }
        }
    }

    /// Convert canvas coordinates into zone-local ones.
    pub fn relative_to(self, origin: (f32, f32)) -> Self {
        let (ox, oy) = origin;
        match self {
            Self::PointerDown { x, y } => Self::PointerDown {
                x: x - ox,
                y: y - oy,
            },
            Self::PointerMove { x, y } => Self::PointerMove {
                x: x - ox,
                y: y - oy,
            },
            Self::PointerUp { x, y } => Self::PointerUp {
                x: x - ox,
                y: y - oy,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_shifts_by_origin() {
        let ev = InputEvent::PointerMove { x: 200.0, y: 100.0 }.relative_to((125.0, 75.0));
        assert_eq!(ev, InputEvent::PointerMove { x: 75.0, y: 25.0 });
        assert_eq!(ev.position(), (75.0, 25.0));
    }
}
