//! Pointer interaction state machine.
//!
//! The controller turns pointer events into [`Intent`]s for the composition
//! surface. It never mutates elements itself: it reads them, proposes bounded
//! updates, and leaves applying them to the surface.
//!
//! ```text
//!            down on body            down on resize handle
//!   Idle ─────────────────▶ Dragging      Idle ─────────▶ Resizing
//!     ▲                        │            ▲                │
//!     └──── up / cancel ───────┘            └─ up / cancel ──┘
//! ```
//!
//! Every move while active yields at most one update; nothing is debounced
//! or coalesced.

use crate::input::InputEvent;
use gd_core::geometry::{Placement, ResizeRequest, clamp_position, propose_resize};
use gd_core::hit::{Hit, HitPart};
use gd_core::id::ElementId;
use gd_core::model::{DesignElement, ElementUpdate, ZoneBounds};
use smallvec::{SmallVec, smallvec};

/// A request from the controller to the composition surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Make `Some(id)` the sole selection, or clear it.
    Select(Option<ElementId>),
    Update {
        id: ElementId,
        update: ElementUpdate,
    },
    Delete(ElementId),
    Duplicate(ElementId),
    /// A drag or resize began. Used to show zone guides.
    InteractionStart,
    /// The active drag or resize ended.
    InteractionEnd,
}

/// Intents produced by a single event. Never more than two.
pub type Intents = SmallVec<[Intent; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        id: ElementId,
        /// Pointer position minus element position at drag start.
        offset_x: f32,
        offset_y: f32,
    },
    Resizing {
        id: ElementId,
        start_width: f32,
        start_height: f32,
        start_x: f32,
        start_y: f32,
    },
}

pub struct InteractionController {
    state: InteractionState,
    zone: ZoneBounds,
    min_scale: f32,
}

impl InteractionController {
    pub fn new(zone: ZoneBounds, min_scale: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            zone,
            min_scale,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// The element currently being dragged or resized.
    pub fn active_element(&self) -> Option<ElementId> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Dragging { id, .. } | InteractionState::Resizing { id, .. } => {
                Some(id)
            }
        }
    }

    /// Handle one pointer event.
    ///
    /// `hit` is what lies under a pointer-down (ignored for moves and
    /// releases, which come from a global listener). `elements` is the
    /// surface's current element list, read-only.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<Hit>,
        elements: &[DesignElement],
    ) -> Intents {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y, hit, elements),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y, elements),
            InputEvent::PointerUp { .. } => self.cancel().into_iter().collect(),
        }
    }

    /// End any active interaction, as if the pointer had been released.
    /// Returns `InteractionEnd` if one was active.
    pub fn cancel(&mut self) -> Option<Intent> {
        if !self.is_active() {
            return None;
        }
        log::trace!("interaction end: {:?}", self.state);
        self.state = InteractionState::Idle;
        Some(Intent::InteractionEnd)
    }

    fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        hit: Option<Hit>,
        elements: &[DesignElement],
    ) -> Intents {
        // One interaction at a time: a second contact mid-gesture is ignored.
        if self.is_active() {
            return Intents::new();
        }

        let Some(hit) = hit else {
            return smallvec![Intent::Select(None)];
        };
        let Some(el) = elements.iter().find(|e| e.id == hit.id) else {
            return Intents::new();
        };

        match hit.part {
            HitPart::Body => {
                self.state = InteractionState::Dragging {
                    id: el.id,
                    offset_x: x - el.x,
                    offset_y: y - el.y,
                };
                log::trace!("drag start {} at ({x}, {y})", el.id);
                smallvec![Intent::Select(Some(el.id)), Intent::InteractionStart]
            }
            HitPart::ResizeHandle => {
                self.state = InteractionState::Resizing {
                    id: el.id,
                    start_width: el.width,
                    start_height: el.height,
                    start_x: x,
                    start_y: y,
                };
                log::trace!("resize start {} from {}x{}", el.id, el.width, el.height);
                smallvec![Intent::Select(Some(el.id)), Intent::InteractionStart]
            }
            HitPart::DeleteHandle => smallvec![Intent::Delete(el.id)],
            HitPart::DuplicateHandle => smallvec![Intent::Duplicate(el.id)],
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32, elements: &[DesignElement]) -> Intents {
        let Some(id) = self.active_element() else {
            return Intents::new();
        };
        let Some(el) = elements.iter().find(|e| e.id == id) else {
            // The element vanished mid-gesture; release the pointer.
            return self.cancel().into_iter().collect();
        };

        let update = match self.state {
            InteractionState::Dragging {
                offset_x, offset_y, ..
            } => {
                let (nx, ny) =
                    clamp_position(&Placement::of(el), x - offset_x, y - offset_y, self.zone);
                if (nx, ny) == (el.x, el.y) {
                    return Intents::new();
                }
                ElementUpdate::moved_to(nx, ny)
            }
            InteractionState::Resizing {
                start_width,
                start_x,
                ..
            } => {
                let request = ResizeRequest {
                    start_width,
                    delta_x: x - start_x,
                    min_scale: self.min_scale,
                };
                match propose_resize(el, request, self.zone) {
                    Some((w, h)) if (w, h) != (el.width, el.height) => {
                        ElementUpdate::resized_to(w, h)
                    }
                    _ => return Intents::new(),
                }
            }
            InteractionState::Idle => return Intents::new(),
        };
        smallvec![Intent::Update { id, update }]
    }
}
