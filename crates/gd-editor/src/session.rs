//! Designer session: one composition surface driven by one interaction
//! controller.
//!
//! Pointer handlers take zone-local coordinates. Hosts that deliver canvas
//! coordinates should use `handle_canvas_event`, which subtracts the zone
//! origin first.

use crate::input::InputEvent;
use crate::interaction::{InteractionController, InteractionState};
use crate::surface::DesignSurface;
use gd_core::config::DesignerConfig;
use gd_core::id::ElementId;
use gd_core::model::{GarmentColor, View};

pub struct Designer {
    /// Read access and uploads. View switches and deletes should go through
    /// the `Designer` methods, which also end a gesture in progress.
    pub surface: DesignSurface,
    controller: InteractionController,
}

impl Default for Designer {
    fn default() -> Self {
        Self::new(DesignerConfig::default())
    }
}

impl Designer {
    pub fn new(config: DesignerConfig) -> Self {
        let controller = InteractionController::new(config.zone, config.min_scale);
        Self {
            surface: DesignSurface::new(config),
            controller,
        }
    }

    pub fn interaction(&self) -> InteractionState {
        self.controller.state()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Feed one zone-local event through the controller and apply the
    /// resulting intents. Returns `true` if anything visible changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        // The host may have switched view on the surface directly.
        let mut changed = self.end_stale_interaction();
        let hit = match event {
            InputEvent::PointerDown { x, y } => self.surface.hit_test(x, y),
            _ => None,
        };
        let intents = self
            .controller
            .handle(&event, hit, self.surface.elements());
        for intent in intents {
            changed |= self.surface.apply_intent(intent);
        }
        // A handle press may have removed the element being interacted with.
        changed |= self.end_stale_interaction();
        changed
    }

    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerDown { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerUp { x, y })
    }

    /// Same as [`handle_event`](Self::handle_event), with canvas coordinates.
    pub fn handle_canvas_event(&mut self, event: InputEvent) -> bool {
        let origin = self.surface.config().zone_origin();
        self.handle_event(event.relative_to(origin))
    }

    /// Drop any drag or resize in progress, as if the pointer was released.
    pub fn cancel_interaction(&mut self) -> bool {
        match self.controller.cancel() {
            Some(intent) => self.surface.apply_intent(intent),
            None => false,
        }
    }

    /// End the gesture if its element is gone or no longer on the active view.
    fn end_stale_interaction(&mut self) -> bool {
        let view = self.surface.view();
        match self.controller.active_element() {
            Some(id) if self.surface.get(id).is_none_or(|e| e.view != view) => {
                self.cancel_interaction()
            }
            _ => false,
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        self.surface.select(id)
    }

    pub fn delete(&mut self, id: ElementId) -> bool {
        if self.controller.active_element() == Some(id) {
            self.cancel_interaction();
        }
        self.surface.delete(id)
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.surface.selected() {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        let id = self.surface.selected()?;
        self.surface.duplicate(id)
    }

    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        match self.surface.selected() {
            Some(id) => self.surface.set_rotation(id, degrees),
            None => false,
        }
    }

    pub fn reset_rotation(&mut self) -> bool {
        self.set_rotation(0.0)
    }

    /// Switch view. Any interaction in progress is ended first.
    pub fn set_view(&mut self, view: View) -> bool {
        if self.surface.view() == view {
            return false;
        }
        self.cancel_interaction();
        self.surface.set_view(view)
    }

    pub fn set_garment_color(&mut self, color: GarmentColor) -> bool {
        self.surface.set_garment_color(color)
    }
}

impl Drop for Designer {
    fn drop(&mut self) {
        if self.controller.is_active() {
            log::trace!("designer dropped mid-interaction");
            self.cancel_interaction();
        }
    }
}
