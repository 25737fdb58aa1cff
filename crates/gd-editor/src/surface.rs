//! Composition surface: the single owner of design state.
//!
//! The surface holds every element of both views, the selection, the active
//! view and the garment color. All mutation goes through it. Intents from
//! the interaction controller, panel edits and uploads alike. After any
//! geometry change it re-clamps the element so the rotated box never rests
//! outside the zone.

use crate::interaction::Intent;
use gd_core::config::DesignerConfig;
use gd_core::geometry::{Placement, clamp_position, size_is_valid};
use gd_core::hit::{Hit, hit_test};
use gd_core::id::ElementId;
use gd_core::ingest::{DecodedImage, create_element};
use gd_core::model::*;

pub struct DesignSurface {
    /// All elements of both views, in paint order.
    elements: Vec<DesignElement>,
    selected: Option<ElementId>,
    view: View,
    garment: GarmentColor,
    config: DesignerConfig,
    /// Set between `InteractionStart` and `InteractionEnd`; drives zone guides.
    interacting: bool,
}

impl Default for DesignSurface {
    fn default() -> Self {
        Self::new(DesignerConfig::default())
    }
}

impl DesignSurface {
    pub fn new(config: DesignerConfig) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            view: View::Front,
            garment: GarmentColor::default(),
            config,
            interacting: false,
        }
    }

    // ─── Intents ─────────────────────────────────────────────────────────

    /// Apply one intent. Returns `true` if visible state changed.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        log::trace!("intent {intent:?}");
        match intent {
            Intent::Select(id) => self.select(id),
            Intent::Update { id, update } => self.update(id, &update),
            Intent::Delete(id) => self.delete(id),
            Intent::Duplicate(id) => self.duplicate(id).is_some(),
            Intent::InteractionStart => !std::mem::replace(&mut self.interacting, true),
            Intent::InteractionEnd => std::mem::replace(&mut self.interacting, false),
        }
    }

    /// Select `Some(id)` exclusively, or clear the selection with `None`.
    /// Unknown IDs are ignored.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        if let Some(id) = id
            && self.get(id).is_none()
        {
            return false;
        }
        let changed = self.selected != id;
        self.selected = id;
        changed
    }

    /// Shallow-merge `update` into the element, then pull it back into the
    /// zone if the new geometry pushed the rotated box outside.
    ///
    /// A size that is non-finite, non-positive, below the resize floor or off
    /// the original aspect ratio rejects the whole update.
    pub fn update(&mut self, id: ElementId, update: &ElementUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let zone = self.config.zone;
        let min_scale = self.config.min_scale;
        let Some(el) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some((w, h)) = update.size
            && !size_is_valid(el, w, h, min_scale)
        {
            log::debug!("rejected size {w}x{h} for {id}");
            return false;
        }
        let before = Placement::of(el);
        el.apply(update);
        let (x, y) = clamp_position(&Placement::of(el), el.x, el.y, zone);
        el.x = x;
        el.y = y;
        Placement::of(el) != before
    }

    /// Remove the element. Clears the selection if it pointed at it.
    pub fn delete(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.elements.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("deleted {id}");
        true
    }

    /// Clone the element under a fresh ID, offset on both axes, and select
    /// the copy. Returns the new ID.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let mut copy = self.get(id)?.clone();
        copy.id = ElementId::fresh();
        let offset = self.config.duplicate_offset;
        let (x, y) = clamp_position(
            &Placement::of(&copy),
            copy.x + offset,
            copy.y + offset,
            self.config.zone,
        );
        copy.x = x;
        copy.y = y;
        let new_id = copy.id;
        self.elements.push(copy);
        self.selected = Some(new_id);
        log::debug!("duplicated {id} as {new_id}");
        Some(new_id)
    }

    // ─── Uploads ─────────────────────────────────────────────────────────

    /// Add an element as-is (already decoded and sized) and select it.
    /// An element whose ID is already taken is stored under a fresh one;
    /// the returned ID is the one actually used.
    pub fn add_element(&mut self, mut element: DesignElement) -> ElementId {
        if self.get(element.id).is_some() {
            let fresh = ElementId::fresh();
            log::debug!("id {} already in use, re-keyed as {fresh}", element.id);
            element.id = fresh;
        }
        let id = element.id;
        self.elements.push(element);
        self.selected = Some(id);
        id
    }

    /// Create an element from decoded pixels on the active view and select it.
    pub fn ingest(&mut self, src: impl Into<String>, image: &DecodedImage) -> ElementId {
        let element = create_element(src, image, self.view, &self.config);
        self.add_element(element)
    }

    /// Validate, decode and add an encoded upload. On error nothing changes.
    #[cfg(feature = "decode")]
    pub fn ingest_bytes(
        &mut self,
        src: impl Into<String>,
        mime: &str,
        bytes: &[u8],
    ) -> Result<ElementId, gd_core::IngestError> {
        let element = gd_core::ingest::ingest_bytes(src, mime, bytes, self.view, &self.config)
            .inspect_err(|e| log::warn!("upload rejected: {e}"))?;
        Ok(self.add_element(element))
    }

    // ─── Panel edits ─────────────────────────────────────────────────────

    /// Set rotation in degrees (normalized to [-180, 180]).
    pub fn set_rotation(&mut self, id: ElementId, degrees: f32) -> bool {
        self.update(id, &ElementUpdate::rotated_to(degrees))
    }

    pub fn reset_rotation(&mut self, id: ElementId) -> bool {
        self.set_rotation(id, 0.0)
    }

    /// Switch the visible side. A selection on the other side is cleared.
    ///
    /// This does not end a drag or resize in progress; inside a session,
    /// switch through [`Designer::set_view`](crate::session::Designer::set_view).
    pub fn set_view(&mut self, view: View) -> bool {
        if self.view == view {
            return false;
        }
        self.view = view;
        if self.selected_element().is_none() {
            self.selected = None;
        }
        true
    }

    pub fn set_garment_color(&mut self, color: GarmentColor) -> bool {
        let changed = self.garment != color;
        self.garment = color;
        changed
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn get(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// All elements of both views, in paint order.
    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    /// Elements on the active view, in paint order.
    pub fn elements_in_view(&self) -> impl Iterator<Item = &DesignElement> {
        self.elements.iter().filter(move |e| e.view == self.view)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, if it is on the active view.
    pub fn selected_element(&self) -> Option<&DesignElement> {
        self.selected
            .and_then(|id| self.get(id))
            .filter(|e| e.view == self.view)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn garment_color(&self) -> GarmentColor {
        self.garment
    }

    pub fn zone(&self) -> ZoneBounds {
        self.config.zone
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// What lies under the zone-local point on the active view.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        hit_test(
            &self.elements,
            self.view,
            self.selected,
            x,
            y,
            self.config.handle_radius,
        )
    }
}
