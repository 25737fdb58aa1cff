//! WASM bridge for GD — exposes the designer session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page decodes uploads with
//! an offscreen canvas and passes RGBA pixels; everything else (placement,
//! clamping, palettes, selection) happens here.

mod console;

use gd_core::config::DesignerConfig;
use gd_core::id::ElementId;
use gd_core::ingest::{DecodedImage, IngestError, check_media_type};
use gd_core::model::{DesignElement, GarmentColor, View};
use gd_editor::Designer;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing designer controller.
///
/// Holds one designer session. Pointer coordinates are zone-local unless
/// `canvas_coordinates` was requested at construction.
#[wasm_bindgen]
pub struct DesignerCanvas {
    designer: Designer,
    canvas_coordinates: bool,
}

#[wasm_bindgen]
impl DesignerCanvas {
    /// Create a session. `config_json` may be empty or any subset of
    /// `DesignerConfig` fields; an unreadable config falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, canvas_coordinates: bool) -> Self {
        console::install();

        let config = parse_config(config_json).unwrap_or_else(|e| {
            log::warn!("invalid designer config, using defaults: {e}");
            DesignerConfig::default()
        });
        Self {
            designer: Designer::new(config),
            canvas_coordinates,
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Handle pointer down. Returns JSON:
    /// `{"changed":bool,"interacting":bool,"selected":"<id>"|null}`
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> String {
        let (x, y) = self.to_zone(x, y);
        let changed = self.designer.handle_pointer_down(x, y);
        self.pointer_result(changed)
    }

    /// Handle pointer move, from a window-level listener.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> String {
        let (x, y) = self.to_zone(x, y);
        let changed = self.designer.handle_pointer_move(x, y);
        self.pointer_result(changed)
    }

    /// Handle pointer up, from a window-level listener. Always ends any
    /// drag or resize, wherever the pointer is.
    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> String {
        let (x, y) = self.to_zone(x, y);
        let changed = self.designer.handle_pointer_up(x, y);
        self.pointer_result(changed)
    }

    /// Abandon the current gesture (pointer capture lost, tab hidden).
    pub fn cancel_interaction(&mut self) -> bool {
        self.designer.cancel_interaction()
    }

    // ─── Uploads ─────────────────────────────────────────────────────────

    /// Add an upload from decoded RGBA pixels. Returns JSON:
    /// `{"ok":true,"id":"<id>"}` or `{"ok":false,"error":"..."}`.
    pub fn ingest_rgba(
        &mut self,
        src: &str,
        mime: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> String {
        match self.ingest(src, mime, width, height, rgba) {
            Ok(id) => serde_json::json!({ "ok": true, "id": id.as_str() }).to_string(),
            Err(e) => {
                log::warn!("upload rejected: {e}");
                serde_json::json!({ "ok": false, "error": e.to_string() }).to_string()
            }
        }
    }

    // ─── Selection & commands ────────────────────────────────────────────

    /// Select an element by ID. An empty ID clears the selection.
    /// Returns `true` if the element was found (or the selection cleared).
    pub fn select_by_id(&mut self, element_id: &str) -> bool {
        if element_id.is_empty() {
            self.designer.select(None);
            return true;
        }
        let id = ElementId::intern(element_id);
        if self.designer.surface.get(id).is_none() {
            return false;
        }
        self.designer.select(Some(id));
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        self.designer.delete_selected()
    }

    /// Duplicate the selected element. Returns the new ID, or `""`.
    pub fn duplicate_selected(&mut self) -> String {
        self.designer
            .duplicate_selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Rotate the selected element (slider, −180..180 degrees).
    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        self.designer.set_rotation(degrees)
    }

    pub fn reset_rotation(&mut self) -> bool {
        self.designer.reset_rotation()
    }

    /// Switch to `"front"` or `"back"`.
    pub fn set_view(&mut self, view: &str) -> bool {
        match View::from_name(view) {
            Some(v) => self.designer.set_view(v),
            None => {
                log::warn!("unknown view {view:?}");
                false
            }
        }
    }

    pub fn get_view(&self) -> String {
        self.designer.surface.view().as_str().to_string()
    }

    pub fn set_garment_color(&mut self, color: &str) -> bool {
        match GarmentColor::from_name(color) {
            Some(c) => self.designer.set_garment_color(c),
            None => {
                log::warn!("unknown garment color {color:?}");
                false
            }
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.designer.surface.is_interacting()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Elements of the current view in paint order, as a JSON array.
    pub fn elements_json(&self) -> String {
        let elements: Vec<&DesignElement> = self.designer.surface.elements_in_view().collect();
        to_json_or(&elements, "[]")
    }

    /// Elements of both views, as a JSON array.
    pub fn all_elements_json(&self) -> String {
        to_json_or(self.designer.surface.elements(), "[]")
    }

    /// The selected element plus its physical size, or `null`.
    pub fn selected_json(&self) -> String {
        let Some(el) = self.designer.surface.selected_element() else {
            return "null".to_string();
        };
        let mut props = match serde_json::to_value(el) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return "null".to_string(),
        };
        let (w_in, h_in) = el.size_inches(self.designer.surface.config().units_per_inch);
        props.insert(
            "sizeInches".into(),
            serde_json::json!({ "width": w_in, "height": h_in }),
        );
        serde_json::Value::Object(props).to_string()
    }

    /// Zone size and its origin on the garment canvas.
    pub fn zone_json(&self) -> String {
        let config = self.designer.surface.config();
        let (ox, oy) = config.zone_origin();
        serde_json::json!({
            "width": config.zone.width,
            "height": config.zone.height,
            "originX": ox,
            "originY": oy,
        })
        .to_string()
    }

    /// Current garment color and the full swatch list.
    pub fn garment_json(&self) -> String {
        let current = self.designer.surface.garment_color();
        let swatches: Vec<serde_json::Value> = GarmentColor::ALL
            .into_iter()
            .map(|c| serde_json::json!({ "color": c, "name": c.name(), "hex": c.hex() }))
            .collect();
        serde_json::json!({
            "color": current,
            "name": current.name(),
            "hex": current.hex(),
            "swatches": swatches,
        })
        .to_string()
    }
}

impl DesignerCanvas {
    fn to_zone(&self, x: f32, y: f32) -> (f32, f32) {
        if self.canvas_coordinates {
            let (ox, oy) = self.designer.surface.config().zone_origin();
            (x - ox, y - oy)
        } else {
            (x, y)
        }
    }

    fn pointer_result(&self, changed: bool) -> String {
        serde_json::json!({
            "changed": changed,
            "interacting": self.designer.surface.is_interacting(),
            "selected": self.designer.surface.selected().map(|id| id.as_str().to_string()),
        })
        .to_string()
    }

    fn ingest(
        &mut self,
        src: &str,
        mime: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<ElementId, IngestError> {
        check_media_type(mime)?;
        let image = DecodedImage::from_rgba(width, height, rgba.to_vec())?;
        Ok(self.designer.surface.ingest(src, &image))
    }
}

fn parse_config(json: &str) -> Result<DesignerConfig, serde_json::Error> {
    if json.trim().is_empty() {
        return Ok(DesignerConfig::default());
    }
    serde_json::from_str(json)
}

fn to_json_or<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

// ─── Standalone helpers (no session needed) ──────────────────────────────

/// Default configuration as JSON, for hosts that want to tweak and pass it
/// back to the constructor.
#[wasm_bindgen]
pub fn default_config_json() -> String {
    to_json_or(&DesignerConfig::default(), "{}")
}
