//! Hit testing: zone-local point → element (and which part of it).
//!
//! Points are mapped into each element's unrotated frame, so handles and
//! bodies rotate with the element exactly as they are painted. The selected
//! element paints above everything else and carries three corner handles;
//! the rest are tested back-to-front in paint order.

use crate::geometry::sin_cos_degrees;
use crate::id::ElementId;
use crate::model::{DesignElement, View};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Top-left corner of the selected element.
    DuplicateHandle,
    /// Top-right corner of the selected element.
    DeleteHandle,
    /// Bottom-right corner of the selected element.
    ResizeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub part: HitPart,
}

/// Map a zone-local point into the element's unrotated frame, relative to
/// its top-left corner.
pub fn to_local(element: &DesignElement, px: f32, py: f32) -> (f32, f32) {
    let (cx, cy) = element.center();
    let (dx, dy) = (px - cx, py - cy);
    let (sin, cos) = sin_cos_degrees(element.rotation);
    let lx = dx * cos + dy * sin;
    let ly = -dx * sin + dy * cos;
    (lx + element.width / 2.0, ly + element.height / 2.0)
}

fn within(lx: f32, ly: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let (dx, dy) = (lx - cx, ly - cy);
    dx * dx + dy * dy <= radius * radius
}

fn hit_handles(element: &DesignElement, lx: f32, ly: f32, radius: f32) -> Option<HitPart> {
    let (w, h) = (element.width, element.height);
    if within(lx, ly, w, h, radius) {
        Some(HitPart::ResizeHandle)
    } else if within(lx, ly, w, 0.0, radius) {
        Some(HitPart::DeleteHandle)
    } else if within(lx, ly, 0.0, 0.0, radius) {
        Some(HitPart::DuplicateHandle)
    } else {
        None
    }
}

fn hit_body(element: &DesignElement, lx: f32, ly: f32) -> bool {
    lx >= 0.0 && lx <= element.width && ly >= 0.0 && ly <= element.height
}

/// Find the topmost element part at `(px, py)` among the elements of `view`.
/// Returns `None` for the empty background.
pub fn hit_test(
    elements: &[DesignElement],
    view: View,
    selected: Option<ElementId>,
    px: f32,
    py: f32,
    handle_radius: f32,
) -> Option<Hit> {
    if let Some(sel) = selected
        && let Some(el) = elements.iter().find(|e| e.id == sel && e.view == view)
    {
        let (lx, ly) = to_local(el, px, py);
        if let Some(part) = hit_handles(el, lx, ly, handle_radius) {
            return Some(Hit { id: el.id, part });
        }
        if hit_body(el, lx, ly) {
            return Some(Hit {
                id: el.id,
                part: HitPart::Body,
            });
        }
    }

    // Last painted = topmost
    elements
        .iter()
        .rev()
        .filter(|e| e.view == view && Some(e.id) != selected)
        .find(|e| {
            let (lx, ly) = to_local(e, px, py);
            hit_body(e, lx, ly)
        })
        .map(|e| Hit {
            id: e.id,
            part: HitPart::Body,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ZoneTag;
    use pretty_assertions::assert_eq;
    use smallvec::SmallVec;

    fn element(name: &str, x: f32, y: f32, rotation: f32) -> DesignElement {
        DesignElement {
            id: ElementId::intern(name),
            src: String::new(),
            x,
            y,
            width: 100.0,
            height: 40.0,
            original_width: 100.0,
            original_height: 40.0,
            rotation,
            colors: SmallVec::new(),
            view: View::Front,
            zone: ZoneTag::Center,
        }
    }

    #[test]
    fn background_misses() {
        let els = vec![element("hit-a", 0.0, 0.0, 0.0)];
        assert_eq!(hit_test(&els, View::Front, None, 200.0, 200.0, 12.0), None);
    }

    #[test]
    fn topmost_wins() {
        let els = vec![
            element("hit-under", 0.0, 0.0, 0.0),
            element("hit-over", 50.0, 0.0, 0.0),
        ];
        let hit = hit_test(&els, View::Front, None, 75.0, 20.0, 12.0).unwrap();
        assert_eq!(hit.id, ElementId::intern("hit-over"));
    }

    #[test]
    fn selected_element_paints_on_top() {
        let els = vec![
            element("hit-sel", 0.0, 0.0, 0.0),
            element("hit-other", 50.0, 0.0, 0.0),
        ];
        let sel = ElementId::intern("hit-sel");
        let hit = hit_test(&els, View::Front, Some(sel), 75.0, 20.0, 12.0).unwrap();
        assert_eq!(hit.id, sel);
    }

    #[test]
    fn handles_only_on_selected() {
        let els = vec![element("hit-handles", 50.0, 50.0, 0.0)];
        let id = ElementId::intern("hit-handles");
        let at = |x, y, sel| hit_test(&els, View::Front, sel, x, y, 12.0).map(|h| h.part);

        assert_eq!(at(150.0, 90.0, Some(id)), Some(HitPart::ResizeHandle));
        assert_eq!(at(150.0, 50.0, Some(id)), Some(HitPart::DeleteHandle));
        assert_eq!(at(45.0, 45.0, Some(id)), Some(HitPart::DuplicateHandle));
        // Unselected: the corner outside the body is empty space.
        assert_eq!(at(155.0, 95.0, None), None);
    }

    #[test]
    fn rotated_body_follows_rotation() {
        // 100×40 centered at (50, 20), turned 90°: occupies x∈[30,70], y∈[-30,70].
        let els = vec![element("hit-rot", 0.0, 0.0, 90.0)];
        assert!(hit_test(&els, View::Front, None, 50.0, 65.0, 12.0).is_some());
        assert!(hit_test(&els, View::Front, None, 90.0, 20.0, 12.0).is_none());
    }

    #[test]
    fn other_view_is_invisible() {
        let mut el = element("hit-back", 0.0, 0.0, 0.0);
        el.view = View::Back;
        assert_eq!(hit_test(&[el], View::Front, None, 10.0, 10.0, 12.0), None);
    }
}
