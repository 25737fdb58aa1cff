//! Rotation-aware placement geometry.
//!
//! Elements rotate about their own center, so a rotated element occupies an
//! axis-aligned box that differs from its unrotated footprint by a *margin*
//! on each side (positive when rotation grows the box, negative when a
//! 90° turn of a wide element narrows it). Drag and resize both keep that
//! rotated box inside the placement zone:
//!
//! - drags are **clamped**: the proposed position is pulled back into range;
//! - resizes are **rejected**: a proposal that would not fit at the current
//!   position is dropped for that tick, and the element keeps its size.
//!
//! All functions are O(1) and allocation-free; they run on every pointer move.

use crate::model::{DesignElement, ZoneBounds};

/// Geometry of an element as seen by the clamping math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees.
    pub rotation: f32,
}

impl Placement {
    pub fn of(element: &DesignElement) -> Self {
        Self {
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
            rotation: element.rotation,
        }
    }

    /// Size of the axis-aligned box around the rotated element.
    pub fn rotated_size(&self) -> (f32, f32) {
        rotated_bounds(self.width, self.height, self.rotation)
    }

    /// Extra clearance rotation adds on each side: `(marginX, marginY)`.
    pub fn margins(&self) -> (f32, f32) {
        rotation_margins(self.width, self.height, self.rotation)
    }

    /// The rotated box as `(min_x, min_y, max_x, max_y)` in zone coordinates.
    pub fn rotated_aabb(&self) -> (f32, f32, f32, f32) {
        let (mx, my) = self.margins();
        (
            self.x - mx,
            self.y - my,
            self.x + self.width + mx,
            self.y + self.height + my,
        )
    }

    /// Whether the rotated box lies entirely inside the zone.
    pub fn fits(&self, zone: ZoneBounds) -> bool {
        let (min_x, min_y, max_x, max_y) = self.rotated_aabb();
        min_x >= 0.0 && max_x <= zone.width && min_y >= 0.0 && max_y <= zone.height
    }
}

/// Sine and cosine of an angle in degrees. Quarter turns are exact so that
/// 0°/90°/180° boxes come out without floating-point residue.
pub fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let turned = degrees.rem_euclid(360.0);
    if turned % 90.0 == 0.0 {
        return match turned as u32 {
            0 | 360 => (0.0, 1.0),
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    turned.to_radians().sin_cos()
}

/// Axis-aligned bounding box size of a `width × height` rectangle rotated
/// by `rotation` degrees about its center.
pub fn rotated_bounds(width: f32, height: f32, rotation: f32) -> (f32, f32) {
    let (sin, cos) = sin_cos_degrees(rotation);
    (
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}

/// Half the growth of the rotated box over the unrotated one, per axis.
pub fn rotation_margins(width: f32, height: f32, rotation: f32) -> (f32, f32) {
    let (bound_w, bound_h) = rotated_bounds(width, height, rotation);
    ((bound_w - width) / 2.0, (bound_h - height) / 2.0)
}

/// Clamp `value` into `[min, max]`.
///
/// When the range is inverted (the rotated box is larger than the zone) the
/// result collapses to the midpoint, which centers the box on the zone.
/// A non-finite `value` collapses to `min`; non-finite bounds collapse to 0.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if !min.is_finite() || !max.is_finite() {
        return 0.0;
    }
    if min > max {
        return (min + max) / 2.0;
    }
    if !value.is_finite() {
        return min;
    }
    value.clamp(min, max)
}

/// Clamp a proposed top-left position so the rotated box stays in the zone.
/// Size and rotation of `placement` are used; its position is ignored.
///
/// The rotated box spans `[x - margin, x + size + margin]`, so the valid
/// range per axis is `[margin, zone - size - margin]`. A negative margin
/// (wide element turned 90°) lets `x` go below zero.
///
/// The lower bound is `+margin`, not `-margin`: only then does the rotated
/// box stay inside the zone at the minimum.
pub fn clamp_position(
    placement: &Placement,
    proposed_x: f32,
    proposed_y: f32,
    zone: ZoneBounds,
) -> (f32, f32) {
    let (mx, my) = placement.margins();
    let x = clamp_axis(proposed_x, mx, zone.width - placement.width - mx);
    let y = clamp_axis(proposed_y, my, zone.height - placement.height - my);
    (x, y)
}

/// Resize policy: aspect ratio comes from the original upload and widths
/// below `min_scale × original_width` are raised to that floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    /// Width when the resize gesture started.
    pub start_width: f32,
    /// Horizontal pointer travel since the gesture started.
    pub delta_x: f32,
    pub min_scale: f32,
}

/// Propose a new `(width, height)` for `element`, or `None` if the proposal
/// would push the rotated box out of the zone at the element's current
/// position.
pub fn propose_resize(
    element: &DesignElement,
    request: ResizeRequest,
    zone: ZoneBounds,
) -> Option<(f32, f32)> {
    let aspect = element.aspect_ratio();
    if !aspect.is_finite() || aspect <= 0.0 || !request.delta_x.is_finite() {
        return None;
    }

    let floor = element.original_width * request.min_scale;
    let width = floor.max(request.start_width + request.delta_x);
    let height = width / aspect;

    let proposal = Placement {
        x: element.x,
        y: element.y,
        width,
        height,
        rotation: element.rotation,
    };
    proposal.fits(zone).then_some((width, height))
}

/// Whether `(width, height)` is an acceptable size for `element`: finite,
/// positive, at least `min_scale × original_width`, and on the original
/// aspect ratio (relative tolerance 1e-3).
pub fn size_is_valid(element: &DesignElement, width: f32, height: f32, min_scale: f32) -> bool {
    let aspect = element.aspect_ratio();
    if !aspect.is_finite() || aspect <= 0.0 {
        return false;
    }
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return false;
    }
    let floor = element.original_width * min_scale;
    width >= floor - 1e-3 && ((width / height) - aspect).abs() <= aspect * 1e-3
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ZONE: ZoneBounds = ZoneBounds::new(250.0, 350.0);

    fn placement(width: f32, height: f32, rotation: f32) -> Placement {
        Placement {
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation,
        }
    }

    #[test]
    fn quarter_turns_are_exact() {
        assert_eq!(rotated_bounds(120.0, 80.0, 0.0), (120.0, 80.0));
        assert_eq!(rotated_bounds(120.0, 80.0, 180.0), (120.0, 80.0));
        assert_eq!(rotated_bounds(120.0, 80.0, -180.0), (120.0, 80.0));
        assert_eq!(rotated_bounds(120.0, 80.0, 90.0), (80.0, 120.0));
        assert_eq!(rotated_bounds(120.0, 80.0, -90.0), (80.0, 120.0));
    }

    #[test]
    fn forty_five_degrees_grows_both_axes() {
        let (w, h) = rotated_bounds(100.0, 100.0, 45.0);
        let expected = 100.0 * std::f32::consts::SQRT_2;
        assert!((w - expected).abs() < 1e-3, "w={w}");
        assert!((h - expected).abs() < 1e-3, "h={h}");
    }

    #[test]
    fn drag_far_past_the_corner_clamps_to_max() {
        let p = placement(120.0, 80.0, 0.0);
        assert_eq!(clamp_position(&p, 500.0, 500.0, ZONE), (130.0, 270.0));
    }

    #[test]
    fn quarter_turn_of_wide_element_has_negative_x_margin() {
        // 120×80 turned 90° occupies 80×120: marginX = -20, marginY = +20.
        let p = placement(120.0, 80.0, 90.0);
        assert_eq!(p.margins(), (-20.0, 20.0));
        assert_eq!(clamp_position(&p, 0.0, 0.0, ZONE), (0.0, 20.0));
        assert_eq!(clamp_position(&p, -100.0, -100.0, ZONE), (-20.0, 20.0));
        assert_eq!(clamp_position(&p, 999.0, 999.0, ZONE), (150.0, 250.0));

        let at_min = Placement {
            x: -20.0,
            y: 20.0,
            ..p
        };
        assert_eq!(at_min.rotated_aabb(), (0.0, 0.0, 80.0, 120.0));
    }

    #[test]
    fn oversized_element_is_centered() {
        let p = placement(400.0, 100.0, 0.0);
        let (x, y) = clamp_position(&p, 0.0, 10.0, ZONE);
        assert_eq!(x, -75.0);
        assert_eq!(y, 10.0);
    }

    #[test]
    fn clamped_drag_at_forty_five_degrees_stays_inside() {
        let p = placement(100.0, 60.0, 45.0);
        for (px, py) in [(-500.0, -500.0), (500.0, 500.0), (-500.0, 500.0), (60.0, 90.0)] {
            let (x, y) = clamp_position(&p, px, py, ZONE);
            let (min_x, min_y, max_x, max_y) = Placement { x, y, ..p }.rotated_aabb();
            assert!(min_x >= -1e-3 && min_y >= -1e-3, "({min_x}, {min_y})");
            assert!(max_x <= ZONE.width + 1e-3 && max_y <= ZONE.height + 1e-3);
        }
    }

    #[test]
    fn non_finite_proposal_does_not_leak_nan() {
        let p = placement(50.0, 50.0, 30.0);
        let (x, y) = clamp_position(&p, f32::NAN, f32::INFINITY, ZONE);
        assert!(x.is_finite() && y.is_finite());
        assert!(Placement { x, y, ..p }.fits(ZONE));
    }

    #[test]
    fn non_finite_size_collapses_to_origin() {
        let p = placement(f32::INFINITY, f32::INFINITY, 0.0);
        assert_eq!(clamp_position(&p, 10.0, 10.0, ZONE), (0.0, 0.0));
        let p = placement(f32::NAN, 40.0, 30.0);
        assert_eq!(clamp_position(&p, 10.0, 10.0, ZONE).0, 0.0);
    }

    #[test]
    fn fits_checks_rotated_box() {
        let at_origin = Placement {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
        };
        assert!(at_origin.fits(ZONE));
        assert!(
            !Placement {
                rotation: 45.0,
                ..at_origin
            }
            .fits(ZONE)
        );
    }
}
