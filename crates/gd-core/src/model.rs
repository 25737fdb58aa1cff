//! Element data model for garment designs.
//!
//! A design is a flat list of [`DesignElement`]s, each pinned to one
//! [`View`] of the garment. Positions are zone-local: `(0, 0)` is the
//! top-left of the placement zone and `(x, y)` is the top-left of the
//! element's *unrotated* box. Rotation happens about the box center.

use crate::id::ElementId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// An 8-bit RGB color, as produced by the palette sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, uppercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `rgb(r,g,b)` or `#RRGGBB`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }
        let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(r, g, b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Serialized as a CSS color string so hosts can paint swatches directly.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

/// Dominant colors of an upload, most frequent first.
pub type Palette = SmallVec<[Rgb; 6]>;

/// Garment fabric color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentColor {
    #[default]
    Red,
    Blue,
    Black,
    White,
    Gray,
}

impl GarmentColor {
    pub const ALL: [GarmentColor; 5] = [
        GarmentColor::Red,
        GarmentColor::Blue,
        GarmentColor::Black,
        GarmentColor::White,
        GarmentColor::Gray,
    ];

    /// Swatch color shown in the product bar.
    pub fn hex(self) -> &'static str {
        match self {
            GarmentColor::Red => "#ef4444",
            GarmentColor::Blue => "#3b82f6",
            GarmentColor::Black => "#1a1a1a",
            GarmentColor::White => "#fafafa",
            GarmentColor::Gray => "#6b7280",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GarmentColor::Red => "Red",
            GarmentColor::Blue => "Blue",
            GarmentColor::Black => "Black",
            GarmentColor::White => "White",
            GarmentColor::Gray => "Gray",
        }
    }

    /// Parse the lowercase identifier used by hosts (`"red"`, `"gray"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

// ─── Views & zones ───────────────────────────────────────────────────────

/// Which side of the garment an element is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Front,
    Back,
}

impl View {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "front" => Some(View::Front),
            "back" => Some(View::Back),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
        }
    }
}

/// Print zone an element is assigned to. Only the center zone exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneTag {
    #[default]
    Center,
}

/// Size of the placement zone. Fixed per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub width: f32,
    pub height: f32,
}

impl ZoneBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for ZoneBounds {
    fn default() -> Self {
        Self::new(250.0, 350.0)
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// One placed image on one view of the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignElement {
    pub id: ElementId,
    /// Host-side reference to the pixel source (data URL, blob URL, path).
    pub src: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Decoded size of the upload. Never changes after creation.
    pub original_width: f32,
    pub original_height: f32,
    /// Degrees, always within [-180, 180].
    pub rotation: f32,
    pub colors: Palette,
    pub view: View,
    pub zone: ZoneTag,
}

impl DesignElement {
    /// Width over height of the original upload. Resizes derive height from
    /// this instead of the current size so repeated resizes don't drift.
    pub fn aspect_ratio(&self) -> f32 {
        self.original_width / self.original_height
    }

    /// Apply a partial update. Only the named fields change.
    pub fn apply(&mut self, update: &ElementUpdate) {
        if let Some((x, y)) = update.position {
            self.x = x;
            self.y = y;
        }
        if let Some((w, h)) = update.size {
            self.width = w;
            self.height = h;
        }
        if let Some(r) = update.rotation {
            self.rotation = normalize_rotation(r);
        }
    }

    /// Printed size in inches, as shown in the edit panel.
    pub fn size_inches(&self, units_per_inch: f32) -> (f32, f32) {
        (self.width / units_per_inch, self.height / units_per_inch)
    }

    /// Center of the unrotated box (the rotation pivot).
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A shallow partial update to an element's geometry.
///
/// Only position, size and rotation can be patched; everything else about an
/// element is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementUpdate {
    pub position: Option<(f32, f32)>,
    pub size: Option<(f32, f32)>,
    pub rotation: Option<f32>,
}

impl ElementUpdate {
    pub fn moved_to(x: f32, y: f32) -> Self {
        Self {
            position: Some((x, y)),
            ..Self::default()
        }
    }

    pub fn resized_to(width: f32, height: f32) -> Self {
        Self {
            size: Some((width, height)),
            ..Self::default()
        }
    }

    pub fn rotated_to(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.size.is_none() && self.rotation.is_none()
    }
}

/// Reduce an angle in degrees to the canonical range [-180, 180].
/// Values already inside the range are returned unchanged; non-finite input becomes 0.
pub fn normalize_rotation(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
