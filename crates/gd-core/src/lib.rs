pub mod config;
pub mod geometry;
pub mod hit;
pub mod id;
pub mod ingest;
pub mod model;
pub mod palette;

pub use config::{DesignerConfig, PaletteConfig};
pub use geometry::{
    Placement, ResizeRequest, clamp_position, propose_resize, rotated_bounds, size_is_valid,
};
pub use hit::{Hit, HitPart, hit_test};
pub use id::ElementId;
pub use ingest::{DecodedImage, IngestError};
pub use model::*;
