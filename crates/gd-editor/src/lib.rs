pub mod input;
pub mod interaction;
pub mod session;
pub mod surface;

pub use input::InputEvent;
pub use interaction::{Intent, InteractionController, InteractionState};
pub use session::Designer;
pub use surface::DesignSurface;
