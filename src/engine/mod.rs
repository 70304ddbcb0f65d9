//! Banner rendering engine
//!
//! Templates, typography and the compositor that produces the final image.

pub mod compositor;
pub mod template;
pub mod typography;

pub use compositor::Compositor;
pub use template::{TemplateId, TemplateLibrary, TEMPLATE_COUNT};
pub use typography::FontBook;
