pub mod canvas;
pub mod gpu_context;
pub mod gpu_types;
pub mod interaction;
pub mod layout;
pub mod render_loop;
pub mod scale;
pub mod sprite;
pub mod target;
pub mod transform;
pub mod viewport;

pub use canvas::PlotCanvas;
pub use interaction::{FrameSink, InteractionBridge};
pub use layout::PlotLayout;
pub use render_loop::RenderLoop;
pub use transform::{TransformPair, ZoomState};
pub use viewport::Viewport;
