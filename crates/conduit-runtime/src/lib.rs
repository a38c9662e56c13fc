//! Subprocess lifecycle, stream normalization loop, and terminal renderer
//! for the conduit agent core. Sits on top of `conduit-providers`'
//! dialect parsers and registry; the CLI and any embedder drive a run
//! through `lifecycle::run`.

pub mod accumulator;
pub mod diag;
pub mod killgroup;
pub mod lifecycle;
pub mod renderer;
pub mod stream_loop;

pub use accumulator::TextAccumulator;
pub use lifecycle::run;
pub use renderer::Renderer;
pub use stream_loop::{StreamLoopInput, StreamLoopOutcome};
