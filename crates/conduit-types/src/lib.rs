//! Canonical event model shared by every provider parser, the stream loop,
//! the renderer, and the recorder. No crate outside `conduit-providers` and
//! `conduit-runtime` should need to reach past these types.

pub mod cancel;
pub mod content_block;
pub mod error;
pub mod event;
pub mod launch;
pub mod offer;
pub mod raw_event;
pub mod recorder;
pub mod result;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use content_block::{ContentBlock, TextBlock, ToolResultContent};
pub use error::{Error, Result};
pub use event::{CanonicalEvent, Delta, EventKind, Message, ResultFields, Usage};
pub use launch::{LaunchConfig, StderrSink};
pub use offer::{offer, offer_cancellable, DropCounter};
pub use raw_event::RawEvent;
pub use recorder::{NullRecorder, Recorder};
pub use result::RunResult;
