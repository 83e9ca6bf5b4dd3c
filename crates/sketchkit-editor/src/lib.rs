//! SketchKit editor: the document model and editing engine for 2D vector
//! drawings.
//!
//! The crate is organized around three layers:
//!
//! - [`model`]: the shape variants (line, rectangle, ellipse, polygon, text,
//!   group) and the [`model::DrawableShape`] contract they share.
//! - [`drawing`]: the ordered shape container with synchronous change
//!   notification.
//! - [`commands`] / [`history`]: reversible edits and the two-stack
//!   undo/redo engine, with [`clipboard`] backing cut/copy/paste.
//!
//! [`session::EditorSession`] ties the layers together for interactive use.
//! Everything is single-threaded by design: one session owns one drawing,
//! and observers run synchronously on the mutating call.

pub mod clipboard;
pub mod commands;
pub mod drawing;
pub mod error;
pub mod history;
pub mod model;
pub mod session;

pub use clipboard::Clipboard;
pub use commands::{ColorTarget, EditorCommand, ReflectAxis};
pub use drawing::{Drawing, DrawingEvent, DrawingEventKind, EventFilter, SubscriptionId};
pub use error::{EditorError, Result};
pub use history::CommandManager;
pub use model::{DrawableShape, Ellipse, Group, Line, Polygon, Rectangle, Shape, ShapeKind, Text};
pub use session::EditorSession;
