//! # Core primitives for the scrubber widget
//!
//! Everything here is host-toolkit agnostic. The pieces:
//!
//! - `geometry` / `color` — the small value types drawing talks in.
//! - `input` — pointer and keyboard events as the host delivers them,
//!   plus the cursor shapes and focus directions the widget asks back
//!   for.
//! - `scene` — `DisplayList`/`DrawCmd`, the instructions a paint pass
//!   produces, and `TextExtent` for measured text.
//! - `binding` — `BoundValue`, the observable numeric property seam to
//!   the host's data layer, with `Property` as the standard
//!   single-threaded implementation and `Subscription` as the RAII
//!   observer guard.
//! - `timer` — an installable `Clock` and a cancellable one-shot timer
//!   queue the host pumps from its event loop.
//! - `effects` — `Dispose`, a run-once cleanup guard for scoped
//!   handler registration.
//! - `error` — the two domain error kinds: a binding rejecting a value
//!   and an edit buffer failing to parse.
//!
//! All state lives on the UI thread; `Rc`/`RefCell` throughout, no
//! locks except around the process-wide clock.

pub mod binding;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prelude;
pub mod scene;
pub mod timer;

pub use binding::*;
pub use color::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use scene::*;
pub use timer::*;
