//! Snapclip — capture a bound screen region to PNG and export it.
//!
//! Three collaborating pieces:
//! - Capture domain (capture/): turns a [`CaptureTarget`] + scale into a
//!   fresh PNG [`Snapshot`] via a pluggable rasterizing backend.
//! - Export domain (export/): the [`ExportCoordinator`] UIs invoke to
//!   save a snapshot to a file or place it on the system clipboard.
//! - Shortcut binder (shortcut): maps keyboard chords to callbacks with
//!   RAII deregistration, for wiring "Cmd+C copies the preview".
//!
//! A peripheral [`ThemeStore`] (theme) carries the persisted light/dark
//! preference for consumers that style themselves; capture and export
//! never read it.
//!
//! The crate renders no UI of its own. Hosts supply the event plumbing
//! and surface each export outcome as a notification; every operation
//! reports exactly once through its returned `Result`.

pub mod capture;
pub mod export;
pub mod shortcut;
pub mod theme;

pub use capture::{
    CaptureError, CaptureOptions, CaptureService, CaptureTarget, Region, Snapshot,
};
pub use export::{DeliveryError, ExportCoordinator, ExportError, ExportOutcome};
pub use shortcut::{Chord, KeyEvent, ShortcutBinder};
pub use theme::{Theme, ThemeStore};
