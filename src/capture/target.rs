//! Capture target handles — the link between a mounted UI surface
//! and the capture service.
//!
//! The embedding UI binds a concrete screen region when the surface it
//! wants to snapshot appears, and unbinds when it goes away. The handle
//! itself is cheap to clone and may legitimately be unbound at capture
//! time (conditionally rendered surfaces, async mounts); callers of the
//! capture service get a distinct "not bound" failure in that case.

use std::sync::{Arc, Mutex};

/// A rectangle in screen pixels, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    region: Option<Region>,
}

/// Handle to a renderable region eligible for snapshotting.
///
/// Starts unbound. The UI that owns the region calls [`bind`](Self::bind)
/// on mount and holds the returned guard; dropping the guard unbinds the
/// handle again. Clones share the same underlying slot.
#[derive(Clone, Default)]
pub struct CaptureTarget {
    slot: Arc<Mutex<Slot>>,
}

impl CaptureTarget {
    /// Creates a new, unbound handle.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Binds `region` to this handle for the lifetime of the returned guard.
    ///
    /// A second bind replaces the first; the displaced guard becomes inert
    /// and will not unbind the newer region when dropped.
    pub fn bind(&self, region: Region) -> TargetBinding {
        let mut slot = self.slot.lock().unwrap();
        slot.generation += 1;
        slot.region = Some(region);
        TargetBinding {
            slot: Arc::clone(&self.slot),
            generation: slot.generation,
        }
    }

    /// The currently bound region, if any.
    pub fn current(&self) -> Option<Region> {
        self.slot.lock().unwrap().region
    }

    pub fn is_bound(&self) -> bool {
        self.current().is_some()
    }
}

impl std::fmt::Debug for CaptureTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureTarget")
            .field("region", &self.current())
            .finish()
    }
}

/// Guard returned by [`CaptureTarget::bind`]. Unbinds the target on drop,
/// so a surface that unmounts can never leave a stale region behind.
#[must_use = "dropping the binding immediately unbinds the target"]
pub struct TargetBinding {
    slot: Arc<Mutex<Slot>>,
    generation: u64,
}

impl Drop for TargetBinding {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation == self.generation {
            slot.region = None;
        }
    }
}
