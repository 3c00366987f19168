//! Keyboard chord bindings.
//!
//! Hosts pump their key-down events through a [`ShortcutBinder`]; every
//! live binding whose chord matches fires once per event, and the
//! dispatch result tells the host to suppress the event's default
//! handling. Bindings deregister when their [`BindingHandle`] drops, so a
//! surface that unmounts can never leave a dangling callback behind.
//!
//! Focus guards ("don't fire while an input field is active") belong in
//! the supplied callback, not here — the binder has no notion of focus.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// A key identity plus the modifier flags that must be held for a match.
///
/// Matching is permissive: modifiers the chord does not require are
/// ignored, so `Chord::key("c").meta()` also matches Cmd+Ctrl+C. The key
/// compares case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chord {
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Chord {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        event.key.eq_ignore_ascii_case(&self.key)
            && (!self.meta || event.meta)
            && (!self.ctrl || event.ctrl)
            && (!self.alt || event.alt)
            && (!self.shift || event.shift)
    }
}

/// An observed key-down event as reported by the host's input layer.
#[derive(Clone, Debug, Default)]
pub struct KeyEvent {
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Binding {
    chord: Chord,
    callback: Callback,
}

/// Registry of chord → callback bindings for one input scope.
///
/// Multiple binders may be live at once (one per mounted surface); each
/// independently matches every event its host feeds it.
#[derive(Clone, Default)]
pub struct ShortcutBinder {
    bindings: Arc<Mutex<BTreeMap<u64, Binding>>>,
    next_id: Arc<AtomicU64>,
}

impl ShortcutBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to fire on `chord` until the returned handle
    /// is dropped.
    pub fn bind(
        &self,
        chord: Chord,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> BindingHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::debug!("Registered shortcut {:?} (binding {})", chord, id);
        self.bindings.lock().unwrap().insert(
            id,
            Binding {
                chord,
                callback: Arc::new(callback),
            },
        );
        BindingHandle {
            id,
            bindings: Arc::downgrade(&self.bindings),
        }
    }

    /// Feeds one key-down event to every live binding, firing each match
    /// exactly once. Returns `true` when at least one binding matched and
    /// the host should suppress the event's default behavior.
    pub fn dispatch(&self, event: &KeyEvent) -> bool {
        // Collect matches before invoking so a callback that binds or
        // unbinds shortcuts doesn't deadlock on the registry lock.
        let matched: Vec<Callback> = {
            let bindings = self.bindings.lock().unwrap();
            bindings
                .values()
                .filter(|b| b.chord.matches(event))
                .map(|b| Arc::clone(&b.callback))
                .collect()
        };

        for callback in &matched {
            callback();
        }
        !matched.is_empty()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.bindings.lock().unwrap().len()
    }
}

/// Deregisters its binding on drop.
#[must_use = "dropping the handle immediately deregisters the shortcut"]
pub struct BindingHandle {
    id: u64,
    bindings: Weak<Mutex<BTreeMap<u64, Binding>>>,
}

impl Drop for BindingHandle {
    fn drop(&mut self) {
        if let Some(bindings) = self.bindings.upgrade() {
            bindings.lock().unwrap().remove(&self.id);
            log::debug!("Deregistered shortcut binding {}", self.id);
        }
    }
}
