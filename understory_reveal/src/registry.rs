// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach and detach reveal controllers, at most one per list view.
//!
//! List views are identified by an application-chosen key rather than by
//! address. Attaching to a key that already has a controller drops the old
//! controller first, which removes its recognizer and any scroll
//! subscription.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_reveal::controller::RevealConfig;
//! use understory_reveal::memory::MemoryList;
//! use understory_reveal::registry::RevealRegistry;
//! use understory_reveal::types::RevealDirection;
//!
//! let list = Rc::new(RefCell::new(MemoryList::new(10, Size::new(320.0, 44.0), 200.0)));
//! let mut reveals: RevealRegistry<u32, MemoryList> = RevealRegistry::new();
//!
//! let first = reveals.attach(7, &list, RevealConfig::default()).id();
//! let second = reveals
//!     .attach(7, &list, RevealConfig::with_direction(RevealDirection::Left))
//!     .id();
//! assert_ne!(first, second);
//! assert!(!list.borrow().has_gesture_recognizer(first));
//! assert_eq!(list.borrow().gesture_recognizers(), vec![second]);
//!
//! assert!(reveals.detach(7));
//! assert!(list.borrow().gesture_recognizers().is_empty());
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::controller::{RevealConfig, RevealController};
use crate::types::{ListView, RowHost, ViewHost};

/// Controllers keyed by list-view identity.
pub struct RevealRegistry<K, L: ListView> {
    controllers: BTreeMap<K, RevealController<L>>,
}

impl<K: Ord + core::fmt::Debug, L: ListView> core::fmt::Debug for RevealRegistry<K, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealRegistry")
            .field("controllers", &self.controllers)
            .finish_non_exhaustive()
    }
}

impl<K: Ord + Copy, L: ListView> Default for RevealRegistry<K, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy, L: ListView> RevealRegistry<K, L> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            controllers: BTreeMap::new(),
        }
    }

    /// Remove and drop the controller of `key`. Returns whether one existed.
    ///
    /// Dropping a controller cannot reach the animator. If it was settling,
    /// cancel the token from [`RevealController::state`] first.
    pub fn detach(&mut self, key: K) -> bool {
        self.controllers.remove(&key).is_some()
    }

    /// Controller of `key`, if attached.
    pub fn get(&self, key: K) -> Option<&RevealController<L>> {
        self.controllers.get(&key)
    }

    /// Mutable controller of `key`, if attached.
    pub fn get_mut(&mut self, key: K) -> Option<&mut RevealController<L>> {
        self.controllers.get_mut(&key)
    }

    /// Release controllers whose list view has been dropped.
    ///
    /// Returns how many were released.
    pub fn prune(&mut self) -> usize {
        let before = self.controllers.len();
        self.controllers.retain(|_, c| c.is_alive());
        let released = before - self.controllers.len();
        if released > 0 {
            tracing::debug!(
                target: "understory_reveal::registry",
                released,
                "released controllers of dropped list views"
            );
        }
        released
    }

    /// Number of attached controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether no controller is attached.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl<K: Ord + Copy, L: RowHost + ViewHost> RevealRegistry<K, L> {
    /// Attach a new controller for `list` under `key`, replacing any existing one.
    ///
    /// The replaced controller's settle animation, if any, keeps running in
    /// the host's animator; cancel its token first through [`Self::get`].
    pub fn attach(
        &mut self,
        key: K,
        list: &Rc<RefCell<L>>,
        config: RevealConfig,
    ) -> &mut RevealController<L> {
        // The old controller must let go of the list view before the new one
        // registers.
        self.detach(key);
        self.controllers
            .entry(key)
            .or_insert_with(|| RevealController::new(list, config))
    }
}
