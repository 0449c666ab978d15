//! Per-viewer controllers.
//!
//! Each browser session is a viewer with its own [`CreditCheckController`].
//! The registry is bounded; when full, the least recently used viewer is
//! evicted and starts over from the idle state on its next request.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::{CheckPorts, CheckSettings, CreditCheckController};

/// Default upper bound on concurrently tracked viewers.
pub const DEFAULT_MAX_VIEWERS: usize = 1024;

/// Validation errors for [`ViewerId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerIdError {
    /// The value is not a UUID.
    #[error("viewer id must be a valid UUID")]
    InvalidId,
}

/// Opaque identifier of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewerId(Uuid);

impl ViewerId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier previously produced by [`ViewerId::random`].
    pub fn parse(raw: &str) -> Result<Self, ViewerIdError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ViewerIdError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entry {
    controller: CreditCheckController,
    touched: u64,
}

#[derive(Default)]
struct Slots {
    tick: u64,
    entries: HashMap<ViewerId, Entry>,
}

/// Bounded map from viewer to controller.
pub struct ViewerRegistry {
    slots: Mutex<Slots>,
    ports: CheckPorts,
    settings: CheckSettings,
    capacity: usize,
}

impl ViewerRegistry {
    /// Create a registry; `capacity` is clamped to at least one viewer.
    pub fn new(ports: CheckPorts, settings: CheckSettings, capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            ports,
            settings,
            capacity: capacity.max(1),
        }
    }

    fn lock_slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the viewer's controller, creating it on first use.
    pub fn controller_for(&self, viewer: &ViewerId) -> CreditCheckController {
        let mut slots = self.lock_slots();
        slots.tick += 1;
        let tick = slots.tick;

        if let Some(entry) = slots.entries.get_mut(viewer) {
            entry.touched = tick;
            return entry.controller.clone();
        }

        if slots.entries.len() >= self.capacity {
            let oldest = slots
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| *id);
            if let Some(evicted) = oldest {
                slots.entries.remove(&evicted);
                debug!(viewer = %evicted, "viewer evicted from registry");
            }
        }

        let controller = CreditCheckController::new(self.ports.clone(), self.settings);
        slots.entries.insert(
            *viewer,
            Entry {
                controller: controller.clone(),
                touched: tick,
            },
        );
        controller
    }

    /// Number of tracked viewers.
    pub fn len(&self) -> usize {
        self.lock_slots().entries.len()
    }

    /// Whether no viewer is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of tracked viewers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
