use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::geo::Position;

/// Receiver location shared between the polling loops.
///
/// Written only by the receiver loop, read by the aircraft loop. Updates
/// swap the whole value, so readers never see a half-written position.
/// A configured origin is authoritative and is never replaced.
#[derive(Debug)]
pub struct OriginCell {
    current: ArcSwapOption<Position>,
    configured: bool,
}

impl OriginCell {
    pub fn new(configured: Option<Position>) -> Self {
        Self {
            configured: configured.is_some(),
            current: ArcSwapOption::new(configured.map(Arc::new)),
        }
    }

    pub fn get(&self) -> Option<Position> {
        let guard = self.current.load();
        guard.as_deref().copied()
    }

    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }

    /// Record a probed origin. Returns whether the stored value changed.
    pub fn update(&self, probed: Position) -> bool {
        if self.configured {
            if self.get() != Some(probed) {
                log::debug!(
                    "Ignoring receiver origin {}, using configured origin {:?}",
                    probed,
                    self.get()
                );
            }
            return false;
        }
        if self.get() == Some(probed) {
            return false;
        }
        self.current.store(Some(Arc::new(probed)));
        true
    }
}
