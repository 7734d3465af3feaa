use std::{
    collections::HashSet,
    sync::atomic::{AtomicU64, Ordering},
};

use tokio::sync::broadcast;

const POINTER_BUS_CAPACITY: usize = 64;

// Shells allocate one region per mounted control and report which regions
// each press landed inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(u64);

impl RegionId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerDown {
    hit_regions: HashSet<RegionId>,
}

impl PointerDown {
    pub fn inside(regions: impl IntoIterator<Item = RegionId>) -> Self {
        Self {
            hit_regions: regions.into_iter().collect(),
        }
    }

    pub fn outside_all() -> Self {
        Self::default()
    }

    pub fn hits(&self, region: RegionId) -> bool {
        self.hit_regions.contains(&region)
    }
}

#[derive(Debug, Clone)]
pub struct PointerEvents {
    sender: broadcast::Sender<PointerDown>,
}

impl PointerEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(POINTER_BUS_CAPACITY);
        Self { sender }
    }

    pub fn press(&self, event: PointerDown) {
        // Nobody listening is the closed-dropdown case.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PointerDown> {
        self.sender.subscribe()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}
