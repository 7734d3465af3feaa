use crate::pointer::{PointerDown, RegionId};

// The selection itself lives in the owning form draft; this type only
// tracks whether the option list is showing.
#[derive(Debug)]
pub struct MemberPicker {
    region: RegionId,
    open: bool,
}

impl MemberPicker {
    pub fn new() -> Self {
        Self {
            region: RegionId::next(),
            open: false,
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    // Returns true when the press closed an open list.
    pub fn observe_pointer(&mut self, press: &PointerDown) -> bool {
        if self.open && !press.hits(self.region) {
            self.open = false;
            return true;
        }
        false
    }
}

impl Default for MemberPicker {
    fn default() -> Self {
        Self::new()
    }
}
