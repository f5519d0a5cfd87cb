use crate::error::{Error, Result};

use super::PageNumber;

/// Stable identifier of a slot within the arena. Ids stay valid for the
/// arena's whole lifetime since slots are never created or destroyed.
pub type SlotId = usize;

/// Sentinel id meaning "no slot", used to terminate intrusive links.
pub const NIL: SlotId = SlotId::MAX;

/// The logical collection a slot currently belongs to. A slot is always a
/// member of exactly one: the free set, or a single recency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// In the free set, or momentarily detached between an unlink and the
    /// relink that follows it.
    Free,
    /// The single recency list of plain LRU.
    Resident,
    /// The protected working region of CFLRU.
    Working,
    /// The clean eviction pool of CFLRU.
    Clean,
    /// The dirty eviction pool of CFLRU.
    Dirty,
}

/// Metadata for one cached page. The `prev`/`next` links thread the slot into
/// whichever recency list currently holds it; `hash_next` independently
/// threads it into its index bucket chain.
#[derive(Debug)]
pub struct PageSlot {
    pub page_number: PageNumber,
    pub dirty: bool,
    pub membership: Membership,
    pub prev: SlotId,
    pub next: SlotId,
    pub hash_next: SlotId,
}

impl PageSlot {
    fn new() -> Self {
        PageSlot {
            page_number: 0,
            dirty: false,
            membership: Membership::Free,
            prev: NIL,
            next: NIL,
            hash_next: NIL,
        }
    }
}

/// Fixed-capacity pool owning all page metadata for one policy instance.
///
/// The whole pool is allocated once at construction, sized to the frame
/// count; from then on replay performs no allocation, only reinitialization
/// of recycled slots. The index and the recency lists refer to slots by id
/// and never hold page data of their own.
pub struct Arena {
    slots: Vec<PageSlot>,
    free: Vec<SlotId>,
}

impl Arena {
    pub fn new(frames: usize) -> Result<Arena> {
        if frames < 1 {
            return Err(Error::Value(format!("frame count must be at least 1, got {}", frames)));
        }
        let mut slots = Vec::with_capacity(frames);
        let mut free = Vec::with_capacity(frames);
        for i in 0..frames {
            slots.push(PageSlot::new());
            // initially, every slot is in the free set
            free.push(i);
        }
        Ok(Arena { slots, free })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Take a slot from the free set, or None once the cache has filled up.
    /// After exhaustion the only way to place a new page is to evict a victim
    /// and reuse its slot id; capacity never grows.
    pub fn acquire(&mut self) -> Option<SlotId> {
        self.free.pop()
    }

    /// Overwrite a slot's identity for an incoming page and reset its links.
    /// The slot must not be linked into any list or index chain: either fresh
    /// from the free set, or just evicted.
    pub fn reinitialize(&mut self, id: SlotId, page_number: PageNumber, dirty: bool) {
        let slot = &mut self.slots[id];
        assert_eq!(Membership::Free, slot.membership, "reinitialize of a linked slot");
        slot.page_number = page_number;
        slot.dirty = dirty;
        slot.prev = NIL;
        slot.next = NIL;
        slot.hash_next = NIL;
    }

    pub fn slot(&self, id: SlotId) -> &PageSlot {
        &self.slots[id]
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut PageSlot {
        &mut self.slots[id]
    }
}
