use super::arena::{Arena, SlotId, NIL};
use super::PageNumber;

/// Headroom factor over the frame count when sizing the bucket array.
const BUCKET_HEADROOM: usize = 2;

/// Hash table mapping resident page numbers to arena slots.
///
/// Buckets chain through the slots' `hash_next` links, so the table itself
/// stores nothing but bucket heads. The bucket count is fixed at construction
/// to the smallest power of two with headroom over the frame count: the
/// resident set is bounded by the arena capacity, so chains stay short and
/// the table never needs to rehash or grow.
pub struct PageIndex {
    buckets: Vec<SlotId>,
    mask: u64,
    len: usize,
}

impl PageIndex {
    pub fn new(frames: usize) -> Self {
        let mut size = 1;
        while size < frames * BUCKET_HEADROOM {
            size <<= 1;
        }
        PageIndex { buckets: vec![NIL; size], mask: (size - 1) as u64, len: 0 }
    }

    fn bucket(&self, page_number: PageNumber) -> usize {
        ((page_number ^ (page_number >> 5)) & self.mask) as usize
    }

    /// Look up the slot holding the given page, walking the bucket chain.
    pub fn get(&self, arena: &Arena, page_number: PageNumber) -> Option<SlotId> {
        let mut curr = self.buckets[self.bucket(page_number)];
        while curr != NIL {
            let slot = arena.slot(curr);
            if slot.page_number == page_number {
                return Some(curr);
            }
            curr = slot.hash_next;
        }
        None
    }

    /// Insert a slot at the head of its bucket chain, keyed by the page
    /// number already stored in the slot.
    pub fn put(&mut self, arena: &mut Arena, id: SlotId) {
        let idx = self.bucket(arena.slot(id).page_number);
        arena.slot_mut(id).hash_next = self.buckets[idx];
        self.buckets[idx] = id;
        self.len += 1;
    }

    /// Splice a slot out of its bucket chain by identity, not by re-hash of
    /// a copied key: the chain is walked from the bucket head comparing slot
    /// ids. Removing a slot that is not indexed is a programming defect.
    pub fn remove(&mut self, arena: &mut Arena, id: SlotId) {
        let idx = self.bucket(arena.slot(id).page_number);
        let mut curr = self.buckets[idx];
        let mut prev = NIL;
        while curr != NIL {
            if curr == id {
                let next = arena.slot(curr).hash_next;
                if prev != NIL {
                    arena.slot_mut(prev).hash_next = next;
                } else {
                    self.buckets[idx] = next;
                }
                arena.slot_mut(id).hash_next = NIL;
                self.len -= 1;
                return;
            }
            prev = curr;
            curr = arena.slot(curr).hash_next;
        }
        panic!("remove of a slot that is not indexed");
    }

    /// Number of indexed slots, which always equals the resident page count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Result;

    use super::*;

    #[test]
    fn test_bucket_count_is_power_of_two() {
        // smallest power of two >= frames * 2
        let index = PageIndex::new(1);
        assert_eq!(1, (index.mask + 1).count_ones());
        assert_eq!(2, index.buckets.len());
        let index = PageIndex::new(5);
        assert_eq!(16, index.buckets.len());
        let index = PageIndex::new(4096);
        assert_eq!(8192, index.buckets.len());
    }

    #[test]
    fn test_put_get_remove() -> Result<()> {
        let mut arena = Arena::new(64)?;
        let mut index = PageIndex::new(64);

        let mut ids = vec![];
        for page in 0u64..64 {
            let id = arena.acquire().unwrap();
            arena.reinitialize(id, page, false);
            index.put(&mut arena, id);
            ids.push(id);
        }
        assert_eq!(64, index.len());

        for page in 0u64..64 {
            let id = index.get(&arena, page).unwrap();
            assert_eq!(page, arena.slot(id).page_number);
        }
        assert_eq!(None, index.get(&arena, 1000));

        for &id in &ids {
            index.remove(&mut arena, id);
        }
        assert!(index.is_empty());
        assert_eq!(None, index.get(&arena, 0));
        Ok(())
    }

    #[test]
    fn test_remove_from_chain_middle() -> Result<()> {
        // Scenario: with a 4-bucket table (2 frames), pages 0, 33 and 66 all
        // hash to bucket 0, forming a single chain. Removing the middle entry
        // must splice the chain, leaving the neighbors reachable.
        let mut arena = Arena::new(3)?;
        let mut index = PageIndex::new(2);
        assert_eq!(index.bucket(0), index.bucket(33));
        assert_eq!(index.bucket(0), index.bucket(66));

        let mut ids = vec![];
        for page in [0u64, 33, 66] {
            let id = arena.acquire().unwrap();
            arena.reinitialize(id, page, false);
            index.put(&mut arena, id);
            ids.push(id);
        }
        // 33 was inserted second; head insertion puts 66 in front of it
        index.remove(&mut arena, ids[1]);
        assert_eq!(2, index.len());
        assert_eq!(Some(ids[0]), index.get(&arena, 0));
        assert_eq!(None, index.get(&arena, 33));
        assert_eq!(Some(ids[2]), index.get(&arena, 66));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "not indexed")]
    fn test_remove_unindexed_slot_panics() {
        let mut arena = Arena::new(1).unwrap();
        let mut index = PageIndex::new(1);
        let id = arena.acquire().unwrap();
        arena.reinitialize(id, 9, false);
        index.remove(&mut arena, id);
    }
}
