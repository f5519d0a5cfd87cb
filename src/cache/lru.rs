use crate::error::Result;

use super::arena::{Arena, Membership, SlotId};
use super::index::PageIndex;
use super::list::RecencyList;
use super::{Access, PageCache, PageNumber, Stats};

/// Pure recency-based replacement: one list ordered MRU to LRU, and the tail
/// is always the victim. A hit relinks the page at the head; a miss evicts
/// the tail unconditionally once the cache is full, paying a write-back
/// whenever the victim was dirty.
pub struct LruCache {
    arena: Arena,
    index: PageIndex,
    list: RecencyList,
    stats: Stats,
}

impl LruCache {
    pub fn new(frames: usize) -> Result<LruCache> {
        let arena = Arena::new(frames)?;
        let index = PageIndex::new(frames);
        let list = RecencyList::new(Membership::Resident);
        Ok(LruCache { arena, index, list, stats: Stats::default() })
    }

    /// Evict the list tail, the strict least-recently-used page. The list
    /// imposes a total order, so no tie-break is ever needed.
    fn evict(&mut self) -> SlotId {
        // the cache holds at least one frame, so a full cache has a tail
        let victim = self.list.tail().expect("eviction from an empty cache");
        if self.arena.slot(victim).dirty {
            self.stats.write_back += 1;
        }
        self.index.remove(&mut self.arena, victim);
        self.list.unlink(&mut self.arena, victim);
        victim
    }
}

impl PageCache for LruCache {
    fn access(&mut self, access: Access) {
        let Access { page_number, is_write } = access;
        match self.index.get(&self.arena, page_number) {
            Some(id) => {
                self.stats.hit += 1;
                if is_write {
                    // dirty is monotonic, a later read never clears it
                    self.arena.slot_mut(id).dirty = true;
                }
                // promote to the most recent position unless already there
                if self.list.head() != Some(id) {
                    self.list.unlink(&mut self.arena, id);
                    self.list.push_front(&mut self.arena, id);
                }
            }
            None => {
                self.stats.miss += 1;
                let id = match self.arena.acquire() {
                    Some(id) => id,
                    None => self.evict(),
                };
                self.arena.reinitialize(id, page_number, is_write);
                self.index.put(&mut self.arena, id);
                self.list.push_front(&mut self.arena, id);
            }
        }
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn resident(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    fn contains(&self, page_number: PageNumber) -> bool {
        self.index.get(&self.arena, page_number).is_some()
    }
}
