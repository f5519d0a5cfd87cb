use crate::error::Result;

use super::arena::{Arena, Membership, SlotId};
use super::index::PageIndex;
use super::list::RecencyList;
use super::{Access, PageCache, PageNumber, Stats};

/// Clean-first LRU.
///
/// The resident set is split three ways: a bounded, recency-ordered working
/// region holding the most recently touched pages, and two unordered pools of
/// pages demoted out of it, partitioned by dirtiness. The working region
/// protects recent pages from eviction regardless of dirtiness; victim
/// selection prefers the clean pool and only falls back to the dirty pool
/// when no clean page is left, trading longer retention of dirty pages for
/// fewer write-backs than pure recency order.
pub struct CflruCache {
    arena: Arena,
    index: PageIndex,
    working: RecencyList,
    clean: RecencyList,
    dirty: RecencyList,
    working_cap: usize,
    stats: Stats,
}

impl CflruCache {
    pub fn new(frames: usize) -> Result<CflruCache> {
        let arena = Arena::new(frames)?;
        let index = PageIndex::new(frames);
        Ok(CflruCache {
            arena,
            index,
            working: RecencyList::new(Membership::Working),
            clean: RecencyList::new(Membership::Clean),
            dirty: RecencyList::new(Membership::Dirty),
            // three quarters of the frames are protected from eviction
            working_cap: frames * 3 / 4,
            stats: Stats::default(),
        })
    }

    /// Unlink a resident slot from whichever list currently holds it.
    fn unlink_current(&mut self, id: SlotId) {
        match self.arena.slot(id).membership {
            Membership::Working => self.working.unlink(&mut self.arena, id),
            Membership::Clean => self.clean.unlink(&mut self.arena, id),
            Membership::Dirty => self.dirty.unlink(&mut self.arena, id),
            other => panic!("resident slot is on no list: {:?}", other),
        }
    }

    /// Demote working-tail pages into the clean or dirty pool until the
    /// working region is back within its bound. Demotion reclassifies a
    /// resident page, it never evicts: the resident count is unchanged. A
    /// single access only ever overshoots the bound by one, so the loop body
    /// runs at most once per access.
    fn rebalance(&mut self) {
        while self.working.len() > self.working_cap {
            let id = self.working.tail().expect("working region over bound yet empty");
            self.working.unlink(&mut self.arena, id);
            // partition by the dirty flag as it is now, not as it was on entry
            if self.arena.slot(id).dirty {
                self.dirty.push_front(&mut self.arena, id);
            } else {
                self.clean.push_front(&mut self.arena, id);
            }
        }
    }

    /// Pick and evict a victim: the clean-pool tail when one exists, else the
    /// dirty-pool tail, degrading to recency eviction among dirty pages only
    /// when no clean victim is available.
    fn evict(&mut self) -> SlotId {
        let victim = self
            .clean
            .tail()
            .or_else(|| self.dirty.tail())
            .expect("eviction with no demoted pages");
        if self.arena.slot(victim).dirty {
            self.stats.write_back += 1;
        }
        self.index.remove(&mut self.arena, victim);
        self.unlink_current(victim);
        victim
    }
}

impl PageCache for CflruCache {
    fn access(&mut self, access: Access) {
        let Access { page_number, is_write } = access;
        match self.index.get(&self.arena, page_number) {
            Some(id) => {
                self.stats.hit += 1;
                if is_write {
                    self.arena.slot_mut(id).dirty = true;
                }
                // promote to the working head from wherever the page sits,
                // unless it is the working head already
                if self.working.head() != Some(id) {
                    self.unlink_current(id);
                    self.working.push_front(&mut self.arena, id);
                    self.rebalance();
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
                self.working.push_front(&mut self.arena, id);
                self.rebalance();
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
