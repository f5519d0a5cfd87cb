use super::arena::{Arena, Membership, SlotId, NIL};

/// Intrusive doubly-linked ordering over arena slots, newest at the head.
///
/// The list owns no storage: it threads the `prev`/`next` links of slots
/// whose membership tag matches its own. Head and tail are tracked
/// explicitly so both insertion at the front and victim selection at the
/// back are O(1); eviction must never degenerate into a scan.
pub struct RecencyList {
    tag: Membership,
    head: SlotId,
    tail: SlotId,
    len: usize,
}

impl RecencyList {
    pub fn new(tag: Membership) -> Self {
        assert_ne!(Membership::Free, tag, "a recency list cannot carry the free tag");
        RecencyList { tag, head: NIL, tail: NIL, len: 0 }
    }

    pub fn tag(&self) -> Membership {
        self.tag
    }

    /// Most recently inserted slot, or None when the list is empty.
    pub fn head(&self) -> Option<SlotId> {
        if self.head == NIL {
            return None;
        }
        Some(self.head)
    }

    /// Least recently inserted slot, or None when the list is empty.
    pub fn tail(&self) -> Option<SlotId> {
        if self.tail == NIL {
            return None;
        }
        Some(self.tail)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Link a detached slot in at the head, tagging it as a member.
    pub fn push_front(&mut self, arena: &mut Arena, id: SlotId) {
        let head = self.head;
        let slot = arena.slot_mut(id);
        assert_eq!(Membership::Free, slot.membership, "push of a slot already on a list");
        slot.membership = self.tag;
        slot.prev = NIL;
        slot.next = head;
        if head != NIL {
            arena.slot_mut(head).prev = id;
        }
        self.head = id;
        if self.tail == NIL {
            self.tail = id;
        }
        self.len += 1;
    }

    /// Unlink a slot from anywhere in the list, leaving it detached. The
    /// slot must currently be tagged as a member of this list.
    pub fn unlink(&mut self, arena: &mut Arena, id: SlotId) {
        let (prev, next) = {
            let slot = arena.slot(id);
            assert_eq!(self.tag, slot.membership, "unlink from the wrong list");
            (slot.prev, slot.next)
        };
        if prev != NIL {
            arena.slot_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            arena.slot_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
        let slot = arena.slot_mut(id);
        slot.prev = NIL;
        slot.next = NIL;
        slot.membership = Membership::Free;
        self.len -= 1;
    }
}
