use alloc::vec::Vec;
use core::fmt;
use core::mem;

/// An opaque reference to a node in a [`List`].
///
/// A handle stays valid until the node it names is removed, including across
/// [`List::move_to_front`]. Using a handle after its node was removed panics;
/// using a handle from a different list is a caller error whose result is
/// unspecified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Handle(usize);

/// A linked node. `prev` and `next` are slot indices, never owning references.
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// One arena slot. Vacant slots chain into the free list.
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// A doubly linked list whose nodes live in a slab of reusable slots.
///
/// The list owns every node; links between nodes are plain indices, so there
/// are no aliasing concerns and a node's handle survives being relinked.
/// All operations except [`clear`](List::clear) and iteration are O(1).
///
/// # Examples
///
/// ```
/// use recency_cache::list::List;
///
/// let mut list = List::new();
/// let a = list.push_front("a");
/// let b = list.push_back("b");
/// list.move_to_front(b);
///
/// assert_eq!(list.front(), Some(b));
/// assert_eq!(list.back(), Some(a));
/// assert_eq!(list.remove(a), "a");
/// assert_eq!(list.len(), 1);
/// ```
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes before the arena
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the handle of the first node, if any.
    #[inline]
    pub fn front(&self) -> Option<Handle> {
        self.head.map(Handle)
    }

    /// Returns the handle of the last node, if any.
    #[inline]
    pub fn back(&self) -> Option<Handle> {
        self.tail.map(Handle)
    }

    /// Inserts `value` as the new first node and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let idx = self.alloc(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Inserts `value` as the new last node and returns its handle.
    pub fn push_back(&mut self, value: T) -> Handle {
        let idx = self.alloc(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_back(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Unlinks the node named by `handle` and returns its value.
    ///
    /// Front, back, interior and single-node positions are all handled. The
    /// slot goes back on the free list and may be handed out again by a later
    /// push.
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed.
    pub fn remove(&mut self, handle: Handle) -> T {
        let idx = handle.0;
        self.unlink(idx);
        self.len -= 1;
        let slot = mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(idx);
        match slot {
            Slot::Occupied(node) => node.value,
            Slot::Vacant { .. } => unreachable!("unlink rejects vacant slots"),
        }
    }

    /// Moves the node named by `handle` to the front of the list.
    ///
    /// The node is relinked in place, so `handle` still names it afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed.
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = handle.0;
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Returns a reference to the value of the node named by `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed.
    #[inline]
    pub fn get(&self, handle: Handle) -> &T {
        &self.node(handle.0).value
    }

    /// Returns a mutable reference to the value of the node named by `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.node_mut(handle.0).value
    }

    /// Overwrites the value of a node in place and returns the old value.
    /// The node's position does not change.
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed.
    pub fn replace(&mut self, handle: Handle, value: T) -> T {
        mem::replace(self.get_mut(handle), value)
    }

    /// Removes the first node and returns its value.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.front()?;
        Some(self.remove(head))
    }

    /// Removes the last node and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.back()?;
        Some(self.remove(tail))
    }

    /// Drops every node. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(idx) => {
                let next_free = match self.slots[idx] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                self.free = next_free;
                self.slots[idx] = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("list handle {idx} does not name a live node"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match self.slots.get_mut(idx) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("list handle {idx} does not name a live node"),
        }
    }

    /// Splices `idx` out of the chain and clears its own links.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links a detached node in as the new head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Links a detached node in as the new tail.
    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(idx);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Walks the chain in both directions and checks every structural
    /// invariant. Returns false on the first violation.
    #[cfg(test)]
    pub(crate) fn is_well_formed(&self) -> bool {
        if (self.len == 0) != (self.head.is_none() && self.tail.is_none()) {
            return false;
        }
        if self.len == 1 && self.head != self.tail {
            return false;
        }

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = match self.slots.get(idx) {
                Some(Slot::Occupied(node)) => node,
                _ => return false,
            };
            if node.prev != prev {
                return false;
            }
            count += 1;
            if count > self.len {
                return false;
            }
            prev = Some(idx);
            cursor = node.next;
        }
        if count != self.len || prev != self.tail {
            return false;
        }

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        occupied == self.len
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`], created by [`List::iter`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.next?;
        let node = self.list.node(idx);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn values<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = List::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_push_front_and_back() {
        let mut list = List::new();
        let b = list.push_front(2);
        let a = list.push_front(1);
        let c = list.push_back(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(a));
        assert_eq!(list.back(), Some(c));
        assert_ne!(a, b);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_single_node_is_front_and_back() {
        let mut list = List::new();
        let only = list.push_back("x");
        assert_eq!(list.front(), Some(only));
        assert_eq!(list.back(), Some(only));

        assert_eq!(list.remove(only), "x");
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_remove_front_back_and_middle() {
        let mut list = List::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');
        let d = list.push_back('d');

        assert_eq!(list.remove(b), 'b');
        assert_eq!(values(&list), vec!['a', 'c', 'd']);
        assert!(list.is_well_formed());

        assert_eq!(list.remove(a), 'a');
        assert_eq!(list.front(), Some(c));
        assert!(list.is_well_formed());

        assert_eq!(list.remove(d), 'd');
        assert_eq!(list.back(), Some(c));
        assert_eq!(values(&list), vec!['c']);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_move_to_front_keeps_handle() {
        let mut list = List::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        list.move_to_front(c);
        assert_eq!(values(&list), vec![3, 1, 2]);
        assert_eq!(list.back(), Some(b));
        assert_eq!(*list.get(c), 3);
        assert!(list.is_well_formed());

        list.move_to_front(b);
        assert_eq!(values(&list), vec![2, 3, 1]);
        assert_eq!(list.back(), Some(a));

        // Already at the front: no change.
        list.move_to_front(b);
        assert_eq!(values(&list), vec![2, 3, 1]);
        assert_eq!(list.len(), 3);
        assert!(list.is_well_formed());

        assert_eq!(list.remove(c), 3);
        assert_eq!(values(&list), vec![2, 1]);
    }

    #[test]
    fn test_move_interior_to_front() {
        let mut list = List::new();
        list.push_back(1);
        let two = list.push_back(2);
        list.push_back(3);

        list.move_to_front(two);
        assert_eq!(values(&list), vec![2, 1, 3]);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_replace_and_get_mut() {
        let mut list = List::new();
        let h = list.push_front(String::from("old"));
        list.push_front(String::from("other"));

        assert_eq!(list.replace(h, String::from("new")), "old");
        assert_eq!(list.get(h), "new");
        list.get_mut(h).push('!');
        assert_eq!(list.get(h), "new!");
        assert_eq!(list.back(), Some(h));
    }

    #[test]
    fn test_pop_front_and_back() {
        let mut list = List::new();
        assert_eq!(list.pop_back(), None::<u8>);
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);

        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let a = list.push_back(1);
        list.push_back(2);
        list.remove(a);

        let c = list.push_front(3);
        assert_eq!(c, a);
        assert_eq!(list.slots.len(), 2);
        assert_eq!(values(&list), vec![3, 2]);

        for i in 0..100 {
            let back = list.back().unwrap();
            list.remove(back);
            list.push_front(i);
        }
        assert_eq!(list.slots.len(), 2);
        assert_eq!(values(&list), vec![99, 98]);
        assert!(list.is_well_formed());
    }

    #[test]
    fn test_clear() {
        let mut list = List::new();
        for i in 0..5 {
            list.push_back(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.iter().count(), 0);

        list.push_back(10);
        assert_eq!(values(&list), vec![10]);
        assert!(list.is_well_formed());
    }

    #[test]
    #[should_panic(expected = "does not name a live node")]
    fn test_stale_handle_panics() {
        let mut list = List::new();
        let h = list.push_back(1);
        list.push_back(2);
        list.remove(h);
        list.remove(h);
    }

    #[test]
    fn test_iter_is_exact_size() {
        let mut list = List::new();
        list.push_back(1);
        list.push_back(2);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
    }

    #[test]
    fn test_length_consistency_after_mixed_operations() {
        let mut list = List::new();
        let mut handles = Vec::new();
        for i in 0..20 {
            handles.push(if i % 2 == 0 {
                list.push_front(i)
            } else {
                list.push_back(i)
            });
        }
        for (i, h) in handles.iter().enumerate() {
            if i % 3 == 0 {
                list.move_to_front(*h);
            }
        }
        for (i, h) in handles.iter().enumerate() {
            if i % 4 == 0 {
                list.remove(*h);
            }
        }
        assert_eq!(list.len(), 15);
        assert_eq!(list.iter().count(), 15);
        assert!(list.is_well_formed());
    }
}
