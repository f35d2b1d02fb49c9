/* 📖 # How does RecencyList store its entries?

Entries form a doubly linked list ordered from least recent (head) to most recent (tail).
The nodes live in a flat Vec and link to each other by index, and a HashMap from key to
index finds any entry without walking the list. That makes the three hot operations
constant time on average:

- re-adding a key unlinks its node and appends a fresh one at the tail
- removing a key unlinks its node wherever it sits
- eviction unlinks the head

Freed slots go on a free list and are reused by the next add, so the Vec never grows
beyond the largest number of entries held at once.
*/

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

type NodeId = usize;

#[derive(Debug, Clone, Default)]
struct Node {
    key: String,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// A bounded, deduplicated list of keys ordered by recency.
///
/// Iteration yields keys from least recent to most recent. Adding a key that is already
/// present moves it to the most recent end. When the list holds more than
/// [`max_length`](RecencyList::max_length) keys, the least recent ones are evicted.
///
/// # Examples
///
/// ```
/// use filekeep_engine::RecencyList;
///
/// let mut recent = RecencyList::with_max_length(3);
/// recent.add("a");
/// recent.add("b");
/// recent.add("c");
/// recent.add("a");
/// recent.add("d");
///
/// assert_eq!(recent.iter().collect::<Vec<_>>(), ["c", "a", "d"]);
/// // Most recent first:
/// assert_eq!(recent.iter().rev().collect::<Vec<_>>(), ["d", "a", "c"]);
/// ```
#[derive(Clone)]
pub struct RecencyList {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    index: HashMap<String, NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    max_length: usize,
}

impl RecencyList {
    /// Maximum length used by [`RecencyList::new`]: effectively unbounded.
    pub const UNBOUNDED: usize = usize::MAX;

    /// Create an empty, unbounded list.
    pub fn new() -> Self {
        Self::with_max_length(Self::UNBOUNDED)
    }

    /// Create an empty list holding at most `max_length` keys.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            max_length,
        }
    }

    /// Create a list from keys given least recent first.
    ///
    /// Keys are added in order, so a repeated key ends up at the position of its last
    /// occurrence, and if there are more than `max_length` keys the first ones are dropped.
    pub fn from_keys<I, S>(keys: I, max_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::with_max_length(max_length);
        list.extend(keys);
        list
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the capacity, evicting least recent keys until the list fits.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
        self.evict_excess();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Mark `key` as the most recently used one.
    ///
    /// An existing occurrence is moved rather than duplicated. If the list then exceeds
    /// its capacity, the least recent keys are evicted.
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.remove(&key);

        let id = self.allocate(Node {
            key: key.clone(),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.index.insert(key, id);

        self.evict_excess();
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.unlink(id);
                true
            }
            None => false,
        }
    }

    /// Remove every key. The capacity is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.tail.map(|id| self.nodes[id].key.as_str())
    }

    pub fn least_recent(&self) -> Option<&str> {
        self.head.map(|id| self.nodes[id].key.as_str())
    }

    /// Iterate from least recent to most recent. Use `.rev()` for most recent first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Detach a node from the chain and release its slot. The index entry is the
    /// caller's responsibility. Returns the key the node held.
    fn unlink(&mut self, id: NodeId) -> String {
        let Node { key, prev, next } = std::mem::take(&mut self.nodes[id]);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.free.push(id);
        key
    }

    fn evict_excess(&mut self) {
        while self.len() > self.max_length {
            let Some(head) = self.head else {
                break;
            };
            let key = self.unlink(head);
            self.index.remove(&key);
            trace!(key = %key, max_length = self.max_length, "evicted least recent entry");
        }
    }
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for RecencyList {
    fn eq(&self, other: &Self) -> bool {
        self.max_length == other.max_length && self.iter().eq(other.iter())
    }
}

impl Eq for RecencyList {}

impl<S: Into<String>> Extend<S> for RecencyList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, keys: I) {
        for key in keys {
            self.add(key);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for RecencyList {
    fn from_iter<I: IntoIterator<Item = S>>(keys: I) -> Self {
        Self::from_keys(keys, Self::UNBOUNDED)
    }
}

impl<'a> IntoIterator for &'a RecencyList {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of a [`RecencyList`], least recent first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    list: &'a RecencyList,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(node.key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.key.as_str())
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
