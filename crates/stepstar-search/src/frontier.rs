use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use stepstar_core::Point;

/// Priority of a frontier member.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) pos: Point,
    pub(crate) f: f64,
    pub(crate) h: f64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        // Key: f, then h, then x, then y.
        other
            .f
            .total_cmp(&self.f)
            .then(other.h.total_cmp(&self.h))
            .then(other.pos.x.cmp(&self.pos.x))
            .then(other.pos.y.cmp(&self.pos.y))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// The open set: cells discovered but not yet expanded.
///
/// Membership is a map keyed by position holding each member's current
/// priority. Ordering is a binary heap; when a member's priority improves a
/// fresh entry is pushed and the old one goes stale, to be dropped when it
/// reaches the top.
///
/// The minimum is unique: ties on `f` are broken by lower `h`, then lower
/// `x`, then lower `y`.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashMap<Point, Entry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.members.contains_key(&p)
    }

    /// Members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.members.keys().copied()
    }

    /// Members in row-major order.
    pub fn sorted(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = self.iter().collect();
        pts.sort_unstable();
        pts
    }

    /// Insert `pos`, or update its priority if already present.
    pub fn push(&mut self, pos: Point, f: f64, h: f64) {
        let entry = Entry { pos, f, h };
        self.members.insert(pos, entry);
        self.heap.push(entry);
    }

    /// The member with the smallest priority, without removing it.
    ///
    /// Takes `&mut self` to drop stale heap entries on the way; the set of
    /// members is unchanged.
    pub fn peek(&mut self) -> Option<Point> {
        while let Some(top) = self.heap.peek() {
            if self.members.get(&top.pos) == Some(top) {
                return Some(top.pos);
            }
            self.heap.pop();
        }
        None
    }

    /// Remove `pos`. Returns whether it was a member.
    pub fn remove(&mut self, pos: Point) -> bool {
        self.members.remove(&pos).is_some()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }
}
