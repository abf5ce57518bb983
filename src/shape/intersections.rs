use crate::shape::Intersection;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Ordered record of every crossing a ray makes through a scene, split
/// into a forward partition (t >= 0) and the crossings behind the ray
/// origin. The behind partition is kept because the refractive-index walk
/// must see every boundary along the ray in ascending-t order.
#[derive(Default)]
pub struct Intersections<'a> {
    hits: BinaryHeap<Reverse<Intersection<'a>>>,
    behind: BinaryHeap<Reverse<Intersection<'a>>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, intersection: Intersection<'a>) {
        if intersection.t >= 0. {
            self.hits.push(Reverse(intersection));
        } else {
            self.behind.push(Reverse(intersection));
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len() + self.behind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.behind.is_empty()
    }

    /// The visible hit: the crossing with the smallest non-negative t.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.hits.peek().map(|Reverse(i)| *i)
    }

    /// Drains both partitions into one ascending-t sequence.
    pub fn into_sorted(self) -> Vec<Intersection<'a>> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.behind.into_sorted_vec().into_iter().rev().map(|Reverse(i)| i));
        sorted.extend(self.hits.into_sorted_vec().into_iter().rev().map(|Reverse(i)| i));
        sorted
    }
}

impl<'a> Extend<Intersection<'a>> for Intersections<'a> {
    fn extend<T: IntoIterator<Item = Intersection<'a>>>(&mut self, iter: T) {
        for i in iter {
            self.insert(i);
        }
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<T: IntoIterator<Item = Intersection<'a>>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
