mod traversal;

pub use crate::aabb::Quadrant;
pub use traversal::*;

use crate::config::{Config, Overflow};
use crate::error::InsertError;
use crate::{Aabb, Point};
use arrayvec::ArrayVec;
use tracing::{debug, trace, warn};

/// Number of occupants a leaf at the maximum depth may hold with [`Overflow::Bucket`].
pub const LEAF_BUCKET_LEN: usize = 4;

type Children<T, S> = Option<Box<[Quadtree<T, S>; 4]>>;

/// A stored point and its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    pub position: Point,
    pub payload: T,
}

impl<T> Entry<T> {
    pub fn new(position: Point, payload: T) -> Self {
        Self { position, payload }
    }
}

/// Point-region quadtree.
///
/// Every node owns an immutable region. A leaf holds at most one entry; inserting a second
/// entry subdivides the leaf into four equal quadrants (see [`Quadrant::ALL`] for their order) and
/// pushes its entry down. Subdivision is never undone.
///
/// `S` is an annotation callers may attach to any node. The tree never reads it.
#[derive(Debug, Clone)]
pub struct Quadtree<T, S = ()> {
    region: Aabb,
    depth: u8,
    config: Config,

    children: Children<T, S>,

    // at most one item, unless the node is at `config.max_depth`
    items: ArrayVec<[Entry<T>; LEAF_BUCKET_LEN]>,

    state: Option<S>,
}

impl<T, S> Quadtree<T, S> {
    pub fn new(region: Aabb) -> Self {
        Self::with_config(region, Config::default())
    }

    pub fn with_config(region: Aabb, config: Config) -> Self {
        Self::node(region, 0, config)
    }

    fn node(region: Aabb, depth: u8, config: Config) -> Self {
        Self {
            region,
            depth,
            config,
            children: None,
            items: Default::default(),
            state: None,
        }
    }

    /// Build a tree whose root is the bounding box of the inserted positions.
    pub fn from_points<It>(it: It) -> Result<Self, InsertError<T>>
    where
        It: IntoIterator<Item = (Point, T)>,
    {
        Self::from_points_with_config(it, Config::default())
    }

    pub fn from_points_with_config<It>(it: It, config: Config) -> Result<Self, InsertError<T>>
    where
        It: IntoIterator<Item = (Point, T)>,
    {
        let values = it.into_iter().collect::<Vec<_>>();
        // calculate the minimum bounding box to get a more balanced tree
        let region = Aabb::bounding(values.iter().map(|(p, _)| p)).unwrap_or_default();
        let mut tree = Self::with_config(region, config);
        tree.insert_all(values)?;
        Ok(tree)
    }

    /// Insert every item in order, stopping at the first refused one.
    pub fn insert_all<It>(&mut self, it: It) -> Result<(), InsertError<T>>
    where
        It: IntoIterator<Item = (Point, T)>,
    {
        for (p, v) in it {
            self.insert(p, v)?;
        }
        Ok(())
    }

    /// Insert `payload` at `position`.
    ///
    /// Returns [`InsertError::OutOfBounds`] without touching the tree if `position` is not inside
    /// the root region (edges included), and [`InsertError::DepthExceeded`] if every leaf at the
    /// maximum depth containing the point has no room left. [`InsertError::Unplaced`] is returned
    /// for a point inside the tree that no quadrant contains after rounding.
    pub fn insert(&mut self, position: Point, payload: T) -> Result<(), InsertError<T>> {
        self.insert_entry(Entry::new(position, payload))
    }

    fn insert_entry(&mut self, entry: Entry<T>) -> Result<(), InsertError<T>> {
        if !self.region.contains(&entry.position) {
            // point is out of bounds
            return Err(InsertError::OutOfBounds(entry));
        }

        if self.children.is_none() {
            if self.items.len() < self.capacity() {
                // there was room left in this leaf. We're done.
                self.items.push(entry);
                return Ok(());
            }
            if self.depth >= self.config.max_depth {
                debug!(
                    depth = self.depth,
                    position = %entry.position,
                    "leaf at maximum depth is full, refusing insertion"
                );
                return Err(InsertError::DepthExceeded {
                    depth: self.depth,
                    entry,
                });
            }
            self.subdivide();
        }

        self.insert_into_children(entry)
    }

    /// Offer `entry` to the children in construction order. The first one accepting the point
    /// takes it, even if a later sibling shares the edge it lies on. A child that contains the
    /// point but is full at the maximum depth passes it on to the next one.
    fn insert_into_children(&mut self, mut entry: Entry<T>) -> Result<(), InsertError<T>> {
        let children = match self.children.as_mut() {
            Some(children) => children,
            None => return Err(InsertError::Unplaced(entry)),
        };
        let mut exceeded = None;
        for child in children.iter_mut() {
            entry = match child.insert_entry(entry) {
                Ok(()) => return Ok(()),
                Err(InsertError::DepthExceeded { depth, entry }) => {
                    exceeded = Some(depth);
                    entry
                }
                Err(err) => err.into_entry(),
            };
        }
        match exceeded {
            Some(depth) => Err(InsertError::DepthExceeded { depth, entry }),
            None => Err(InsertError::Unplaced(entry)),
        }
    }

    fn capacity(&self) -> usize {
        match self.config.overflow {
            Overflow::Bucket if self.depth >= self.config.max_depth => LEAF_BUCKET_LEN,
            _ => 1,
        }
    }

    /// Split this leaf into four quadrants and move its entries into them.
    ///
    /// Calling this on a node that already has children does nothing.
    pub fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }
        trace!(depth = self.depth, region = ?self.region, "subdividing");

        let region = self.region;
        let depth = self.depth.saturating_add(1);
        let config = self.config;
        let [a, b, c, d] = Quadrant::ALL;
        self.children = Some(Box::new([
            Self::node(region.quadrant(a), depth, config),
            Self::node(region.quadrant(b), depth, config),
            Self::node(region.quadrant(c), depth, config),
            Self::node(region.quadrant(d), depth, config),
        ]));

        let items = std::mem::take(&mut self.items);
        for entry in items {
            if let Err(err) = self.insert_into_children(entry) {
                // only reachable through rounding at the quadrant edges
                warn!(
                    depth = self.depth,
                    position = %err.entry().position,
                    "no quadrant accepted the occupant, dropping it"
                );
            }
        }
    }

    /// Collect every entry whose position is inside `region`, edges included, in discovery order.
    pub fn query(&self, region: &Aabb) -> Vec<&Entry<T>> {
        let mut out = Vec::new();
        self.query_into(region, &mut out);
        out
    }

    /// Like [`Quadtree::query`], appending to `out`.
    pub fn query_into<'a>(&'a self, region: &Aabb, out: &mut Vec<&'a Entry<T>>) {
        if !self.region.intersects(region) {
            return;
        }

        out.extend(self.items.iter().filter(|e| region.contains(&e.position)));

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.query_into(region, out);
            }
        }
    }

    /// [`Quadtree::query`] searching the four subtrees of every internal node in parallel.
    /// Results come back in the same order.
    pub fn par_query(&self, region: &Aabb) -> Vec<&Entry<T>>
    where
        T: Sync,
        S: Sync,
    {
        use rayon::prelude::*;

        if !self.region.intersects(region) {
            return Vec::new();
        }

        let mut out = self
            .items
            .iter()
            .filter(|e| region.contains(&e.position))
            .collect::<Vec<_>>();

        if let Some(ref children) = self.children {
            let found = children
                .par_iter()
                .map(|child| child.par_query(region))
                .collect::<Vec<_>>();
            for part in found {
                out.extend(part);
            }
        }
        out
    }

    /// Collect every entry at most `radius` away from `center`.
    pub fn find_in_range<'a>(&'a self, center: &Point, radius: f64, out: &mut Vec<&'a Entry<T>>) {
        let aabb = Aabb::from_center(*center, Point::new(radius * 2.0, radius * 2.0));
        self.find_in_range_impl(center, radius, &aabb, out);
    }

    fn find_in_range_impl<'a>(
        &'a self,
        center: &Point,
        radius: f64,
        aabb: &Aabb,
        out: &mut Vec<&'a Entry<T>>,
    ) {
        if !self.region.intersects(aabb) {
            return;
        }

        out.extend(
            self.items
                .iter()
                .filter(|e| e.position.dist(center) <= radius),
        );

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.find_in_range_impl(center, radius, aabb, out);
            }
        }
    }

    /// Returns the first payload stored at exactly `position`, if any
    pub fn get(&self, position: &Point) -> Option<&T> {
        if !self.region.contains(position) {
            return None;
        }

        if let Some(e) = self.items.iter().find(|e| e.position == *position) {
            return Some(&e.payload);
        }

        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.get(position))
    }

    pub fn contains_key(&self, position: &Point) -> bool {
        self.get(position).is_some()
    }

    /// Remove every entry. Children are kept.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.clear();
            }
        }
    }

    /// Number of entries in this subtree.
    pub fn len(&self) -> usize {
        let mut len = 0;
        pre_order(self, |node| len += node.items.len());
        len
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        pre_order(self, |_| count += 1);
        count
    }

    /// Depth of the deepest node in this subtree.
    pub fn max_reached_depth(&self) -> u8 {
        let mut depth = self.depth;
        pre_order(self, |node| depth = depth.max(node.depth));
        depth
    }

    /// Every entry of this subtree, parents before children.
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter {
            stack: vec![self],
            items: [].iter(),
        }
    }

    pub fn region(&self) -> &Aabb {
        &self.region
    }

    /// Distance from the root; the root is at 0.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&[Quadtree<T, S>; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Quadtree<T, S>> {
        let children = self.children.as_ref()?;
        let index = Quadrant::ALL.iter().position(|q| *q == quadrant)?;
        Some(&children[index])
    }

    /// The entry held by this node. Internal nodes never hold one.
    pub fn occupant(&self) -> Option<&Entry<T>> {
        self.items.first()
    }

    /// Entries held by this node itself. More than one only in a leaf at the maximum depth.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.items
    }

    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut S> {
        self.state.as_mut()
    }

    pub fn set_state(&mut self, state: S) {
        self.state = Some(state);
    }

    pub fn take_state(&mut self) -> Option<S> {
        self.state.take()
    }
}

pub struct Iter<'a, T, S> {
    stack: Vec<&'a Quadtree<T, S>>,
    items: std::slice::Iter<'a, Entry<T>>,
}

impl<'a, T, S> Iterator for Iter<'a, T, S> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.items.next() {
                return Some(e);
            }
            let node = self.stack.pop()?;
            if let Some(ref children) = node.children {
                // reversed so the first quadrant is popped first
                self.stack.extend(children.iter().rev());
            }
            self.items = node.items.iter();
        }
    }
}

impl<'a, T, S> IntoIterator for &'a Quadtree<T, S> {
    type Item = &'a Entry<T>;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
