use crate::quadtree::Entry;
use thiserror::Error;

/// A refused insertion. The entry is handed back to the caller.
#[derive(Debug, Error)]
pub enum InsertError<T> {
    #[error("point {} is outside the tree bounds", .0.position)]
    OutOfBounds(Entry<T>),

    /// The point is inside the tree, but none of the quadrants of the node holding it contains
    /// the point once their edges are rounded.
    #[error("no quadrant accepted point {}", .0.position)]
    Unplaced(Entry<T>),

    /// Every node on the way down was subdivided up to the configured limit and the leaf at the
    /// bottom is full. Happens when too many points share the same coordinates.
    #[error("maximum depth {depth} reached while inserting point {}", .entry.position)]
    DepthExceeded { depth: u8, entry: Entry<T> },
}

impl<T> InsertError<T> {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, InsertError::OutOfBounds(_))
    }

    pub fn entry(&self) -> &Entry<T> {
        match self {
            InsertError::OutOfBounds(entry)
            | InsertError::Unplaced(entry)
            | InsertError::DepthExceeded { entry, .. } => entry,
        }
    }

    pub fn into_entry(self) -> Entry<T> {
        match self {
            InsertError::OutOfBounds(entry)
            | InsertError::Unplaced(entry)
            | InsertError::DepthExceeded { entry, .. } => entry,
        }
    }
}
