use crate::{
    core::{bounds::Bounds, geo::Point},
    layers::marker::OverlayHandle,
};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A spatial item that can be indexed via an R-tree
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: OverlayHandle,
    pub bounds: Bounds,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: OverlayHandle, bounds: Bounds, data: T) -> Self {
        Self { id, bounds, data }
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for SpatialItem<T> {}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let center = self.bounds.center();
        let dx = center.x - point[0];
        let dy = center.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.bounds.contains(&Point::new(point[0], point[1]))
    }
}

/// R-tree over overlay boxes
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    /// Replaces the whole index in one pass
    pub fn rebuild(&mut self, items: Vec<SpatialItem<T>>) {
        self.rtree = RTree::bulk_load(items);
    }

    pub fn insert(&mut self, item: SpatialItem<T>) {
        self.rtree.insert(item);
    }

    /// Removes an item given the bounds it was indexed with
    pub fn remove(&mut self, id: OverlayHandle, bounds: Bounds) -> Option<SpatialItem<T>>
    where
        T: Default,
    {
        self.rtree.remove(&SpatialItem::new(id, bounds, T::default()))
    }

    /// Items whose box contains the point
    pub fn query_point(&self, point: &Point) -> Vec<&SpatialItem<T>> {
        self.rtree.locate_all_at_point(&[point.x, point.y]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, bounds: Bounds) -> SpatialItem<u64> {
        SpatialItem::new(OverlayHandle(id), bounds, id)
    }

    #[test]
    fn test_query_point_returns_all_overlapping() {
        let mut index = SpatialIndex::new();
        index.insert(item(1, Bounds::from_coords(0.0, 0.0, 10.0, 10.0)));
        index.insert(item(2, Bounds::from_coords(5.0, 5.0, 15.0, 15.0)));
        index.insert(item(3, Bounds::from_coords(20.0, 20.0, 30.0, 30.0)));

        let mut hits: Vec<u64> = index
            .query_point(&Point::new(7.0, 7.0))
            .iter()
            .map(|item| item.data)
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![1, 2]);
        assert!(index.query_point(&Point::new(17.0, 17.0)).is_empty());
    }

    #[test]
    fn test_remove_with_indexed_bounds() {
        let mut index = SpatialIndex::new();
        let bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
        index.insert(item(1, bounds));
        index.insert(item(2, bounds));

        let removed = index.remove(OverlayHandle(1), bounds);
        assert_eq!(removed.map(|item| item.data), Some(1));
        assert_eq!(index.len(), 1);
        assert!(index.remove(OverlayHandle(1), bounds).is_none());
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut index = SpatialIndex::new();
        index.insert(item(9, Bounds::from_coords(0.0, 0.0, 100.0, 100.0)));
        index.rebuild(vec![
            item(1, Bounds::from_coords(0.0, 0.0, 1.0, 1.0)),
            item(2, Bounds::from_coords(50.0, 50.0, 60.0, 60.0)),
        ]);

        assert_eq!(index.len(), 2);
        let hits = index.query_point(&Point::new(55.0, 55.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, OverlayHandle(2));

        index.clear();
        assert!(index.is_empty());
    }
}
