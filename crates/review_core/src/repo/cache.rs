//! Identity map for loaded reviews.
//!
//! # Invariants
//! - At most one live `SharedReview` per persisted id.
//! - Entries are only added by save/load and only removed by delete, drop or
//!   an explicit `clear`. There is no eviction.

use crate::model::review::{ReviewId, SharedReview};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Maps persisted review ids to the live instance handed out for them.
///
/// Owned by the repository; tests reset it with [`ReviewCache::clear`].
#[derive(Debug, Default)]
pub struct ReviewCache {
    entries: RefCell<HashMap<ReviewId, SharedReview>>,
}

impl ReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live instance registered for `id`, if any.
    pub fn get(&self, id: ReviewId) -> Option<SharedReview> {
        self.entries.borrow().get(&id).map(Rc::clone)
    }

    pub fn contains(&self, id: ReviewId) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns registered ids in ascending order.
    pub fn ids(&self) -> Vec<ReviewId> {
        let mut ids: Vec<ReviewId> = self.entries.borrow().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Forgets every registered instance. Instances already handed out keep
    /// their ids; the next load of the same row creates a fresh instance.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub(crate) fn insert(&self, id: ReviewId, review: SharedReview) {
        self.entries.borrow_mut().insert(id, review);
    }

    pub(crate) fn remove(&self, id: ReviewId) -> Option<SharedReview> {
        self.entries.borrow_mut().remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::ReviewCache;
    use crate::model::review::Review;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn shared_review(id: i64) -> crate::model::review::SharedReview {
        let employees: HashSet<i64> = [1].into_iter().collect();
        let mut review = Review::new(2021, "cached", 1, &employees).unwrap();
        review.set_id(id);
        review.into_shared()
    }

    #[test]
    fn insert_get_and_remove_track_the_same_instance() {
        let cache = ReviewCache::new();
        let review = shared_review(7);

        cache.insert(7, Rc::clone(&review));
        assert!(cache.contains(7));
        assert!(Rc::ptr_eq(&cache.get(7).unwrap(), &review));

        let removed = cache.remove(7).unwrap();
        assert!(Rc::ptr_eq(&removed, &review));
        assert!(cache.get(7).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn ids_are_sorted_and_clear_empties_the_map() {
        let cache = ReviewCache::new();
        cache.insert(3, shared_review(3));
        cache.insert(1, shared_review(1));
        cache.insert(2, shared_review(2));

        assert_eq!(cache.ids(), vec![1, 2, 3]);
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }
}
