//! Dense ordering for sibling collections.
//!
//! Every structural change (insert, remove, move within a list, move across
//! lists) ends with [`renormalize`]: a stable sort by `order` followed by
//! reassigning `0..n-1`. Collections are therefore kept both dense and
//! physically sorted, so an element's index equals its `order`.
//!
//! The shift step of [`move_within`] tolerates inconsistent intermediate
//! values (duplicates, gaps, an out-of-range target); the final
//! renormalization is what callers observe.

/// An element of an ordered sibling collection
pub trait Ordered {
    fn id(&self) -> &str;
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Stable sort by `order`, then reassign dense indices.
pub fn renormalize<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// True when the `order` values are exactly `{0, ..., n-1}`.
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match seen.get_mut(item.order()) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

pub fn position_of<T: Ordered>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Insert `item` at `position` (clamped to the end), or append when `None`.
///
/// Returns the item's final order.
pub fn insert_at<T: Ordered>(items: &mut Vec<T>, mut item: T, position: Option<usize>) -> usize {
    let len = items.len();
    let position = position.map_or(len, |position| position.min(len));

    for existing in items.iter_mut() {
        let order = existing.order();
        if order >= position {
            existing.set_order(order + 1);
        }
    }

    let id = item.id().to_string();
    item.set_order(position);
    items.push(item);
    renormalize(items);
    position_of(items, &id).unwrap_or(position)
}

/// Remove the element with `id`, closing the gap it leaves.
///
/// Returns `None` (and leaves the collection untouched) when absent.
pub fn remove_at<T: Ordered>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let index = position_of(items, id)?;
    let removed = items.remove(index);
    renormalize(items);
    Some(removed)
}

/// Move the element with `id` to `new_order` within the same collection.
///
/// Moving an element onto its current order is a no-op. A `new_order` past
/// the end lands the element last. Returns the element's final order, or
/// `None` when absent.
pub fn move_within<T: Ordered>(items: &mut [T], id: &str, new_order: usize) -> Option<usize> {
    let index = position_of(items, id)?;
    let old_order = items[index].order();
    if old_order == new_order {
        return Some(old_order);
    }

    for item in items.iter_mut() {
        if item.id() == id {
            continue;
        }
        let order = item.order();
        if old_order < new_order {
            // moving down
            if order > old_order && order <= new_order {
                item.set_order(order - 1);
            }
        } else if order >= new_order && order < old_order {
            // moving up
            item.set_order(order + 1);
        }
    }

    items[index].set_order(new_order);
    renormalize(items);
    position_of(items, id)
}

/// Move the element with `id` from `source` into `dest` at `position`
/// (clamped to `dest.len()`), or append when `None`.
///
/// Both collections are renormalized. Returns the element's final order in
/// `dest`, or `None` (nothing changes) when `id` is not in `source`.
pub fn move_across<T: Ordered>(
    source: &mut Vec<T>,
    dest: &mut Vec<T>,
    id: &str,
    position: Option<usize>,
) -> Option<usize> {
    let moved = remove_at(source, id)?;
    Some(insert_at(dest, moved, position))
}
