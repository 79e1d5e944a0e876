//! Index arithmetic for the ordered session list
//!
//! Reordering is a single remove-then-insert, so every element between
//! `from` and `to` shifts by exactly one position toward the gap.

/// Move the element at `from` to `to`, shifting the elements in between.
///
/// Out-of-range indices and `from == to` leave `items` untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }

    let item = items.remove(from);
    items.insert(to, item);
}

/// Where a selected index ends up after `move_item(from, to)`, so the
/// same element stays selected.
pub fn follow_move(selected: usize, from: usize, to: usize) -> usize {
    if selected == from {
        to
    } else if from < to && selected > from && selected <= to {
        selected - 1
    } else if to < from && selected >= to && selected < from {
        selected + 1
    } else {
        selected
    }
}

/// Where a selected index ends up after deleting `deleted`, given the
/// number of elements that remain.
pub fn follow_delete(selected: usize, deleted: usize, remaining: usize) -> usize {
    let shifted = if deleted < selected {
        selected - 1
    } else {
        selected
    };
    shifted.min(remaining.saturating_sub(1))
}
