//! Neighbour swaps for ordered lists

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
	/// Towards the start of the list (left for top-level menus)
	Up,
	/// Towards the end of the list (right for top-level menus)
	Down,
}

impl MoveDirection {
	/// Index of the neighbour to swap with, if it exists
	pub fn neighbor(self, index: usize, len: usize) -> Option<usize> {
		if index >= len {
			return None;
		}
		match self {
			MoveDirection::Up => index.checked_sub(1),
			MoveDirection::Down => (index + 1 < len).then_some(index + 1),
		}
	}
}

/// Swap the item at `index` with its neighbour in `direction`
///
/// Returns `false` without touching the slice when the item is already at the
/// boundary or `index` is out of range.
///
/// # Examples
///
/// ```
/// use artivact_core::ordering::{MoveDirection, swap_neighbor};
///
/// let mut items = vec!["a", "b", "c"];
/// assert!(swap_neighbor(&mut items, 1, MoveDirection::Up));
/// assert_eq!(items, vec!["b", "a", "c"]);
/// assert!(!swap_neighbor(&mut items, 0, MoveDirection::Up));
/// ```
pub fn swap_neighbor<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
	match direction.neighbor(index, items.len()) {
		Some(other) => {
			items.swap(index, other);
			true
		}
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, MoveDirection::Up, None)]
	#[case(0, MoveDirection::Down, Some(1))]
	#[case(2, MoveDirection::Down, None)]
	#[case(2, MoveDirection::Up, Some(1))]
	#[case(5, MoveDirection::Up, None)]
	fn test_neighbor(#[case] index: usize, #[case] direction: MoveDirection, #[case] expected: Option<usize>) {
		assert_eq!(direction.neighbor(index, 3), expected);
	}

	#[rstest]
	fn test_swap_at_boundary_is_noop() {
		let mut items = vec![1, 2, 3];

		assert!(!swap_neighbor(&mut items, 2, MoveDirection::Down));
		assert_eq!(items, vec![1, 2, 3]);
	}
}
