/// Default size of the primary row and of each overflow group
pub const DEFAULT_PRIMARY_SIZE: usize = 5;

/// Default maximum number of items placed across all overflow groups
pub const DEFAULT_OVERFLOW_CAP: usize = 12;

/// Output of [`PresentationBatcher::batch`]
#[derive(Debug, Clone, PartialEq)]
pub struct Batches<T> {
    pub primary: Vec<T>,
    pub overflow: Vec<Vec<T>>,
}

impl<T> Batches<T> {
    pub fn overflow_len(&self) -> usize {
        self.overflow.iter().map(Vec::len).sum()
    }

    /// Maps every placed item, keeping the group layout
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Batches<U> {
        Batches {
            primary: self.primary.into_iter().map(&mut f).collect(),
            overflow: self
                .overflow
                .into_iter()
                .map(|group| group.into_iter().map(&mut f).collect())
                .collect(),
        }
    }
}

/// Splits an ordered candidate list into a primary row and capped overflow
/// groups, skipping items without a renderable asset
///
/// Items are scanned once, in order. Available items fill the primary row
/// first: the first `primary_size` positions are tried, then later positions
/// backfill whatever is still missing. After the row is full, available items
/// go into overflow groups of `primary_size` until `overflow_cap` items have
/// been placed. The availability predicate is never called again after the
/// cap is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationBatcher {
    primary_size: usize,
    overflow_cap: usize,
}

impl Default for PresentationBatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_SIZE, DEFAULT_OVERFLOW_CAP)
    }
}

impl PresentationBatcher {
    pub fn new(primary_size: usize, overflow_cap: usize) -> Self {
        Self {
            primary_size,
            overflow_cap,
        }
    }

    pub fn primary_size(&self) -> usize {
        self.primary_size
    }

    pub fn overflow_cap(&self) -> usize {
        self.overflow_cap
    }

    pub fn batch<T, F>(&self, items: impl IntoIterator<Item = T>, mut available: F) -> Batches<T>
    where
        F: FnMut(&T) -> bool,
    {
        let group_size = self.primary_size.max(1);
        let mut primary = Vec::with_capacity(self.primary_size);
        let mut overflow: Vec<Vec<T>> = Vec::new();
        let mut placed_in_overflow = 0;

        for item in items {
            if primary.len() >= self.primary_size && placed_in_overflow >= self.overflow_cap {
                break;
            }
            if !available(&item) {
                continue;
            }

            if primary.len() < self.primary_size {
                primary.push(item);
                continue;
            }

            match overflow.last_mut() {
                Some(group) if group.len() < group_size => group.push(item),
                _ => overflow.push(vec![item]),
            }
            placed_in_overflow += 1;
        }

        Batches { primary, overflow }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LETTERS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

    #[test]
    fn test_all_available_fills_primary_then_overflow() {
        let batches = PresentationBatcher::default().batch(LETTERS, |_| true);
        assert_eq!(batches.primary, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(batches.overflow, vec![vec!["F", "G"]]);
    }

    #[test]
    fn test_backfill_from_beyond_primary_window() {
        let batches = PresentationBatcher::default().batch(LETTERS, |item| ["F", "G"].contains(item));
        assert_eq!(batches.primary, vec!["F", "G"]);
        assert!(batches.overflow.is_empty());
    }

    #[test]
    fn test_gaps_in_window_are_backfilled_in_order() {
        let items: Vec<usize> = (0..12).collect();
        let batches = PresentationBatcher::default().batch(items, |i| *i != 1 && *i != 3);
        assert_eq!(batches.primary, vec![0, 2, 4, 5, 6]);
        assert_eq!(batches.overflow, vec![vec![7, 8, 9, 10, 11]]);
    }

    #[test]
    fn test_backfilled_items_not_repeated_in_overflow() {
        let items: Vec<usize> = (0..10).collect();
        // 5 is unavailable, so 6 and 7 backfill the row
        let batches = PresentationBatcher::default().batch(items, |i| ![0, 2, 5].contains(i));
        assert_eq!(batches.primary, vec![1, 3, 4, 6, 7]);
        assert_eq!(batches.overflow, vec![vec![8, 9]]);
    }

    #[test]
    fn test_overflow_grouped_and_capped() {
        let items: Vec<usize> = (0..24).collect();
        let batches = PresentationBatcher::default().batch(items, |_| true);
        assert_eq!(batches.primary, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            batches.overflow,
            vec![
                vec![5, 6, 7, 8, 9],
                vec![10, 11, 12, 13, 14],
                vec![15, 16],
            ]
        );
        assert_eq!(batches.overflow_len(), 12);
    }

    #[test]
    fn test_unavailable_items_do_not_split_groups() {
        let items: Vec<usize> = (0..16).collect();
        let batches = PresentationBatcher::default().batch(items, |i| i % 2 == 0);
        assert_eq!(batches.primary, vec![0, 2, 4, 6, 8]);
        assert_eq!(batches.overflow, vec![vec![10, 12, 14]]);
    }

    #[test]
    fn test_predicate_not_called_after_cap() {
        let items: Vec<usize> = (0..24).collect();
        let mut checked = Vec::new();
        let batches = PresentationBatcher::new(2, 3).batch(items, |i| {
            checked.push(*i);
            true
        });
        assert_eq!(batches.primary, vec![0, 1]);
        assert_eq!(batches.overflow, vec![vec![2, 3], vec![4]]);
        assert_eq!(checked, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_overflow_cap() {
        let batches = PresentationBatcher::new(5, 0).batch(LETTERS, |_| true);
        assert_eq!(batches.primary.len(), 5);
        assert!(batches.overflow.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let batches = PresentationBatcher::default().batch(Vec::<&str>::new(), |_| true);
        assert!(batches.primary.is_empty());
        assert!(batches.overflow.is_empty());
    }

    #[test]
    fn test_nothing_available() {
        let batches = PresentationBatcher::default().batch(LETTERS, |_| false);
        assert!(batches.primary.is_empty());
        assert!(batches.overflow.is_empty());
    }

    #[test]
    fn test_map_keeps_layout() {
        let batches = PresentationBatcher::new(2, 12)
            .batch(LETTERS, |_| true)
            .map(|s| s.to_lowercase());
        assert_eq!(batches.primary, vec!["a", "b"]);
        assert_eq!(
            batches.overflow,
            vec![vec!["c", "d"], vec!["e", "f"], vec!["g"]]
        );
    }

    #[test]
    fn test_batch_properties_over_many_patterns() {
        let items: Vec<usize> = (0..24).collect();
        // Deterministic availability patterns derived from a bitmask
        for seed in 0u32..512 {
            let available = |i: &usize| (seed.rotate_left(*i as u32) ^ (*i as u32 * 7)) % 3 != 0;
            for (primary_size, overflow_cap) in [(5, 12), (3, 4), (1, 0), (4, 30)] {
                let batches =
                    PresentationBatcher::new(primary_size, overflow_cap).batch(items.clone(), available);

                assert!(batches.primary.len() <= primary_size);
                assert!(batches.overflow_len() <= overflow_cap);
                assert!(batches.overflow.iter().all(|g| !g.is_empty() && g.len() <= primary_size));

                let flat: Vec<usize> = batches
                    .primary
                    .iter()
                    .chain(batches.overflow.iter().flatten())
                    .copied()
                    .collect();
                assert!(flat.iter().all(available));
                assert!(flat.windows(2).all(|w| w[0] < w[1]));

                let unique: HashSet<usize> = flat.iter().copied().collect();
                assert_eq!(unique.len(), flat.len());
            }
        }
    }
}
