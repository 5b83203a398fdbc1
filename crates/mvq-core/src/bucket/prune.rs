//! Iterative bucket pruning.
//!
//! Each pass scans the table in key order and folds every bucket whose size
//! is at or below the current threshold into its lower-key neighbor. Once
//! the running count of surviving buckets drops under the budget, the rest
//! of the pass only observes: small buckets are left in place but still
//! counted. The smallest size seen in a pass becomes the next threshold.
//!
//! The fold always targets `key - 1` and mutates it in the same scan, so a
//! pass is a strictly sequential fold over keys. Key 0 has no predecessor;
//! pruning it drops its colors.

use super::table::{BucketTable, BUCKET_COUNT};

/// Result of one pruning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    /// Non-empty buckets left in the table after the pass.
    pub occupied: usize,
    /// Smallest non-empty bucket size observed during the scan.
    pub next_min: u64,
    /// Buckets folded into their neighbor (or dropped at key 0).
    pub folded: usize,
}

/// Summary of a complete pruning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneStats {
    /// Non-empty buckets before pruning.
    pub initial: usize,
    /// Non-empty buckets after pruning.
    pub remaining: usize,
    /// Number of passes executed.
    pub passes: usize,
}

impl BucketTable {
    /// Run a single pruning pass.
    ///
    /// * `min` - buckets with `1..=min` colors are folded while pruning is active
    /// * `occupied` - non-empty bucket count before the pass
    /// * `budget` - pruning stops once the running count falls below this
    pub fn prune_pass(&mut self, min: u64, occupied: usize, budget: usize) -> PassOutcome {
        let mut stop = false;
        let mut next_min = u64::MAX;
        let mut remaining = occupied;
        let mut folded = 0;

        for key in 0..BUCKET_COUNT {
            let size = self.get(key).len();
            if size == 0 {
                continue;
            }
            next_min = next_min.min(size);

            if size <= min {
                if !stop {
                    self.fold_into_predecessor(key);
                    remaining = remaining.saturating_sub(1);
                    folded += 1;
                }
                if remaining < budget {
                    stop = true;
                }
            }
        }

        PassOutcome {
            occupied: self.occupied(),
            next_min,
            folded,
        }
    }
}

/// Prune `table` until at most `budget` buckets are non-empty.
///
/// The first pass uses the smallest bucket size in the table as its
/// threshold; later passes use the smallest size observed by the previous
/// pass. A `budget` of zero is treated as one.
///
/// # Example
///
/// ```
/// use mvq_core::bucket::{prune, BucketTable};
///
/// // One pixel in each of 300 distinct buckets.
/// let pixels: Vec<u32> = (0..300u32)
///     .map(|key| (key >> 8) << 20 | (key >> 4 & 0xf) << 12 | (key & 0xf) << 4)
///     .collect();
/// let mut table = BucketTable::new();
/// table.bucketize(&pixels);
///
/// let stats = prune(&mut table, 256);
/// assert_eq!(stats.initial, 300);
/// assert!(stats.remaining <= 256);
/// assert_eq!(table.occupied(), stats.remaining);
/// ```
pub fn prune(table: &mut BucketTable, budget: usize) -> PruneStats {
    let budget = budget.max(1);
    let initial = table.occupied();
    let mut occupied = initial;
    let mut min = table.smallest().unwrap_or(0);
    let mut passes = 0;

    while occupied > budget {
        let outcome = table.prune_pass(min, occupied, budget);
        occupied = outcome.occupied;
        min = outcome.next_min;
        passes += 1;
    }

    PruneStats {
        initial,
        remaining: occupied,
        passes,
    }
}
