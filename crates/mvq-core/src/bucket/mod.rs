//! Downsampled color buckets and the pruning that shrinks them to a palette
//!
//! [`BucketTable`] accumulates pixels into 4096 buckets keyed by
//! [`downsample`]; [`prune`] folds small buckets into their neighbors until
//! the number of non-empty buckets fits the palette budget.

mod prune;
mod table;

pub use prune::{prune, PassOutcome, PruneStats};
pub use table::{downsample, Bucket, BucketTable, BUCKET_COUNT};
