//! Bucket accumulators and the 4096-entry bucket table.
//!
//! Every pixel is downsampled to a 12-bit key (the top nibble of each
//! channel) and its color is summed into the bucket at that key. The table
//! is indexed by key, and index order matters: pruning folds a bucket into
//! the bucket at `key - 1`.

use crate::color::Rgb;

/// Number of buckets in the downsampled color space (`16 * 16 * 16`).
pub const BUCKET_COUNT: usize = 4096;

/// Map a packed pixel to its 12-bit bucket key.
///
/// The key packs the top 4 bits of each channel as `R4 << 8 | G4 << 4 | B4`,
/// so each key covers a cube of 16 values per channel.
///
/// # Example
///
/// ```
/// use mvq_core::bucket::downsample;
///
/// assert_eq!(downsample(0x000000), 0x000);
/// assert_eq!(downsample(0xffffff), 0xfff);
/// assert_eq!(downsample(0x12_34_56), 0x135);
/// ```
#[inline]
pub fn downsample(pixel: u32) -> usize {
    let r4 = (pixel >> 20 & 0xf) as usize;
    let g4 = (pixel >> 12 & 0xf) as usize;
    let b4 = (pixel >> 4 & 0xf) as usize;
    (r4 << 8) | (g4 << 4) | b4
}

/// Running channel sums for the colors that fell into one bucket.
///
/// `n == 0` means the bucket is empty; an empty bucket has no average and
/// never reaches the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    r: u64,
    g: u64,
    b: u64,
    n: u64,
}

impl Bucket {
    /// Add one color to the bucket.
    #[inline]
    pub fn add(&mut self, color: Rgb) {
        self.r += color.r() as u64;
        self.g += color.g() as u64;
        self.b += color.b() as u64;
        self.n += 1;
    }

    /// Fold another bucket's sums and count into this one.
    #[inline]
    pub fn absorb(&mut self, other: &Bucket) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
        self.n += other.n;
    }

    /// Reset to empty.
    #[inline]
    pub fn clear(&mut self) {
        *self = Bucket::default();
    }

    /// Number of colors added to this bucket.
    #[inline]
    pub fn len(&self) -> u64 {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Rounded per-channel average, or `None` for an empty bucket.
    ///
    /// Each channel is `(sum + n / 2) / n` in integer arithmetic, masked to
    /// 8 bits.
    ///
    /// # Example
    ///
    /// ```
    /// use mvq_core::bucket::Bucket;
    /// use mvq_core::Rgb;
    ///
    /// let mut bucket = Bucket::default();
    /// bucket.add(Rgb::from_packed(0x000000));
    /// bucket.add(Rgb::from_packed(0x020202));
    /// assert_eq!(bucket.average(), Some(Rgb::from_packed(0x010101)));
    /// ```
    pub fn average(&self) -> Option<Rgb> {
        if self.n == 0 {
            return None;
        }
        let half = self.n / 2;
        let channel = |sum: u64| ((sum + half) / self.n & 0xff) as u8;
        Some(Rgb::from_u8(
            channel(self.r),
            channel(self.g),
            channel(self.b),
        ))
    }
}

/// Fixed table of [`BUCKET_COUNT`] buckets indexed by downsampled key.
///
/// A table is reused across quantization runs; [`BucketTable::bucketize`]
/// resets it before accumulating a new image.
#[derive(Debug, Clone)]
pub struct BucketTable {
    buckets: Box<[Bucket]>,
}

impl BucketTable {
    /// Create a table with every bucket empty.
    pub fn new() -> Self {
        Self {
            buckets: vec![Bucket::default(); BUCKET_COUNT].into_boxed_slice(),
        }
    }

    /// Empty every bucket.
    pub fn reset(&mut self) {
        self.buckets.iter_mut().for_each(Bucket::clear);
    }

    /// Reset the table, then add every pixel to the bucket at its key.
    pub fn bucketize(&mut self, pixels: &[u32]) {
        self.reset();
        for &pixel in pixels {
            self.add(pixel);
        }
    }

    /// Add a single packed pixel to its bucket.
    #[inline]
    pub fn add(&mut self, pixel: u32) {
        self.buckets[downsample(pixel)].add(Rgb::from_packed(pixel));
    }

    /// The bucket at `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key >= BUCKET_COUNT`.
    #[inline]
    pub fn get(&self, key: usize) -> &Bucket {
        &self.buckets[key]
    }

    /// All buckets in key order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of non-empty buckets.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Size of the smallest non-empty bucket, or `None` if all are empty.
    pub fn smallest(&self) -> Option<u64> {
        self.buckets
            .iter()
            .filter(|b| !b.is_empty())
            .map(Bucket::len)
            .min()
    }

    /// Total number of colors held across all buckets.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Averages of the non-empty buckets in ascending key order.
    pub fn averages(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.buckets.iter().filter_map(Bucket::average)
    }

    /// Move the bucket at `key` into the bucket at `key - 1`, leaving
    /// `key` empty. Key 0 has no predecessor and its colors are dropped.
    pub(crate) fn fold_into_predecessor(&mut self, key: usize) {
        let folded = std::mem::take(&mut self.buckets[key]);
        if key > 0 {
            self.buckets[key - 1].absorb(&folded);
        }
    }
}

impl Default for BucketTable {
    fn default() -> Self {
        Self::new()
    }
}
