use crate::{
    anchor::Anchor,
    geometry::{polar, strand_angle},
    step::Shard,
    types::StrandId,
};
use glam::Vec2;
use std::ops::Range;

/// Positions and velocities of every segment of every strand.
///
/// Both buffers are flat and strand-major: segment `j` of strand `i` lives
/// at `i * segments_per_strand + j`. A contiguous range of strands is
/// therefore a contiguous sub-slice, which is what shard partitioning
/// relies on.
#[derive(Clone, Debug)]
pub struct StrandBundle {
    pub(crate) strand_count: usize,
    pub(crate) segments_per_strand: usize,
    pub(crate) positions: Vec<Vec2>,
    pub(crate) velocities: Vec<Vec2>,
}

impl StrandBundle {
    /// Builds a bundle laid out around `anchor`, see [`StrandBundle::initialize`].
    pub fn new(strand_count: usize, segments_per_strand: usize, rest_length: f32, anchor: &Anchor) -> Self {
        let mut bundle = Self {
            strand_count: 0,
            segments_per_strand: 0,
            positions: Vec::new(),
            velocities: Vec::new(),
        };
        bundle.initialize(
            strand_count,
            segments_per_strand,
            rest_length,
            anchor.pos,
            anchor.radius,
        );
        bundle
    }

    /// Replaces all state with the resting layout.
    ///
    /// Strand `i` points away from `anchor_pos` at angle `2π·i/strand_count`
    /// and segment `j` sits at distance `anchor_radius + j·rest_length`
    /// along it. Every velocity is zero afterwards. Existing buffer capacity
    /// is reused.
    ///
    /// ### Parameters
    /// - `strand_count`, `segments_per_strand` - New shape. Their product
    ///   must fit in memory, which [`crate::config::SimConfig::validate`]
    ///   checks.
    /// - `rest_length` - Spacing between adjacent segments.
    /// - `anchor_pos`, `anchor_radius` - Body the roots are placed on.
    pub fn initialize(
        &mut self,
        strand_count: usize,
        segments_per_strand: usize,
        rest_length: f32,
        anchor_pos: Vec2,
        anchor_radius: f32,
    ) {
        let len = strand_count * segments_per_strand;
        self.strand_count = strand_count;
        self.segments_per_strand = segments_per_strand;

        self.positions.clear();
        self.positions.reserve(len);
        for i in 0..strand_count {
            let angle = strand_angle(i, strand_count);
            self.positions.extend(
                (0..segments_per_strand)
                    .map(|j| polar(anchor_pos, anchor_radius + j as f32 * rest_length, angle)),
            );
        }

        self.velocities.clear();
        self.velocities.resize(len, Vec2::ZERO);
    }

    pub fn strand_count(&self) -> usize {
        self.strand_count
    }

    pub fn segments_per_strand(&self) -> usize {
        self.segments_per_strand
    }

    pub fn total_segments(&self) -> usize {
        self.positions.len()
    }

    /// Flat index of segment `segment` of strand `strand`.
    #[inline]
    fn index(&self, strand: StrandId, segment: usize) -> usize {
        strand * self.segments_per_strand + segment
    }

    /// Segment positions of one strand, root first.
    pub fn strand(&self, strand: StrandId) -> Option<&[Vec2]> {
        self.strand_range(strand).map(|r| &self.positions[r])
    }

    /// Segment velocities of one strand, root first.
    pub fn strand_velocities(&self, strand: StrandId) -> Option<&[Vec2]> {
        self.strand_range(strand).map(|r| &self.velocities[r])
    }

    /// Iterates over every strand's positions in index order.
    pub fn strands(&self) -> impl Iterator<Item = &[Vec2]> + '_ {
        // `chunks_exact` panics on a zero chunk size.
        self.positions
            .chunks_exact(self.segments_per_strand.max(1))
            .take(self.strand_count)
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    fn strand_range(&self, strand: StrandId) -> Option<Range<usize>> {
        if strand >= self.strand_count {
            return None;
        }
        let start = self.index(strand, 0);
        Some(start..start + self.segments_per_strand)
    }

    /// Splits the buffers into one mutable [`Shard`] per strand range.
    ///
    /// ### Parameters
    /// - `ranges` - Strand ranges in ascending order, usually from
    ///   [`crate::dispatch::partition`]. Each range is clamped to the live
    ///   strand count and to the end of the previous range, so stale or
    ///   overlapping bounds shrink (possibly to an empty shard) instead of
    ///   aliasing or indexing out of bounds.
    ///
    /// ### Returns
    /// One shard per range, in the same order. The shards borrow disjoint
    /// parts of the buffers and can be stepped on separate threads.
    pub fn shards_mut(&mut self, ranges: &[Range<StrandId>]) -> Vec<Shard<'_>> {
        let n = self.segments_per_strand;
        let count = self.strand_count;
        let mut positions = self.positions.as_mut_slice();
        let mut velocities = self.velocities.as_mut_slice();
        let mut cursor = 0;
        let mut shards = Vec::with_capacity(ranges.len());

        for range in ranges {
            let start = range.start.clamp(cursor, count);
            let end = range.end.clamp(start, count);

            // Skip strands between the previous shard and this one.
            let skip = (start - cursor) * n;
            positions = std::mem::take(&mut positions).split_at_mut(skip).1;
            velocities = std::mem::take(&mut velocities).split_at_mut(skip).1;

            let take = (end - start) * n;
            let (p, rest_p) = std::mem::take(&mut positions).split_at_mut(take);
            let (v, rest_v) = std::mem::take(&mut velocities).split_at_mut(take);
            positions = rest_p;
            velocities = rest_v;

            shards.push(Shard::new(start, count, n, p, v));
            cursor = end;
        }
        shards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Anchor {
        Anchor::new(Vec2::new(500.0, 500.0), 50.0)
    }

    #[test]
    fn single_strand_lays_out_along_positive_x() {
        let bundle = StrandBundle::new(1, 3, 20.0, &anchor());

        let s = bundle.strand(0).unwrap();
        assert_eq!(s.len(), 3);
        assert!((s[0] - Vec2::new(550.0, 500.0)).length() < 1e-4);
        assert!((s[1] - Vec2::new(570.0, 500.0)).length() < 1e-4);
        assert!((s[2] - Vec2::new(590.0, 500.0)).length() < 1e-4);
        assert!(bundle.velocities().iter().all(|v| *v == Vec2::ZERO));
    }

    #[test]
    fn strands_fan_out_evenly() {
        let bundle = StrandBundle::new(4, 2, 10.0, &anchor());
        let a = anchor();

        // Strand 1 of 4 points straight down (+y), strand 2 to the left.
        let down = bundle.strand(1).unwrap();
        assert!((down[1] - (a.pos + Vec2::new(0.0, 60.0))).length() < 1e-3);
        let left = bundle.strand(2).unwrap();
        assert!((left[0] - (a.pos + Vec2::new(-50.0, 0.0))).length() < 1e-3);
    }

    #[test]
    fn initialize_replaces_previous_contents() {
        let mut bundle = StrandBundle::new(10, 5, 20.0, &anchor());
        bundle.velocities[7] = Vec2::new(3.0, 4.0);

        bundle.initialize(2, 3, 50.0, Vec2::new(100.0, 100.0), 50.0);

        assert_eq!(bundle.strand_count(), 2);
        assert_eq!(bundle.segments_per_strand(), 3);
        assert_eq!(bundle.total_segments(), 6);
        assert_eq!(bundle.velocities().len(), 6);
        assert!(bundle.velocities().iter().all(|v| *v == Vec2::ZERO));
        assert!((bundle.strand(0).unwrap()[2] - Vec2::new(250.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn out_of_range_strand_lookup_is_none() {
        let bundle = StrandBundle::new(2, 3, 20.0, &anchor());
        assert!(bundle.strand(2).is_none());
        assert!(bundle.strand_velocities(5).is_none());
        assert_eq!(bundle.strands().count(), 2);
    }

    #[test]
    fn shards_cover_requested_ranges() {
        let mut bundle = StrandBundle::new(10, 4, 20.0, &anchor());

        let shards = bundle.shards_mut(&[0..3, 3..7, 7..10]);

        let firsts: Vec<_> = shards.iter().map(|s| s.first_strand()).collect();
        let lens: Vec<_> = shards.iter().map(|s| s.len()).collect();
        assert_eq!(firsts, vec![0, 3, 7]);
        assert_eq!(lens, vec![3, 4, 3]);
    }

    #[test]
    fn stale_shard_ranges_are_clamped() {
        let mut bundle = StrandBundle::new(5, 4, 20.0, &anchor());

        // Bounds computed for a larger bundle, plus an overlapping range.
        let shards = bundle.shards_mut(&[0..4, 2..8, 8..12]);

        let lens: Vec<_> = shards.iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![4, 1, 0]);
        assert_eq!(shards[1].first_strand(), 4);
    }
}
