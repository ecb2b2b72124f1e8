//! Fork-join execution of the simulation step across worker threads.

use crate::{bundle::StrandBundle, step::StepParams, types::StrandId};
use std::{num::NonZeroUsize, ops::Range, thread};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// How shards are executed.
#[derive(Debug)]
enum Backend {
    /// Spawn one scoped thread per shard every frame and join them.
    Scoped,
    /// Run shards on a persistent pool; the pool scope is the barrier.
    Pool(rayon::ThreadPool),
}

/// Splits each frame's work into contiguous shards and runs them in parallel.
///
/// [`Dispatcher::run`] does not return until every shard has finished, so
/// callers never observe a partially advanced frame.
#[derive(Debug)]
pub struct Dispatcher {
    workers: usize,
    backend: Backend,
}

/// Hardware parallelism, or 1 if it cannot be determined.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Partitions `[0, strand_count)` into `workers` contiguous ranges.
///
/// Every range holds `strand_count / workers` strands and the last one
/// absorbs the remainder. With fewer strands than workers, all but the
/// last range are empty.
///
/// ### Parameters
/// - `strand_count` - Number of strands in the bundle.
/// - `workers` - Number of ranges to produce. `0` is treated as 1.
///
/// ### Returns
/// Exactly `workers` ascending, non-overlapping ranges whose union is
/// `0..strand_count`.
pub fn partition(strand_count: usize, workers: usize) -> Vec<Range<StrandId>> {
    let workers = workers.max(1);
    let per_worker = strand_count / workers;
    (0..workers)
        .map(|w| {
            let start = w * per_worker;
            let end = if w == workers - 1 {
                strand_count
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

impl Dispatcher {
    /// Thread-per-shard dispatcher with `workers` shards per frame.
    pub fn scoped(workers: usize) -> Result<Self, DispatchError> {
        if workers == 0 {
            return Err(DispatchError::NoWorkers);
        }
        debug!(workers, "scoped dispatcher ready");
        Ok(Self {
            workers,
            backend: Backend::Scoped,
        })
    }

    /// Dispatcher backed by a persistent pool of `workers` threads.
    pub fn pooled(workers: usize) -> Result<Self, DispatchError> {
        if workers == 0 {
            return Err(DispatchError::NoWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("strand-worker-{i}"))
            .build()?;
        debug!(workers, "pooled dispatcher ready");
        Ok(Self {
            workers,
            backend: Backend::Pool(pool),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Advances every strand of `bundle` by one frame.
    ///
    /// The scoped backend spawns one thread per range, empty ranges
    /// included. The pool backend only queues non-empty shards.
    ///
    /// ### Parameters
    /// - `bundle` - Strands to advance. Shards borrow disjoint sub-slices
    ///   of its buffers for the duration of the call.
    /// - `params` - Frame snapshot shared read-only by every worker.
    pub fn run(&self, bundle: &mut StrandBundle, params: &StepParams) {
        let ranges = partition(bundle.strand_count(), self.workers);
        let shards = bundle.shards_mut(&ranges);

        match &self.backend {
            Backend::Scoped => thread::scope(|s| {
                for mut shard in shards {
                    s.spawn(move || shard.step(params));
                }
            }),
            Backend::Pool(pool) => pool.scope(|s| {
                for mut shard in shards.into_iter().filter(|shard| !shard.is_empty()) {
                    s.spawn(move |_| shard.step(params));
                }
            }),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            workers: available_workers(),
            backend: Backend::Scoped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{anchor::Anchor, step::step_range};
    use glam::Vec2;

    fn params() -> StepParams {
        StepParams {
            dt: 0.016,
            gravity: 5000.0,
            rest_length: 20.0,
            stiffness: 0.1,
            damping: 0.95,
            anchor_pos: Vec2::new(480.0, 510.0),
            anchor_radius: 50.0,
        }
    }

    fn bundle(strands: usize) -> StrandBundle {
        StrandBundle::new(strands, 10, 20.0, &Anchor::new(Vec2::new(500.0, 500.0), 50.0))
    }

    #[test]
    fn partition_gives_remainder_to_last_shard() {
        assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(partition(9, 3), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn partition_with_more_workers_than_strands() {
        assert_eq!(partition(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    }

    #[test]
    fn partition_treats_zero_workers_as_one() {
        assert_eq!(partition(5, 0), vec![0..5]);
    }

    #[test]
    fn partition_covers_every_strand_once() {
        for strands in [0, 1, 7, 100, 1000] {
            for workers in 1..=16 {
                let ranges = partition(strands, workers);
                assert_eq!(ranges.len(), workers);
                let mut next = 0;
                for r in &ranges {
                    assert_eq!(r.start, next);
                    next = r.end;
                }
                assert_eq!(next, strands);
            }
        }
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(Dispatcher::scoped(0), Err(DispatchError::NoWorkers)));
        assert!(matches!(Dispatcher::pooled(0), Err(DispatchError::NoWorkers)));
    }

    #[test]
    fn default_uses_at_least_one_worker() {
        assert!(Dispatcher::default().workers() >= 1);
    }

    #[test]
    fn backends_match_single_threaded_step() {
        let p = params();
        let mut reference = bundle(101);
        let mut scoped = reference.clone();
        let mut pooled = reference.clone();

        let scoped_dispatcher = Dispatcher::scoped(4).unwrap();
        let pooled_dispatcher = Dispatcher::pooled(3).unwrap();

        for _ in 0..10 {
            step_range(&mut reference, 0..101, &p);
            scoped_dispatcher.run(&mut scoped, &p);
            pooled_dispatcher.run(&mut pooled, &p);
        }

        assert_eq!(reference.positions(), scoped.positions());
        assert_eq!(reference.velocities(), scoped.velocities());
        assert_eq!(reference.positions(), pooled.positions());
        assert_eq!(reference.velocities(), pooled.velocities());
    }

    #[test]
    fn single_strand_with_many_workers() {
        let mut p = params();
        p.anchor_pos = Vec2::new(500.0, 500.0);
        let mut b = bundle(1);
        let before = b.strand(0).unwrap().to_vec();

        Dispatcher::scoped(8).unwrap().run(&mut b, &p);

        let after = b.strand(0).unwrap();
        assert!(after[1..].iter().zip(&before[1..]).all(|(a, b)| a.y > b.y));
    }

    #[test]
    fn pool_skips_empty_shards_without_losing_strands() {
        let p = params();
        let mut reference = bundle(3);
        let mut pooled = reference.clone();

        // Eight workers over three strands: seven shards are empty.
        let dispatcher = Dispatcher::pooled(8).unwrap();
        for _ in 0..5 {
            step_range(&mut reference, 0..3, &p);
            dispatcher.run(&mut pooled, &p);
        }

        assert_eq!(reference.positions(), pooled.positions());
        assert_eq!(reference.velocities(), pooled.velocities());
    }
}
