//! Row-partitioned execution on a fixed-size worker pool.
//!
//! Work is split into contiguous half-open row ranges ([`RowPartition`]),
//! one per worker. Partitioning depends only on the row range and the worker
//! count, never on scheduling, so results are identical for any pool size.
//!
//! Every entry point returns only after all of its partitions have finished,
//! which gives callers a barrier between consecutive stages.
//!
//! With the `parallel` feature the partitions run on a dedicated rayon
//! pool; without it they run inline, in partition order, on the caller's
//! thread.
use crate::error::{Error, Result};
use serde::Serialize;
use std::ops::Range;

/// Contiguous half-open range of rows `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RowPartition {
    pub start: usize,
    pub end: usize,
}

impl RowPartition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `rows` into at most `parts` contiguous, non-empty partitions that
/// tile the range without gaps or overlaps. Earlier partitions take one
/// extra row when the split is uneven.
pub fn partition_rows(rows: Range<usize>, parts: usize) -> Vec<RowPartition> {
    let n = rows.end.saturating_sub(rows.start);
    if n == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, n);
    let base = n / parts;
    let extra = n % parts;

    let mut out = Vec::with_capacity(parts);
    let mut start = rows.start;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        out.push(RowPartition {
            start,
            end: start + len,
        });
        start += len;
    }
    out
}

/// Fixed-size worker pool driving row-parallel stages and independent jobs.
pub struct Executor {
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl Executor {
    /// Build a pool with `workers` threads; `0` picks one per available CPU.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            workers
        };

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sobel-worker-{i}"))
            .build()
            .map_err(|e| Error::Executor(e.to_string()))?;

        Ok(Self {
            workers,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Call `f(y, row)` for every row `y` in `rows` of a row-major buffer.
    ///
    /// Each partition receives its own band of `data` (split with
    /// `split_at_mut`), so workers never share a row. `row` is `stride`
    /// elements long.
    ///
    /// # Panics
    /// Panics if `data` holds fewer than `rows.end * stride` elements.
    pub fn for_each_row<T, F>(&self, data: &mut [T], stride: usize, rows: Range<usize>, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        if stride == 0 {
            return;
        }
        let parts = partition_rows(rows, self.workers);
        let bands = split_bands(data, stride, &parts);
        self.dispatch(bands, |(part, band)| {
            for (k, row) in band.chunks_mut(stride).enumerate() {
                f(part.start + k, row);
            }
        });
    }

    /// Fold every partition of `rows` into a private accumulator, then merge
    /// the partial results in partition order once all workers are done.
    ///
    /// `merge` must be associative and commutative with `identity()` as its
    /// neutral element for the result to be independent of the worker count.
    pub fn reduce<A, Id, Fold, Merge>(
        &self,
        rows: Range<usize>,
        identity: Id,
        fold: Fold,
        merge: Merge,
    ) -> A
    where
        A: Send,
        Id: Fn() -> A + Sync,
        Fold: Fn(A, usize) -> A + Sync,
        Merge: Fn(A, A) -> A,
    {
        let parts = partition_rows(rows, self.workers);
        let mut partials: Vec<Option<A>> = parts.iter().map(|_| None).collect();
        let items: Vec<_> = parts.into_iter().zip(partials.iter_mut()).collect();
        self.dispatch(items, |(part, slot)| {
            *slot = Some(part.rows().fold(identity(), &fold));
        });
        partials.into_iter().flatten().fold(identity(), merge)
    }

    /// Run independent jobs concurrently and wait for all of them. Results
    /// come back in job order; one job failing does not stop the others.
    pub fn run_jobs<R, J>(&self, jobs: Vec<J>) -> Vec<R>
    where
        R: Send,
        J: FnOnce() -> R + Send,
    {
        let mut results: Vec<Option<R>> = jobs.iter().map(|_| None).collect();
        let items: Vec<_> = jobs.into_iter().zip(results.iter_mut()).collect();
        self.dispatch(items, |(job, slot)| {
            *slot = Some(job());
        });
        results.into_iter().flatten().collect()
    }

    fn dispatch<I, F>(&self, items: Vec<I>, job: F)
    where
        I: Send,
        F: Fn(I) + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if items.len() <= 1 || self.workers == 1 {
                items.into_iter().for_each(job);
                return;
            }
            let job = &job;
            self.pool.scope(|s| {
                for item in items {
                    s.spawn(move |_| job(item));
                }
            });
        }
        #[cfg(not(feature = "parallel"))]
        {
            items.into_iter().for_each(job);
        }
    }
}

fn split_bands<'a, T>(
    data: &'a mut [T],
    stride: usize,
    parts: &[RowPartition],
) -> Vec<(RowPartition, &'a mut [T])> {
    if let Some(last) = parts.last() {
        assert!(
            data.len() >= last.end * stride,
            "buffer of {} elements is too short for {} rows of stride {stride}",
            data.len(),
            last.end
        );
    }
    let mut bands = Vec::with_capacity(parts.len());
    let mut rest = data;
    let mut row = 0;
    for &part in parts {
        let (_, tail) = std::mem::take(&mut rest).split_at_mut((part.start - row) * stride);
        let (band, tail) = tail.split_at_mut(part.len() * stride);
        bands.push((part, band));
        rest = tail;
        row = part.end;
    }
    bands
}
