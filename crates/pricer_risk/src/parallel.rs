//! Rayon helpers for instrument-level parallelism.
//!
//! Instruments are valued independently, so a portfolio pass is a parallel
//! map followed by order-insensitive sums. Small books stay on the calling
//! thread.

use rayon::prelude::*;

/// Minimum number of items before work is spread over the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Fallible map preserving input order, parallel above `threshold` items.
///
/// The first error in input order is returned.
///
/// # Examples
///
/// ```
/// use pricer_risk::parallel::try_parallel_map;
///
/// let squares: Result<Vec<i32>, ()> = try_parallel_map(&[1, 2, 3], 2, |&x| Ok(x * x));
/// assert_eq!(squares, Ok(vec![1, 4, 9]));
/// ```
pub fn try_parallel_map<T, R, E, F>(items: &[T], threshold: usize, mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    if items.len() >= threshold {
        items.par_iter().map(mapper).collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

/// Parallel sum of values.
pub fn parallel_sum<T, F>(items: &[T], extractor: F) -> f64
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    items.par_iter().map(extractor).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_parallel_map_preserves_order() {
        let items: Vec<i32> = (0..1000).collect();
        let doubled: Result<Vec<i32>, ()> = try_parallel_map(&items, 1, |&x| Ok(x * 2));
        let doubled = doubled.unwrap();
        assert_eq!(doubled.len(), 1000);
        assert_eq!(doubled[500], 1000);
    }

    #[test]
    fn test_try_parallel_map_reports_error() {
        let items: Vec<i32> = (0..100).collect();
        let result: Result<Vec<i32>, String> = try_parallel_map(&items, 10, |&x| {
            if x == 42 {
                Err("boom".to_string())
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn test_parallel_sum() {
        let items: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(parallel_sum(&items, |&x| x), 15.0);
    }
}
