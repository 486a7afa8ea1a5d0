use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use gaf::{find_root, Func, NoConvergence, SolverSettings};
use indicatif::ProgressBar;
use num::complex::Complex64;

/// Seeds handed to a worker at a time.
const CHUNK_SIZE: usize = 64;

/// Solves one seed. A panic inside the evaluation only fails this seed.
fn solve_seed(
    func: &impl Func,
    z0: Complex64,
    solver: &SolverSettings,
) -> Result<Complex64, NoConvergence> {
    catch_unwind(AssertUnwindSafe(|| find_root(func, z0, solver))).unwrap_or_else(|_| {
        log::warn!("Solver panicked for seed {z0}");
        Err(NoConvergence::Panicked)
    })
}

/// Solves all seeds on a thread pool. The result has one entry per seed in
/// seed order, exactly as [`gaf::solve_seeds`] would return it.
pub fn solve_seeds<F>(
    func: Arc<F>,
    seeds: &[Complex64],
    solver: SolverSettings,
    num_threads: usize,
    pb: &ProgressBar,
) -> Vec<Result<Complex64, NoConvergence>>
where
    F: Func + Send + Sync + 'static,
{
    let pool = threadpool::ThreadPool::new(num_threads.max(1));
    let (tx, rx) = std::sync::mpsc::channel();

    let chunks = seeds.chunks(CHUNK_SIZE).map(|chunk| chunk.to_vec());
    let mut num_chunks = 0;

    for (index, chunk) in chunks.enumerate() {
        let tx = tx.clone();
        let func = func.clone();
        pool.execute(move || {
            let results = chunk
                .iter()
                .map(|&z0| solve_seed(func.as_ref(), z0, &solver))
                .collect::<Vec<_>>();
            if tx.send((index, results)).is_err() {
                log::warn!("Chunk {index} finished after the scan was collected");
            }
        });
        num_chunks += 1;
    }
    drop(tx);

    let mut solved = rx
        .into_iter()
        .take(num_chunks)
        .map(|r| {
            pb.inc(r.1.len() as u64);
            r
        })
        .collect::<Vec<_>>();

    pool.join();

    let num_solved = solved.iter().map(|(_, results)| results.len()).sum::<usize>();
    if num_solved != seeds.len() {
        log::warn!(
            "{} of {} seeds were lost to panicking workers",
            seeds.len() - num_solved,
            seeds.len()
        );
    }

    solved.sort_by_key(|(index, _)| *index);
    solved.into_iter().flat_map(|(_, results)| results).collect()
}
