// src/scrape/pool.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::consts::{ WORKERS, REQUEST_PAUSE_MS, JITTER_MS },
    core::net::{ FetchError, PageSource },
    progress::Progress,
};

/// One page to fetch. `label` is what progress reports show.
#[derive(Clone, Debug)]
pub struct Job {
    pub label: String,
    pub url: String,
}

/// Fetch every job with a small pool of workers. Results come back in job
/// order regardless of completion order. Each finished job is reported to
/// `progress`; the caller owns `begin`/`finish`.
pub fn fetch_all<S: PageSource + ?Sized>(
    source: &S,
    jobs: &[Job],
    mut progress: Option<&mut dyn Progress>,
) -> Vec<Result<String, FetchError>> {
    if jobs.is_empty() {
        return Vec::new();
    }
    let mut slots: Vec<Option<Result<String, FetchError>>> = jobs.iter().map(|_| None).collect();

    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<String, FetchError>)>();
    let workers = WORKERS.min(jobs.len()).max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = Arc::clone(&counter);
            let tx = res_tx.clone();

            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= jobs.len() {
                        break;
                    }
                    let result = source.get_text(&jobs[i].url);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    let jitter = (i as u64 * 7) % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            let job = &jobs[i];
            match &result {
                Ok(body) => {
                    tracing::debug!("{}: {} bytes", job.label, body.len());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&job.label);
                    }
                }
                Err(e) => {
                    tracing::warn!("{} ({}): {e}", job.label, job.url);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&job.label, &e.to_string());
                    }
                }
            }
            slots[i] = Some(result);
        }
    });

    slots
        .into_iter()
        .zip(jobs)
        .map(|(slot, job)| {
            slot.unwrap_or_else(|| Err(FetchError::Unfinished { url: job.url.clone() }))
        })
        .collect()
}
