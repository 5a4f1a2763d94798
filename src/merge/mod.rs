//! Loading and merging input files on a background worker
//!
//! The worker is the only part of the crate that runs concurrently with the
//! caller. It reports one progress tick per loaded file and finishes with
//! either the merged table or the failure.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, TimeZone};
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::error::{Error, Result};
use crate::dataframe::{concat, DataFrame};
use crate::io::{load_table, CsvOptions};

/// Events sent by the merge worker
#[derive(Debug)]
pub enum MergeEvent {
    /// One more file has been loaded
    Progress {
        completed: usize,
        total: usize,
        path: PathBuf,
    },
    /// All files were loaded and concatenated
    Completed(DataFrame),
    /// Loading or concatenation failed; nothing was merged
    Failed(Error),
}

/// Load every file in order and concatenate them
///
/// `on_progress` is called after each file with (completed, total, path).
pub fn merge_files<F>(paths: &[PathBuf], options: &CsvOptions, mut on_progress: F) -> Result<DataFrame>
where
    F: FnMut(usize, usize, &Path),
{
    if paths.is_empty() {
        return Err(Error::EmptyData("No files selected!".to_string()));
    }

    let total = paths.len();
    let mut frames = Vec::with_capacity(total);
    for (i, path) in paths.iter().enumerate() {
        frames.push(load_table(path, options)?);
        on_progress(i + 1, total, path);
    }

    concat(&frames)
}

/// Handle to a running merge
#[derive(Debug)]
pub struct MergeHandle {
    events: Receiver<MergeEvent>,
    worker: JoinHandle<()>,
}

impl MergeHandle {
    /// Channel delivering progress and the final outcome
    pub fn events(&self) -> &Receiver<MergeEvent> {
        &self.events
    }

    /// Block until the worker finishes, forwarding progress ticks
    pub fn wait<F>(self, mut on_progress: F) -> Result<DataFrame>
    where
        F: FnMut(usize, usize, &Path),
    {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                MergeEvent::Progress {
                    completed,
                    total,
                    path,
                } => on_progress(completed, total, &path),
                MergeEvent::Completed(df) => outcome = Some(Ok(df)),
                MergeEvent::Failed(err) => outcome = Some(Err(err)),
            }
        }

        self.worker
            .join()
            .map_err(|_| Error::Worker("merge worker panicked".to_string()))?;
        outcome.unwrap_or_else(|| {
            Err(Error::Worker(
                "merge worker stopped without a result".to_string(),
            ))
        })
    }
}

/// Start merging `paths` on a background thread
pub fn spawn_merge(paths: Vec<PathBuf>, options: CsvOptions) -> Result<MergeHandle> {
    let (sender, events) = unbounded();

    let worker = thread::Builder::new()
        .name("merge-worker".to_string())
        .spawn(move || run_merge(paths, options, sender))
        .map_err(|e| Error::Worker(format!("could not start merge worker: {}", e)))?;

    Ok(MergeHandle { events, worker })
}

fn run_merge(paths: Vec<PathBuf>, options: CsvOptions, sender: Sender<MergeEvent>) {
    log::info!("Merging {} file(s)", paths.len());
    let result = merge_files(&paths, &options, |completed, total, path| {
        // The receiver may have been dropped; the merge still runs to completion
        let _ = sender.send(MergeEvent::Progress {
            completed,
            total,
            path: path.to_path_buf(),
        });
    });

    let event = match result {
        Ok(df) => MergeEvent::Completed(df),
        Err(err) => {
            log::error!("Merge failed: {}", err);
            MergeEvent::Failed(err)
        }
    };
    let _ = sender.send(event);
}

/// File name suggested for a merged output, e.g. `merged_20240131_093000.gz`
pub fn default_merged_file_name<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.gz", prefix, at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_merged_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 1, 31, 9, 30, 0).unwrap();
        assert_eq!(
            default_merged_file_name("merged", &at),
            "merged_20240131_093000.gz"
        );
    }

    #[test]
    fn test_merge_nothing_is_an_error() {
        let result = merge_files(&[], &CsvOptions::default(), |_, _, _| {});
        assert!(matches!(result, Err(Error::EmptyData(_))));
    }
}
