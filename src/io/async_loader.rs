//! Asynchronous dataset loading.
//!
//! Documents are parsed on a background thread so the GUI stays responsive
//! while large files are read.

use crate::io::LoadingState;
use eframe::egui;
use mltable::{generate_document, DatasetDocument, SampleConfig};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Outcome of a background load, polled once per frame.
pub enum LoadResult {
    Success {
        document: DatasetDocument,
        path: Option<PathBuf>,
    },
    Error(String),
    /// Nothing finished since the last poll
    None,
}

pub struct AsyncLoader {
    loading_state: Arc<Mutex<LoadingState>>,
    loading_receiver: Option<Receiver<Result<DatasetDocument, String>>>,
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .map(|state| state.in_progress)
            .unwrap_or(false)
    }

    /// Starts reading a document from `path` on a background thread.
    ///
    /// Call `check_completion()` every frame to pick up the result.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        let generation = with_state(&self.loading_state, LoadingState::begin);
        self.pending_load_path = Some(path.clone());

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = DatasetDocument::load(&path).map_err(|e| e.to_string());
            if let Err(e) = &result {
                log::warn!("failed to load {}: {}", path.display(), e);
            }

            // The receiver is gone when a newer load replaced this one.
            let _ = sender.send(result);

            if !with_state(&loading_state, |state| state.finish(generation)) {
                log::debug!("load of {} superseded", path.display());
            }
            ctx_handle.request_repaint();
        });
    }

    /// Generates sample data in place. Fast enough to skip the thread.
    pub fn load_sample(&mut self, config: &SampleConfig) -> DatasetDocument {
        let document = generate_document(config);
        log::info!(
            "generated sample dataset: {} top-level rows, seed {}",
            document.data.len(),
            config.seed
        );
        document
    }

    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        match result {
            Ok(document) => LoadResult::Success {
                document,
                path: self.pending_load_path.take(),
            },
            Err(error_msg) => {
                self.pending_load_path = None;
                LoadResult::Error(error_msg)
            }
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn with_state<T>(state: &Mutex<LoadingState>, f: impl FnOnce(&mut LoadingState) -> T) -> T {
    match state.lock() {
        Ok(mut state) => f(&mut *state),
        Err(poisoned) => f(&mut *poisoned.into_inner()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_sample_loading() {
        let mut loader = AsyncLoader::new();
        let document = loader.load_sample(&SampleConfig::default());
        assert_eq!(document.data.len(), SampleConfig::default().roots);
    }

    #[test]
    fn test_second_load_stays_in_progress_after_first_finishes() {
        let loader = AsyncLoader::new();
        let first = with_state(&loader.loading_state, LoadingState::begin);
        let second = with_state(&loader.loading_state, LoadingState::begin);

        with_state(&loader.loading_state, |state| state.finish(first));
        assert!(loader.is_loading());

        with_state(&loader.loading_state, |state| state.finish(second));
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }
}
