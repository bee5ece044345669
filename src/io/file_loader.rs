//! Shared flag for a background dataset load.

/// Wrapped in `Arc<Mutex<_>>` and shared with the loading thread; results
/// travel through a channel.
///
/// Each load gets a generation number. Only the thread holding the latest
/// generation may clear the flag.
#[derive(Debug, Default)]
pub struct LoadingState {
    pub in_progress: bool,
    generation: u64,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new load as running and returns its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.in_progress = true;
        self.generation
    }

    /// Clears the flag if `generation` is still the latest load. Returns
    /// false for a superseded load.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_progress = false;
        true
    }
}
