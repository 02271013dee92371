//! Animated "Syncing..." indicator
//!
//! Runs on its own timer, independent of the request it decorates. The
//! returned guard aborts the timer task when dropped, so leaving the syncing
//! state on any path stops the animation.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use tokio::task::JoinHandle;

pub const PROGRESS_LABEL: &str = "Syncing";
const MAX_DOTS: usize = 3;

/// Text of the indicator at a given tick: the label plus 0..=3 dots, wrapping
pub fn frame(tick: usize) -> String {
    format!("{}{}", PROGRESS_LABEL, ".".repeat(tick % (MAX_DOTS + 1)))
}

/// Where indicator frames are drawn
pub trait ProgressSink: Send + Sync + 'static {
    fn draw(&self, frame: &str);

    /// Remove the indicator once syncing is over
    fn clear(&self);
}

/// Redraws the indicator in place on stderr
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn draw(&self, frame: &str) {
        let mut stderr = std::io::stderr();
        // Pad so a shorter frame overwrites the previous one
        let pad = (PROGRESS_LABEL.len() + MAX_DOTS).saturating_sub(frame.len());
        let _ = write!(stderr, "\r{}{}", frame.yellow().bold(), " ".repeat(pad));
        let _ = stderr.flush();
    }

    fn clear(&self) {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{}\r", " ".repeat(PROGRESS_LABEL.len() + MAX_DOTS));
        let _ = stderr.flush();
    }
}

/// Handle on a running indicator; dropping it stops the animation
pub struct ProgressGuard {
    task: Option<JoinHandle<()>>,
    sink: Arc<dyn ProgressSink>,
}

impl std::fmt::Debug for ProgressGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressGuard")
            .field("running", &self.is_running())
            .finish()
    }
}

impl ProgressGuard {
    /// Start drawing frames every `interval` until the guard is dropped
    pub fn start(sink: Arc<dyn ProgressSink>, interval: Duration) -> Self {
        let task_sink = Arc::clone(&sink);
        let task = tokio::spawn(async move {
            // tokio panics on a zero period
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            let mut tick = 0usize;
            loop {
                ticker.tick().await;
                task_sink.draw(&frame(tick));
                tick = tick.wrapping_add(1);
            }
        });
        log::debug!("Progress indicator started ({:?} period)", interval);

        Self {
            task: Some(task),
            sink,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the animation now rather than at drop
    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.sink.clear();
            log::debug!("Progress indicator stopped");
        }
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records drawn frames and clears
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub frames: Mutex<Vec<String>>,
        pub clears: Mutex<usize>,
    }

    impl RecordingSink {
        pub fn frames(&self) -> Vec<String> {
            self.frames.lock().unwrap().clone()
        }

        pub fn clears(&self) -> usize {
            *self.clears.lock().unwrap()
        }
    }

    impl ProgressSink for RecordingSink {
        fn draw(&self, frame: &str) {
            self.frames.lock().unwrap().push(frame.to_string());
        }

        fn clear(&self) {
            *self.clears.lock().unwrap() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn test_frames_cycle_through_dots() {
        let frames: Vec<String> = (0..6).map(frame).collect();
        assert_eq!(
            frames,
            vec![
                "Syncing",
                "Syncing.",
                "Syncing..",
                "Syncing...",
                "Syncing",
                "Syncing."
            ]
        );
    }

    #[tokio::test]
    async fn test_ticks_until_stopped() {
        let sink = Arc::new(RecordingSink::default());
        let guard = ProgressGuard::start(sink.clone(), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(guard.is_running());
        guard.stop();

        let drawn = sink.frames().len();
        assert!(drawn >= 2, "expected several frames, got {}", drawn);
        assert_eq!(sink.frames()[0], "Syncing");
        assert_eq!(sink.clears(), 1);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(sink.frames().len(), drawn);
    }

    #[tokio::test]
    async fn test_drop_cancels_timer() {
        let sink = Arc::new(RecordingSink::default());
        {
            let _guard = ProgressGuard::start(sink.clone(), Duration::from_millis(10));
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        let drawn = sink.frames().len();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(sink.frames().len(), drawn);
        assert_eq!(sink.clears(), 1);
    }
}
