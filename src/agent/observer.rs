//! Progress and token callbacks for agent pipelines.
//!
//! Observers let callers follow a long-running tailoring run (stream tokens
//! to a terminal, drive a progress bar) without the pipeline knowing how
//! the output is displayed.
//!
//! # Example
//!
//! ```
//! use resumind::agent::TailorObserver;
//!
//! #[derive(Default)]
//! struct ProgressLog(Vec<(String, f32)>);
//!
//! impl TailorObserver for ProgressLog {
//!     fn on_progress(&mut self, message: &str, percent: f32) {
//!         self.0.push((message.to_string(), percent));
//!     }
//! }
//! ```

/// Trait for observing agent pipelines.
///
/// All methods do nothing by default.
pub trait TailorObserver: Send {
    /// Called for every streamed chunk of model output.
    fn on_token(&mut self, token: &str) {
        let _ = token;
    }

    /// Called when the pipeline reaches a new stage.
    ///
    /// # Arguments
    /// * `message` - Human-readable stage description
    /// * `percent` - Overall completion, 0 to 100
    fn on_progress(&mut self, message: &str, percent: f32) {
        let _ = (message, percent);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TailorObserver for NoopObserver {}

/// Fans every callback out to several observers in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Box<dyn TailorObserver>>,
}

impl CompositeObserver {
    /// Create an empty composite observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer.
    pub fn with_observer<O: TailorObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl TailorObserver for CompositeObserver {
    fn on_token(&mut self, token: &str) {
        for observer in &mut self.observers {
            observer.on_token(token);
        }
    }

    fn on_progress(&mut self, message: &str, percent: f32) {
        for observer in &mut self.observers {
            observer.on_progress(message, percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl TailorObserver for Recorder {
        fn on_token(&mut self, token: &str) {
            self.0.lock().unwrap().push(format!("token:{}", token));
        }

        fn on_progress(&mut self, message: &str, percent: f32) {
            self.0
                .lock()
                .unwrap()
                .push(format!("progress:{}:{}", message, percent));
        }
    }

    #[test]
    fn test_noop_observer() {
        let mut observer = NoopObserver;
        observer.on_token("x");
        observer.on_progress("y", 50.0);
    }

    #[test]
    fn test_composite_fans_out() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut composite = CompositeObserver::new()
            .with_observer(Recorder(log.clone()))
            .with_observer(Recorder(log.clone()));

        assert_eq!(composite.len(), 2);
        composite.on_token("hi");
        composite.on_progress("Complete!", 100.0);

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                "token:hi",
                "token:hi",
                "progress:Complete!:100",
                "progress:Complete!:100"
            ]
        );
    }
}
