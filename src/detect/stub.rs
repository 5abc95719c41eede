//! Stub detector backend

use super::{Detection, Detector};
use crate::error::Result;
use crate::frame::Frame;

/// Detector that replays a fixed script of detections.
///
/// Stands in for the real model in tests and in deployments without one.
/// Each call pops the next scripted result; once the script is exhausted it
/// returns no detections.
pub struct StubDetector {
    script: Vec<Vec<Detection>>,
    calls: usize,
}

impl StubDetector {
    /// Detector that never reports anything
    pub fn empty() -> Self {
        Self {
            script: Vec::new(),
            calls: 0,
        }
    }

    /// Detector that replays the given per-call results in order
    pub fn scripted(script: Vec<Vec<Detection>>) -> Self {
        Self { script, calls: 0 }
    }

    /// Number of times `detect` was invoked
    pub fn call_count(&self) -> usize {
        self.calls
    }
}

impl Detector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>> {
        let result = self.script.get(self.calls).cloned().unwrap_or_default();
        self.calls += 1;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replay_then_empty() {
        let mut detector = StubDetector::scripted(vec![
            vec![Detection::new(1.0, 2.0, 3.0, 4.0, "person", 0.9)],
            vec![],
        ]);
        let frame = Frame::black(4, 4);

        assert_eq!(detector.detect(&frame).unwrap().len(), 1);
        assert!(detector.detect(&frame).unwrap().is_empty());
        assert!(detector.detect(&frame).unwrap().is_empty());
        assert_eq!(detector.call_count(), 3);
    }
}
