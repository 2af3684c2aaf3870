//! Recording adapter for the `Clock` port.

use chrono::NaiveDateTime;

use super::record_interaction;
use crate::cassette::session::SharedRecorder;
use crate::ports::Clock;

/// Records clock readings while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: SharedRecorder,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> NaiveDateTime {
        let result = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &(), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::LiveClock;
    use crate::cassette::recorder::CassetteRecorder;

    #[test]
    fn records_now_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "/repo")));

        {
            let clock = RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder));
            let _ = clock.now();
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 1);
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("port: clock"));
        assert!(content.contains("method: now"));
    }
}
