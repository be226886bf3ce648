//! Form submission lifecycle
//!
//! `Idle -> Submitting -> Idle | Failed`. While a request is in flight the
//! form refuses another submit, so double clicks cannot create duplicates.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::{ApiRequest, Backend};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

/// Returned by [`Submitter::poll`] when the backend accepted the save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved;

#[derive(Debug, Default)]
pub struct Submitter {
    state: SubmitState,
    inflight: Option<Receiver<Result<()>>>,
}

impl Submitter {
    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Send `request` on a background thread.
    pub fn submit(&mut self, backend: Arc<dyn Backend>, request: ApiRequest) -> Result<()> {
        if self.is_submitting() {
            return Err(Error::SubmitInFlight);
        }

        let (tx, rx) = mpsc::channel();
        let label = format!("{:?} {}", request.method, request.path);
        std::thread::spawn(move || {
            let outcome = backend.execute(request).map(|_| ());
            // receiver is gone if the form was closed mid-flight
            let _ = tx.send(outcome);
        });

        info!("Submitting {}", label);
        self.state = SubmitState::Submitting;
        self.inflight = Some(rx);
        Ok(())
    }

    /// Record a failure that happened before anything was sent.
    pub fn fail(&mut self, err: &Error) {
        self.state = SubmitState::Failed(err.user_message());
    }

    /// Check on the in-flight request without blocking.
    pub fn poll(&mut self) -> Option<Saved> {
        let rx = self.inflight.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(Error::decode("request thread exited")),
        };
        self.inflight = None;
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: Result<()>) -> Option<Saved> {
        match outcome {
            Ok(()) => {
                self.state = SubmitState::Idle;
                Some(Saved)
            }
            Err(e) => {
                error!("Error saving: {}", e);
                self.state = SubmitState::Failed(e.user_message());
                None
            }
        }
    }

    #[cfg(test)]
    fn wait(&mut self) -> Option<Saved> {
        let rx = self.inflight.take()?;
        let outcome = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap_or_else(|_| Err(Error::decode("timed out")));
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockBackend;
    use crate::api::Payload;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Holds every request until the test releases it.
    struct GatedBackend {
        gate: Mutex<Receiver<()>>,
    }

    impl Backend for GatedBackend {
        fn execute(&self, _request: ApiRequest) -> Result<Value> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(Value::Null)
        }
    }

    fn request() -> ApiRequest {
        ApiRequest::create("banners", Payload::Empty)
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let (release, gate) = mpsc::channel();
        let backend: Arc<dyn Backend> = Arc::new(GatedBackend {
            gate: Mutex::new(gate),
        });
        let mut submitter = Submitter::default();

        submitter.submit(backend.clone(), request()).unwrap();
        assert!(submitter.is_submitting());
        assert!(submitter.poll().is_none());
        assert!(matches!(
            submitter.submit(backend, request()),
            Err(Error::SubmitInFlight)
        ));

        release.send(()).unwrap();
        assert_eq!(submitter.wait(), Some(Saved));
        assert_eq!(submitter.state(), &SubmitState::Idle);
    }

    #[test]
    fn test_failure_moves_to_failed_and_allows_retry() {
        let mock = Arc::new(MockBackend::default());
        mock.fail_path("banners");
        let backend: Arc<dyn Backend> = mock.clone();
        let mut submitter = Submitter::default();

        submitter.submit(backend.clone(), request()).unwrap();
        assert_eq!(submitter.wait(), None);
        assert!(matches!(submitter.state(), SubmitState::Failed(msg) if msg.contains("500")));

        submitter.submit(backend, request()).unwrap();
        assert!(submitter.is_submitting());
        let _ = submitter.wait();
        assert_eq!(mock.calls().len(), 2);
    }
}
