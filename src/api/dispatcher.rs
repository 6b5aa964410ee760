// src/api/dispatcher.rs

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use crate::api::client::ApiClient;
use crate::error::ApiError;
use crate::model::{GenerationResult, HealthStatus};

#[derive(Debug)]
pub enum DispatchEvent {
    Finished {
        result: Result<GenerationResult, ApiError>,
        started_at: Instant,
    },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("a generation request is already in flight")]
pub struct Busy;

/// Runs generation requests on a worker thread, one at a time.
pub struct Dispatcher {
    client: ApiClient,
    in_flight: Option<Receiver<DispatchEvent>>,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            in_flight: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn submit(&mut self, code: String) -> Result<(), Busy> {
        if self.in_flight.is_some() {
            return Err(Busy);
        }

        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        let started_at = Instant::now();

        thread::spawn(move || {
            let result = client.generate(&code);
            let _ = tx.send(DispatchEvent::Finished { result, started_at });
        });

        self.in_flight = Some(rx);
        Ok(())
    }

    /// Non-blocking check for a completed request.
    pub fn poll(&mut self) -> Option<DispatchEvent> {
        let rx = self.in_flight.as_ref()?;

        match rx.try_recv() {
            Ok(evt) => {
                self.in_flight = None;
                Some(evt)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                Some(DispatchEvent::Finished {
                    result: Err(ApiError::Network("request worker exited".into())),
                    started_at: Instant::now(),
                })
            }
        }
    }
}

/// Fire-and-forget health probe; the receiver yields exactly one status.
pub fn spawn_health_check(client: ApiClient) -> Receiver<HealthStatus> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(client.check_health());
    });
    rx
}
