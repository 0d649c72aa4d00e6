use crate::indicator;
use crate::service::ServiceHandle;
use crate::stopwatch::TimerSnapshot;
use crate::TimerDisplay;

use std::error::Error;

use async_trait::async_trait;
use log::trace;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

pub struct App {
    updates: broadcast::Receiver<TimerSnapshot>,
}

impl App {
    pub fn new(service: &ServiceHandle) -> Self {
        Self {
            updates: service.subscribe(),
        }
    }
}

#[async_trait]
impl TimerDisplay for App {
    async fn run(&mut self) -> Result<bool, Box<dyn Error>> {
        match self.updates.recv().await {
            Ok(snapshot) => {
                trace!("{}", indicator::tooltip(&snapshot));
                Ok(false)
            }
            // a missed update is superseded by the next one
            Err(RecvError::Lagged(_)) => Ok(false),
            Err(RecvError::Closed) => Ok(true),
        }
    }
}
