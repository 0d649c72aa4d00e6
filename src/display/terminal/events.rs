use crossterm::event::{self, KeyEvent};
use std::{thread, time::Duration};
use tokio::sync::mpsc;

pub struct Events {
    rx: mpsc::UnboundedReceiver<KeyEvent>,
}

impl Events {
    pub fn new(poll_rate: u64) -> Events {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::spawn(move || loop {
            if event::poll(Duration::from_millis(poll_rate)).unwrap_or(false) {
                if let Ok(event::Event::Key(key)) = event::read() {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
            }
        });

        Events { rx }
    }

    pub async fn next(&mut self) -> Option<KeyEvent> {
        self.rx.recv().await
    }
}
