use std::error::Error;
use std::fmt;
use std::future;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::stopwatch::{Stopwatch, TimerSnapshot};

const UPDATE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Stop,
    Refresh,
}

#[derive(Debug)]
pub struct UnknownCommand(String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "stop" => Ok(Command::Stop),
            "refresh" => Ok(Command::Refresh),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

pub struct TimerService {
    stopwatch: Stopwatch,
    commands: mpsc::UnboundedReceiver<Command>,
    updates: broadcast::Sender<TimerSnapshot>,
    ticker: Option<Interval>,
    tick_interval: Duration,
}

#[derive(Clone)]
pub struct ServiceHandle {
    commands: mpsc::UnboundedSender<Command>,
    updates: broadcast::Sender<TimerSnapshot>,
}

impl ServiceHandle {
    // fire and forget: effects are only observable through the next snapshot
    pub fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("timer service is gone, dropping {:?}", command);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerSnapshot> {
        let updates = self.updates.subscribe();
        // a fresh subscriber should not render defaults until the next tick
        self.send(Command::Refresh);
        updates
    }
}

impl TimerService {
    pub fn new(tick_interval: Duration) -> (Self, ServiceHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

        let service = Self {
            stopwatch: Stopwatch::new(),
            commands: command_rx,
            updates: update_tx.clone(),
            ticker: None,
            tick_interval,
        };
        let handle = ServiceHandle {
            commands: command_tx,
            updates: update_tx,
        };
        (service, handle)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.broadcast(),
            }
        }
        debug!("all handles dropped, timer service exiting");
    }

    fn apply(&mut self, command: Command) {
        let now = time::Instant::now().into_std();
        let changed = match command {
            Command::Start => self.stopwatch.start(now),
            Command::Pause => self.stopwatch.pause(now),
            Command::Stop => self.stopwatch.stop(),
            Command::Refresh => false,
        };
        if changed {
            info!(
                "{:?}: elapsed {}ms",
                command,
                self.stopwatch.elapsed(now).as_millis()
            );
            self.sync_ticker();
        }
        // every command rebroadcasts, no-ops included
        self.broadcast();
    }

    // at most one tick source exists at any time; entering the running
    // state always replaces it with a fresh interval
    fn sync_ticker(&mut self) {
        if self.stopwatch.is_running() {
            let mut ticker =
                time::interval_at(time::Instant::now() + self.tick_interval, self.tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            self.ticker = Some(ticker);
        } else {
            self.ticker = None;
        }
    }

    fn broadcast(&self) {
        // nobody listening is fine, the next subscriber asks for a refresh
        let _ = self
            .updates
            .send(self.stopwatch.snapshot(time::Instant::now().into_std()));
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending::<()>().await,
    }
}
