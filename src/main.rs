use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use clap::{App, Arg};
use log::{error, info};

mod config;
mod display;
mod file;
mod indicator;
mod server;
mod service;
mod stopwatch;
mod time_format;

use config::Config;
use display::{Headless, TerminalApp};
use service::TimerService;

const SOCKET_NAME: &str = "traywatch.sock";

#[async_trait]
pub trait TimerDisplay {
    async fn run(&mut self) -> Result<bool, Box<dyn Error>>;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let default_socket = format!(
        "{}/{}",
        env::var("XDG_RUNTIME_DIR").unwrap_or("/tmp".to_string()),
        SOCKET_NAME
    );
    let matches = App::new("traywatch")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("socket")
                .short("s")
                .long("socket")
                .default_value(&default_socket),
        )
        .arg(Arg::with_name("headless").long("headless"))
        .get_matches();

    let config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // explicit --socket wins over the config file
    let socket = if matches.occurrences_of("socket") > 0 {
        matches.value_of("socket").unwrap().to_string()
    } else {
        config.socket.clone().unwrap_or_else(|| default_socket.clone())
    };

    let (service, handle) = TimerService::new(Duration::from_millis(config.tick_interval_ms));
    tokio::spawn(service.run());

    let listener = handle.clone();
    let listener_socket = PathBuf::from(&socket);
    tokio::spawn(async move {
        if let Err(err) = server::listen(listener_socket, listener).await {
            error!("command listener failed: {}", err);
        }
    });

    let mut display: Box<dyn TimerDisplay> = if matches.is_present("headless") {
        Box::new(Headless::new(&handle))
    } else {
        Box::new(TerminalApp::new(&handle, &config)?)
    };

    loop {
        tokio::select! {
            exit = display.run() => {
                if exit? {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    fs::remove_file(&socket).ok();
    info!("shutting down");
    Ok(())
}
