use std::fs;
use std::io;
use std::path::PathBuf;

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::net::UnixListener;
use tokio_util::codec::{FramedRead, LinesCodec};

use crate::service::{Command, ServiceHandle};

pub async fn listen(path: PathBuf, service: ServiceHandle) -> io::Result<()> {
    // a stale socket from a previous run would block the bind
    if path.exists() {
        fs::remove_file(&path)?;
    }
    let listener = UnixListener::bind(&path)?;
    info!("listening for commands on {}", path.display());

    loop {
        let (stream, _) = listener.accept().await?;
        let service = service.clone();
        tokio::spawn(async move {
            let mut lines = FramedRead::new(stream, LinesCodec::new());
            while let Some(line) = lines.next().await {
                match line {
                    Ok(line) => match line.trim().parse::<Command>() {
                        // fire and forget, the client never gets a reply
                        Ok(command) => service.send(command),
                        Err(err) => warn!("{}", err),
                    },
                    Err(err) => {
                        debug!("command connection lost: {}", err);
                        break;
                    }
                }
            }
        });
    }
}
