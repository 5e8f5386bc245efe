//! Local byte source: newline-delimited JSON events on stdin. Stands in for
//! the queue transport when running outside the cluster.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::service::MessageHandler;

/// Feeds stdin lines to the handler until EOF or shutdown. Blank lines are
/// skipped; undecodable lines are the handler's problem and never stop the
/// loop.
pub async fn run_stdin_source<H: MessageHandler>(
    handler: &H,
    shutdown: &CancellationToken,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),

            line = lines.next_line() => match line? {
                Some(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    handler.handle_message(line.as_bytes()).await;
                }
                None => return Ok(()),
            },
        }
    }
}
