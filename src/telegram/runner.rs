//! Connection lifecycle and the update loop.
//!
//! 1. Open the session and start the sender pool
//! 2. Sign in as a bot if needed
//! 3. Stream updates, one task per update, until Ctrl+C or a stream failure
//! 4. Wait for in-flight update tasks
//! 5. Persist the update state and stop the sender pool

use std::sync::Arc;

use grammers_client::{Client, SenderPool, UpdatesConfiguration};
use grammers_session::storages::SqliteSession;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use super::{SupportBot, TelegramError};
use crate::commands::CommandHandler;
use crate::config::{BotSettings, TelegramConfig};

/// Connects to Telegram and serves updates until shutdown.
///
/// # Errors
///
/// Returns an error if the session cannot be opened or sign in fails.
/// Errors while answering individual updates are only logged.
pub async fn run(
    config: &TelegramConfig,
    settings: &BotSettings,
    handler: CommandHandler,
) -> Result<(), TelegramError> {
    info!("Connecting to Telegram...");

    let session = Arc::new(
        SqliteSession::open(&config.session_path)
            .await
            .map_err(|e| TelegramError::Session(e.to_string()))?,
    );

    let SenderPool {
        runner,
        updates,
        handle,
    } = SenderPool::new(Arc::clone(&session), config.api_id);

    let client = Client::new(handle.clone());

    let pool_task = tokio::spawn(async move {
        runner.run().await;
    });

    let mut bot = SupportBot::new(client.clone(), handler);
    if let Err(e) = bot.authorize(&config.bot_token, &config.api_hash).await {
        handle.thin.quit();
        join_pool(pool_task).await;
        return Err(e);
    }

    let mut updates = client
        .stream_updates(
            updates,
            UpdatesConfiguration {
                catch_up: settings.catch_up,
                ..Default::default()
            },
        )
        .await;

    info!("Bot is starting...");

    let mut tasks = JoinSet::new();

    loop {
        let update = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
            update = updates.next() => update,
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                log_task_result(joined);
                continue;
            }
        };

        match update {
            Ok(update) => {
                let bot = bot.clone();
                tasks.spawn(async move {
                    bot.handle_update(update).await;
                });
            }
            Err(e) => {
                error!("Update stream failed: {}", e);
                break;
            }
        }
    }

    drain_tasks(&mut tasks).await;

    updates.sync_update_state().await;

    info!("Disconnecting from Telegram...");
    handle.thin.quit();
    join_pool(pool_task).await;

    info!("Bot has stopped.");
    Ok(())
}

/// Logs the outcome of an update task. Returns `false` if it did not finish normally.
fn log_task_result(joined: Result<(), JoinError>) -> bool {
    match joined {
        Ok(()) => {
            debug!("Update task finished");
            true
        }
        Err(e) if e.is_panic() => {
            error!("Update task panicked: {}", e);
            false
        }
        Err(e) => {
            warn!("Update task cancelled: {}", e);
            false
        }
    }
}

/// Waits for every in-flight update task. Returns how many failed.
async fn drain_tasks(tasks: &mut JoinSet<()>) -> usize {
    if !tasks.is_empty() {
        info!("Waiting for {} pending update(s)...", tasks.len());
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        if !log_task_result(joined) {
            failed += 1;
        }
    }
    failed
}

/// Awaits the sender pool task. Returns `false` if it panicked or was cancelled.
async fn join_pool(pool_task: JoinHandle<()>) -> bool {
    match pool_task.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Sender pool task ended abnormally: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    async fn explode() {
        panic!("task blew up");
    }

    #[tokio::test]
    async fn test_drain_waits_for_in_flight_tasks() {
        let done = Arc::new(AtomicUsize::new(0));
        let mut tasks = JoinSet::new();

        for delay in [30, 10, 50] {
            let done = Arc::clone(&done);
            tasks.spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(drain_tasks(&mut tasks).await, 0);
        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_drain_counts_panicked_tasks() {
        let mut tasks = JoinSet::new();
        tasks.spawn(async {});
        tasks.spawn(explode());

        assert_eq!(drain_tasks(&mut tasks).await, 1);
    }

    #[tokio::test]
    async fn test_join_pool_reports_panic() {
        assert!(join_pool(tokio::spawn(async {})).await);
        assert!(!join_pool(tokio::spawn(explode())).await);
    }
}
