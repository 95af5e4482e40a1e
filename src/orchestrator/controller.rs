//! Command loop between UI layers and the GCD service.

use crate::api::{ApiClient, ApiError};
use crate::model::{ClientEvent, Credentials, SessionEnd};
use crate::session::{Session, SessionStore};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    Calculate { a: u64, b: u64 },
    LoadHistory,
    LoadHistoryItem { id: i64 },
    DeleteHistory { id: i64 },
    Quit,
}

/// Consume UI commands until `Quit`, emitting events for every outcome.
/// Restores a cached session on startup before processing commands.
pub(crate) async fn run_controller(
    mut client: ApiClient,
    store: SessionStore,
    event_tx: UnboundedSender<ClientEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    if let Some(session) = store.load() {
        client.set_token(&session.access_token);
        let _ = event_tx.send(ClientEvent::AuthOk {
            email: session.email,
        });
    }

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Login { email, password } => {
                let creds = Credentials { email, password };
                match client.login(&creds).await {
                    Ok(auth) => {
                        complete_auth(&mut client, &store, &event_tx, &creds.email, &auth.access_token);
                    }
                    Err(e) => fail(&mut client, &store, &event_tx, e, false),
                }
            }
            UiCommand::Register { email, password } => {
                let creds = Credentials { email, password };
                match client.register(&creds).await {
                    Ok(auth) => {
                        complete_auth(&mut client, &store, &event_tx, &creds.email, &auth.access_token);
                    }
                    Err(e) => fail(&mut client, &store, &event_tx, e, false),
                }
            }
            UiCommand::Logout => {
                if let Err(e) = store.clear() {
                    warn!("failed to clear session file: {e:#}");
                }
                client.clear_token();
                let _ = event_tx.send(ClientEvent::SessionCleared {
                    reason: SessionEnd::Logout,
                });
            }
            UiCommand::Calculate { a, b } => match client.calculate(a, b).await {
                Ok(result) => {
                    info!(a, b, gcd = result.result, steps = result.steps.len(), "calculation done");
                    let _ = event_tx.send(ClientEvent::CalculationReady {
                        result: Box::new(result),
                    });
                }
                Err(e) => fail(&mut client, &store, &event_tx, e, true),
            },
            UiCommand::LoadHistory => match client.history().await {
                Ok(items) => {
                    let _ = event_tx.send(ClientEvent::HistoryLoaded { items });
                }
                Err(e) => fail(&mut client, &store, &event_tx, e, true),
            },
            UiCommand::LoadHistoryItem { id } => match client.history_item(id).await {
                Ok(item) => {
                    let _ = event_tx.send(ClientEvent::HistoryItemLoaded {
                        item: Box::new(item),
                    });
                }
                Err(e) => fail(&mut client, &store, &event_tx, e, true),
            },
            UiCommand::DeleteHistory { id } => match client.delete_history(id).await {
                Ok(()) => {
                    let _ = event_tx.send(ClientEvent::HistoryDeleted { id });
                }
                Err(e) => fail(&mut client, &store, &event_tx, e, true),
            },
            UiCommand::Quit => break,
        }
    }

    Ok(())
}

fn complete_auth(
    client: &mut ApiClient,
    store: &SessionStore,
    event_tx: &UnboundedSender<ClientEvent>,
    email: &str,
    token: &str,
) {
    client.set_token(token);
    let session = Session {
        email: email.to_string(),
        access_token: token.to_string(),
    };
    if let Err(e) = store.store(&session) {
        warn!("failed to persist session: {e:#}");
    }
    info!(email, "authenticated");
    let _ = event_tx.send(ClientEvent::AuthOk {
        email: email.to_string(),
    });
}

/// Surface an error to the UI. A 401 on an authenticated call additionally
/// clears the cached session, which routes the UI back to the login screen.
fn fail(
    client: &mut ApiClient,
    store: &SessionStore,
    event_tx: &UnboundedSender<ClientEvent>,
    err: ApiError,
    authenticated_call: bool,
) {
    if authenticated_call && matches!(err, ApiError::Unauthorized) {
        if let Err(e) = store.clear() {
            warn!("failed to clear session file: {e:#}");
        }
        client.clear_token();
        let _ = event_tx.send(ClientEvent::SessionCleared {
            reason: SessionEnd::Expired,
        });
        return;
    }
    let _ = event_tx.send(ClientEvent::Failed {
        message: err.to_message(),
    });
}
