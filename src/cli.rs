use crate::api::{ApiClient, ApiError};
use crate::model::{Credentials, PlaybackSpeed};
use crate::session::{Session, SessionStore};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "euclid-cli",
    version,
    about = "Euclid GCD visualization client with optional TUI"
)]
pub struct Cli {
    /// First number. Omit both numbers to launch the TUI.
    pub a: Option<u64>,

    /// Second number.
    pub b: Option<u64>,

    /// Base URL for the Euclid GCD service
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Print the raw calculation JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a step-per-line trace and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// List calculation history and exit
    #[arg(long)]
    pub history: bool,

    /// Show one history item by id and exit
    #[arg(long)]
    pub show: Option<i64>,

    /// Delete one history item by id and exit
    #[arg(long)]
    pub delete: Option<i64>,

    /// Account email; with --password, authenticates before running
    #[arg(long)]
    pub email: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,

    /// Register a new account instead of logging in
    #[arg(long)]
    pub register: bool,

    /// Clear the cached session and exit
    #[arg(long)]
    pub logout: bool,

    /// Request timeout
    #[arg(long, default_value = "10s")]
    pub timeout: humantime::Duration,

    /// Export the calculation result as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Initial playback speed for the TUI visualizer (0.5, 1 or 2)
    #[arg(long, default_value = "1", value_parser = parse_speed)]
    pub speed: PlaybackSpeed,
}

fn parse_speed(s: &str) -> Result<PlaybackSpeed, String> {
    match s {
        "0.5" => Ok(PlaybackSpeed::Half),
        "1" => Ok(PlaybackSpeed::Normal),
        "2" => Ok(PlaybackSpeed::Double),
        other => Err(format!("invalid speed '{other}' (expected 0.5, 1 or 2)")),
    }
}

impl Cli {
    /// True when no one-shot operation was requested and the TUI should run.
    pub fn wants_tui(&self) -> bool {
        self.a.is_none()
            && self.b.is_none()
            && !self.json
            && !self.text
            && !self.history
            && self.show.is_none()
            && self.delete.is_none()
            && !self.logout
            && self.email.is_none()
            && self.password.is_none()
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.logout {
        SessionStore::open_default()
            .clear()
            .context("clear cached session")?;
        println!("Session cleared.");
        return Ok(());
    }

    if args.wants_tui() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            bail!("built without TUI support; pass two numbers with --text or --json");
        }
    }

    let store = SessionStore::open_default();
    let mut client = ApiClient::new(&args.base_url, Duration::from(args.timeout))?;
    authenticate(&mut client, &store, &args).await?;

    if args.history {
        return run_history_list(&args, &client, &store).await;
    }
    if let Some(id) = args.show {
        return run_history_show(&args, &client, &store, id).await;
    }
    if let Some(id) = args.delete {
        return run_history_delete(&client, &store, id).await;
    }

    match (args.a, args.b) {
        (Some(a), Some(b)) => run_calculate(&args, &client, &store, a, b).await,
        (None, None) => {
            if args.json || args.text {
                bail!("two numbers are required with --json/--text");
            }
            // --email/--password alone: the session was stored above.
            println!("Logged in.");
            Ok(())
        }
        _ => bail!("both numbers are required (e.g. `euclid-cli 48 18 --text`)"),
    }
}

/// Resolve authentication for scripting modes: explicit credentials win,
/// otherwise the cached session is used.
async fn authenticate(client: &mut ApiClient, store: &SessionStore, args: &Cli) -> Result<()> {
    match (args.email.as_deref(), args.password.as_deref()) {
        (Some(email), Some(password)) => {
            let creds = Credentials {
                email: email.to_string(),
                password: password.to_string(),
            };
            let auth = if args.register {
                client.register(&creds).await
            } else {
                client.login(&creds).await
            }
            .map_err(|e| anyhow::anyhow!(e.to_message()))?;
            client.set_token(&auth.access_token);
            store.store(&Session {
                email: email.to_string(),
                access_token: auth.access_token,
            })?;
            Ok(())
        }
        (None, None) => {
            if let Some(session) = store.load() {
                client.set_token(&session.access_token);
                Ok(())
            } else {
                bail!("not authenticated; pass --email and --password, or log in via the TUI")
            }
        }
        _ => bail!("--email and --password must be given together"),
    }
}

/// Map a service error for terminal output; a 401 clears the stale session
/// the same way the TUI does.
fn surface(store: &SessionStore, err: ApiError) -> anyhow::Error {
    if matches!(err, ApiError::Unauthorized) {
        let _ = store.clear();
    }
    anyhow::anyhow!(err.to_message())
}

async fn run_calculate(
    args: &Cli,
    client: &ApiClient,
    store: &SessionStore,
    a: u64,
    b: u64,
) -> Result<()> {
    if a == 0 || b == 0 {
        bail!("both numbers must be positive integers");
    }
    let result = client.calculate(a, b).await.map_err(|e| surface(store, e))?;

    if let Some(path) = args.export_json.as_deref() {
        crate::storage::export_json(path, &result)?;
        eprintln!("Exported JSON: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in crate::text_summary::build_trace_lines(&result) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_history_list(args: &Cli, client: &ApiClient, store: &SessionStore) -> Result<()> {
    let items = client.history().await.map_err(|e| surface(store, e))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in crate::text_summary::build_history_lines(&items) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_history_show(
    args: &Cli,
    client: &ApiClient,
    store: &SessionStore,
    id: i64,
) -> Result<()> {
    let item = client.history_item(id).await.map_err(|e| surface(store, e))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("#{}  created {}", item.id, item.created_at);
        for line in crate::text_summary::build_trace_lines(&item.to_result()) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_history_delete(client: &ApiClient, store: &SessionStore, id: i64) -> Result<()> {
    client
        .delete_history(id)
        .await
        .map_err(|e| surface(store, e))?;
    println!("Deleted history item {id}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_launches_the_tui() {
        let args = Cli::parse_from(["euclid-cli"]);
        assert!(args.wants_tui());
    }

    #[test]
    fn partial_credentials_stay_in_scripting_mode() {
        // A lone --password must reach the credentials error, not the TUI.
        let args = Cli::parse_from(["euclid-cli", "--password", "secret"]);
        assert!(!args.wants_tui());
        let args = Cli::parse_from(["euclid-cli", "--email", "user@example.com"]);
        assert!(!args.wants_tui());
    }

    #[test]
    fn output_flags_need_operands_not_the_tui() {
        let args = Cli::parse_from(["euclid-cli", "--json"]);
        assert!(!args.wants_tui());
    }
}
