mod api;
mod cli;
mod logging;
mod model;
mod orchestrator;
mod playback;
mod session;
mod storage;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_tui = args.wants_tui() && cfg!(feature = "tui");
    logging::init(is_tui)?;

    match cli::run(args).await {
        Ok(()) => {
            // Explicit exit code 0 for scripting modes.
            if !is_tui {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
