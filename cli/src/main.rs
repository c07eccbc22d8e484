use clap::Parser;
use std::io::Write;
use tempo_cli::{CliContext, logging, readline, respond};
use tempo_core::AppConfig;

#[derive(Parser)]
#[command(version, about = "Run named stopwatches side by side")]
struct Args {
    /// Milliseconds between live updates (overrides the config file)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Don't draw the live elapsed-time line
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut config = AppConfig::load().with_poll_interval_override(args.poll_interval_ms);
    if args.quiet {
        config.display.live_updates = false;
    }

    let ctx = CliContext::new(config);
    ctx.spawn_renderer().await;

    loop {
        let Some(line) = readline()? else {
            // End of input behaves like `exit`
            respond("exit", &ctx).await?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}
