//! Step through a recorded workflow history from the terminal.
//!
//! Replays a history file in standalone mode against the simulated
//! replayer, pausing at the given breakpoints; press Enter to continue
//! from each pause.
//!
//! ```text
//! cargo run -p step-through -- --history sample-history.json --breakpoints 2,9
//! ```

use clap::Parser;
use std::path::PathBuf;
use wfdbg_sdk::testing::SimulatedReplayer;
use wfdbg_sdk::{ReplayMode, ReplaySession};

#[derive(Parser, Debug)]
#[command(name = "step-through", about = "Replay a workflow history, pausing at breakpoints")]
struct Args {
    /// Path to the history JSON document
    #[arg(long)]
    history: PathBuf,

    /// Event ids to break at, comma separated
    #[arg(long, value_delimiter = ',')]
    breakpoints: Vec<i64>,

    /// Workflow kind to replay
    #[arg(long, default_value = "demo-workflow")]
    workflow: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let session = ReplaySession::builder()
        .mode(ReplayMode::Standalone)
        .history_file(&args.history)
        .breakpoints(args.breakpoints.iter().copied())
        .build()?;
    let controller = session.controller();

    let workflow = args.workflow.clone();
    let replay =
        tokio::task::spawn_blocking(move || session.replay(&SimulatedReplayer::new(), &workflow));

    let stepper = {
        let controller = controller.clone();
        tokio::spawn(async move {
            while let Some(index) = controller.wait_for_pause().await {
                println!("paused at event {index}; press Enter to continue");
                let _ = tokio::task::spawn_blocking(|| {
                    let mut line = String::new();
                    std::io::stdin().read_line(&mut line)
                })
                .await;
                controller.resume();
            }
        })
    };

    let result = replay.await??;
    stepper.abort();
    println!("workflow result: {result}");
    Ok(())
}
