use super::open_context;
use crate::cli::args::WatchArgs;
use crate::exit_codes;
use anyhow::Result;
use scoresheet_core::config::DeploymentConfig;
use scoresheet_core::scoring;

pub async fn run(args: WatchArgs, config: &DeploymentConfig) -> Result<i32> {
    let (client, _identity) = open_context(config)?;

    let mut sub = match client.subscribe(&args.submission).await {
        Ok(sub) => sub,
        Err(e) => {
            eprintln!("Could not subscribe to {}: {e}", args.submission);
            return Ok(exit_codes::OPERATION_FAILED);
        }
    };

    eprintln!("Watching {}. Press Ctrl+C to stop.\n", args.submission);

    loop {
        let snapshot = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Stopping watch loop.");
                break;
            }
            snapshot = sub.next() => snapshot,
        };
        let Some(snapshot) = snapshot else {
            eprintln!("Subscription closed by store.");
            break;
        };
        match snapshot.update {
            Err(e) => eprintln!("stream error: {e}"),
            Ok(None) => println!("[{}] document absent", snapshot.submission_id),
            Ok(Some(record)) => {
                println!(
                    "[{}] {} judge(s)",
                    snapshot.submission_id,
                    record.evaluations.len()
                );
                for (judge, eval) in &record.evaluations {
                    println!("  {judge}: total {:.2}", scoring::total_score(&eval.scores));
                }
            }
        }
    }
    sub.cancel();
    Ok(exit_codes::SUCCESS)
}
