use super::open_context;
use crate::cli::args::EvaluateArgs;
use crate::exit_codes;
use anyhow::{Context, Result};
use scoresheet_core::model::CriterionId;
use scoresheet_core::{EvaluationForm, FormPhase, SaveError};

pub async fn run(args: EvaluateArgs, config: &scoresheet_core::config::DeploymentConfig) -> Result<i32> {
    let scores = parse_score_flags(&args.scores)?;

    let (client, identity) = open_context(config)?;
    let mut form = EvaluationForm::new(client, identity);

    form.select_submission(&args.submission).await;
    if form.phase() == FormPhase::LoadError {
        eprintln!("{}", form.status().message);
        return Ok(exit_codes::OPERATION_FAILED);
    }
    // First emission: current remote state, or "not found".
    if let Some(snapshot) = form.next_remote_change().await {
        form.apply_snapshot(snapshot);
    }
    if form.phase() == FormPhase::LoadError {
        eprintln!("{}", form.status().message);
        return Ok(exit_codes::OPERATION_FAILED);
    }
    eprintln!("{}", form.status().message);

    for (id, value) in scores {
        form.set_score(id, value);
    }
    if let Some(comments) = args.comments {
        form.set_comments(comments);
    }
    if let Some(team_leader) = args.team_leader {
        form.set_team_leader_name(team_leader);
    }

    match form.save().await {
        Ok(()) => {
            println!(
                "{} total: {:.2}",
                form.submission_id(),
                form.total_score()
            );
            eprintln!("{}", form.status().message);
            Ok(exit_codes::SUCCESS)
        }
        Err(SaveError::EmptySubmissionId) | Err(SaveError::IdentityNotReady) => {
            eprintln!("{}", form.status().message);
            Ok(exit_codes::CONFIG_ERROR)
        }
        Err(SaveError::Store(_)) => {
            eprintln!("{}", form.status().message);
            Ok(exit_codes::OPERATION_FAILED)
        }
    }
}

/// Parse repeated `--score ID=VALUE` flags. Values outside 0-10 are
/// clamped later at the form boundary, like any other input.
fn parse_score_flags(flags: &[String]) -> Result<Vec<(CriterionId, f64)>> {
    flags
        .iter()
        .map(|flag| {
            let (id, value) = flag
                .split_once('=')
                .with_context(|| format!("invalid --score '{flag}': expected ID=VALUE"))?;
            let id: CriterionId = id
                .trim()
                .parse()
                .with_context(|| format!("invalid criterion id in --score '{flag}'"))?;
            let value: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid score value in --score '{flag}'"))?;
            Ok((id, value))
        })
        .collect()
}
