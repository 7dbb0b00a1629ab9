use super::open_context;
use crate::cli::args::ShowArgs;
use crate::exit_codes;
use anyhow::Result;
use scoresheet_core::config::DeploymentConfig;
use scoresheet_core::model::JudgeEvaluation;
use scoresheet_core::scoring;

pub async fn run(args: ShowArgs, config: &DeploymentConfig) -> Result<i32> {
    let (client, _identity) = open_context(config)?;

    let record = match client.load_current(&args.submission).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            eprintln!("Submission not found: {}", args.submission);
            return Ok(exit_codes::OPERATION_FAILED);
        }
        Err(e) => {
            eprintln!("Could not load evaluation data: {e}");
            return Ok(exit_codes::OPERATION_FAILED);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(exit_codes::SUCCESS);
    }

    let mut shown = 0usize;
    for (judge, eval) in &record.evaluations {
        if let Some(only) = &args.judge {
            if judge != only {
                continue;
            }
        }
        print_evaluation(judge, eval);
        shown += 1;
    }

    if shown == 0 {
        eprintln!(
            "{}",
            no_results_message(args.judge.as_deref(), &args.submission)
        );
        return Ok(exit_codes::OPERATION_FAILED);
    }
    Ok(exit_codes::SUCCESS)
}

fn no_results_message(judge: Option<&str>, submission: &str) -> String {
    match judge {
        Some(judge) => format!("No evaluation by judge '{judge}' for {submission}"),
        None => format!("No evaluations recorded for {submission}"),
    }
}

fn print_evaluation(judge: &str, eval: &JudgeEvaluation) {
    println!("judge: {judge}");
    if let Some(team_leader) = &eval.team_leader_name {
        println!("  team leader: {team_leader}");
    }
    println!("  submitted:   {}", eval.submitted_at.to_rfc3339());
    for (id, weighted) in scoring::weighted_scores(&eval.scores) {
        let raw = eval.scores.get(&id).copied().unwrap_or(0.0);
        println!("  criterion {id}: score {raw:.1} -> weighted {weighted:.2}");
    }
    // Recomputed, not the persisted figure.
    println!("  total:       {:.2}", scoring::total_score(&eval.scores));
    if !eval.comments.is_empty() {
        println!("  comments:    {}", eval.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::no_results_message;

    #[test]
    fn empty_result_message_depends_on_judge_filter() {
        assert_eq!(
            no_results_message(Some("judge-zz"), "Team-X"),
            "No evaluation by judge 'judge-zz' for Team-X"
        );
        assert_eq!(
            no_results_message(None, "Team-X"),
            "No evaluations recorded for Team-X"
        );
    }
}
