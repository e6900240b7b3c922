use anyhow::{Context, Result};
use clap::Parser;
use donut_cli::{init_tracing, resolve_config, CliArgs};
use donut_conformance::{Orchestrator, UnprotectedTxSpec};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = CliArgs::parse();
    if let Err(err) = init_tracing(cli.verbose, cli.log_format) {
        eprintln!("warning: logging disabled: {err}");
    }

    let config = resolve_config(&cli).context("invalid configuration")?;
    let replay_protection = config.replay_protection;
    let orchestrator = Orchestrator::new(config, cli.filter()).context("failed to prepare the run")?;

    if cli.list {
        for case in orchestrator.planned_cases() {
            println!("{}: {}", case.label(), case.expected);
        }
        if replay_protection.runs_replay_checks() {
            let expected = UnprotectedTxSpec::expected_outcome();
            for compat_mode in [false, true] {
                println!("{}: {expected}", UnprotectedTxSpec::label_for(compat_mode));
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(block) = cli.check_bls {
        let report = orchestrator
            .check_validator_bls(block)
            .await
            .context("validator BLS key check failed")?;
        info!(target: "donut", block = report.block, keys = report.keys.len(), "validator BLS keys fetched");
        for failure in report.assertions.failures() {
            error!(target: "donut", check = %failure.description, detail = ?failure.detail, "BLS check failed");
        }
        return Ok(exit_code(report.passed()));
    }

    let report = orchestrator
        .run()
        .await
        .context("conformance run aborted during setup")?;
    println!("{report}");

    if let Some(path) = &cli.report {
        let json = report.to_json().context("failed to serialize the report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(target: "donut", path = %path.display(), "report written");
    }

    Ok(exit_code(report.all_passed()))
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
