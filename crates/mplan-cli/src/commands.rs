use anyhow::{Context, Result};
use serde::Serialize;

use mplan_cli::pipeline::{
    ValidateRequest, ValidationRun, create_campaigns, list_rules, resolve_options, run_validation,
};

use crate::cli::{CreateCampaignArgs, ReportFormatArg, RulesArgs, ValidateArgs};
use crate::summary::{print_resolutions, print_rules, print_summary};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationRun> {
    let request = ValidateRequest {
        rows: &args.rows,
        master_data: &args.master_data,
        config: args.config.as_deref(),
        auto_create: args.auto_create,
        source: args.source.as_deref(),
        apply: args.apply,
    };
    let run = run_validation(&request)?;
    match args.format {
        ReportFormatArg::Table => print_summary(&run),
        ReportFormatArg::Json => print_json(&run)?,
    }
    Ok(run)
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let options = resolve_options(args.config.as_deref(), args.auto_create)?;
    let rules = list_rules(options);
    match args.format {
        ReportFormatArg::Table => print_rules(&rules),
        ReportFormatArg::Json => print_json(&rules)?,
    }
    Ok(())
}

pub fn run_create_campaign(args: &CreateCampaignArgs) -> Result<()> {
    let (resolutions, summary) =
        create_campaigns(&args.names, &args.master_data, args.source.as_deref())?;
    print_resolutions(&resolutions);
    println!("Created: {}", summary.total_created);
    Ok(())
}
