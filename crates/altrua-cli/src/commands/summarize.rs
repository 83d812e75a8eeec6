//! Summarize command implementation.

use crate::cli::SummarizeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use altrua_extractor::summarize_response;
use std::fs;

/// Execute the summarize command.
///
/// Replays a saved LLM response through the parser, enricher and aggregator.
pub async fn execute_summarize(
    args: SummarizeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let response = fs::read_to_string(&args.response_file)?;
    let organization = args
        .org
        .as_deref()
        .unwrap_or(&config.extractor.organization);

    let (summary, _) = summarize_response(organization, &response)?;

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}
