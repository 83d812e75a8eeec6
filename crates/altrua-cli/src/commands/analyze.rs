//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::{Config, Transport};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use altrua_extractor::{Extractor, SourceDocument, SummaryTransport};
use altrua_llm::AnthropicProvider;
use altrua_webhook::WebhookClient;
use std::time::Duration;
use tracing::info;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let transport_kind = args.transport.map(Into::into).unwrap_or(config.transport);
    let transport = build_transport(transport_kind, &args, config)?;

    let mut document = SourceDocument::from_path(&args.file)?;
    if let Some(org) = &args.org {
        document = document.with_organization(org.clone());
    }

    info!(
        file = %args.file.display(),
        transport = transport.name(),
        "analyzing document"
    );

    let summary = transport.summarize(&document).await?;

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}

/// Build the transport selected by flags and configuration.
pub fn build_transport(
    kind: Transport,
    args: &AnalyzeArgs,
    config: &Config,
) -> Result<Box<dyn SummaryTransport>> {
    match kind {
        Transport::Local => {
            let llm = &config.llm;
            let model = args.model.clone().unwrap_or_else(|| llm.model.clone());

            let provider = AnthropicProvider::from_env(&llm.api_key_env, model)?
                .with_endpoint(llm.endpoint.clone())
                .with_max_tokens(llm.max_tokens)
                .with_max_retries(llm.max_retries)
                .with_request_timeout(Duration::from_secs(llm.request_timeout_secs))?;

            let mut extractor_config = config.extractor.clone();
            if let Some(secs) = args.timeout {
                extractor_config.llm_timeout_secs = secs;
            }
            extractor_config.validate().map_err(CliError::Config)?;

            Ok(Box::new(Extractor::new(provider, extractor_config)))
        }
        Transport::Webhook => {
            let url = config.webhook.url.clone().ok_or_else(|| {
                CliError::Config("webhook.url is not set; run 'altrua config init' and edit it".into())
            })?;
            let timeout = args.timeout.unwrap_or(config.webhook.timeout_secs);

            let client = WebhookClient::new(url)?
                .with_timeout(Duration::from_secs(timeout))?
                .with_organization(config.extractor.organization.clone());

            Ok(Box::new(client))
        }
    }
}
