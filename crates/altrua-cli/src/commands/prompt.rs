//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use altrua_domain::TextExtractor;
use altrua_extractor::{PlainTextExtractor, PromptBuilder, SourceDocument};

/// Execute the prompt command.
pub async fn execute_prompt(args: PromptArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = SourceDocument::from_path(&args.file)?;
    let text = PlainTextExtractor.extract_text(&document.file_name, &document.bytes)?;
    let organization = args
        .org
        .as_deref()
        .unwrap_or(&config.extractor.organization);

    let builder = PromptBuilder::new(&text, organization)
        .with_max_chars(config.extractor.max_prompt_chars);

    if builder.is_truncated() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Document truncated to its first {} characters",
                config.extractor.max_prompt_chars
            ))
        );
    }

    println!("{}", formatter.format_prompt(&builder.build())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use altrua_extractor::ExtractorError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_prompt_for_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Water withdrawal rose 3%.").unwrap();

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = PromptArgs {
            file: file.path().to_path_buf(),
            org: None,
        };

        execute_prompt(args, &Config::default(), &formatter)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_prompt_for_blank_file() {
        let file = NamedTempFile::new().unwrap();

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = PromptArgs {
            file: file.path().to_path_buf(),
            org: None,
        };

        let result = execute_prompt(args, &Config::default(), &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::Extraction(_)))
        ));
    }
}
