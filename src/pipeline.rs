use tracing::info;

use crate::completion::CompletionModel;
use crate::error::Result;
use crate::prompts;

/// Final generated copy. Only constructed once all three stages have
/// succeeded; a failure at any stage propagates instead, so a partial
/// result cannot exist.
#[derive(Debug, Clone)]
pub struct AdCopy {
    pub title: String,
    pub summary: String,
}

/// Runs the three generation stages in order: brand extraction, summary,
/// headline. The order is a data dependency, not a convenience — the brand
/// name feeds the summary and title prompts, and the summary feeds the
/// title prompt.
pub async fn generate_ad_copy(
    model: &dyn CompletionModel,
    document_text: &str,
    language: &str,
    fda_flag: &str,
) -> Result<AdCopy> {
    let brand_name = model.complete(&prompts::brand_prompt(document_text)).await?;
    info!("brand name extracted");

    let summary = model
        .complete(&prompts::summary_prompt(
            document_text,
            &brand_name,
            language,
            fda_flag,
        ))
        .await?;
    info!("ad summary generated");

    let title = model
        .complete(&prompts::title_prompt(&summary, &brand_name, language))
        .await?;
    info!("ad title generated");

    Ok(AdCopy { title, summary })
}
