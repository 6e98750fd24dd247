//! Prompt templates for the three generation stages.
//!
//! Every template wraps its instructions in the upstream model's
//! turn-delimited dialogue framing (`\n\nHuman:` ... `\n\nAssistant:`).
//! The framing is part of the completion API's contract and has to be
//! reproduced exactly, including the assistant prefill on the summary
//! template.

use crate::completion::GenerationRequest;

const MAX_TOKENS: u32 = 4000;

// Brand extraction should be deterministic; summary and title get
// progressively more creative.
const BRAND_TEMPERATURE: f64 = 0.0;
const SUMMARY_TEMPERATURE: f64 = 0.4;
const TITLE_TEMPERATURE: f64 = 0.7;

const ROLE_PREAMBLE: &str =
    "You are a highly skilled language model designed to write effective marketing content.";

/// Prompt that extracts the brand name from the raw product description.
pub fn brand_prompt(document_text: &str) -> GenerationRequest {
    let prompt = format!(
        "\n\nHuman: {ROLE_PREAMBLE}\n\
         You are responsible for generating marketing content for a new drug. \
         I will give you a description of the product surrounded by <description></description> tags. \
         Based on this input, extract the brand name.\n\n\
         <description>{document_text}</description>\n\
         \n\nAssistant:"
    );

    GenerationRequest {
        prompt,
        temperature: BRAND_TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Prompt for the four-sentence marketing summary.
///
/// Branches on the literal flag value "Yes" between the FDA-guideline tone
/// and the persuasive benefits-and-warnings tone. The comparison is exact
/// by contract with the external caller; any other value, casing included,
/// takes the persuasive branch.
pub fn summary_prompt(
    document_text: &str,
    brand_name: &str,
    language: &str,
    fda_flag: &str,
) -> GenerationRequest {
    let prompt = if fda_flag == "Yes" {
        format!(
            "\n\nHuman: {ROLE_PREAMBLE}\n\
             You are responsible for generating marketing content for a new drug named \"{brand_name}\".\n\
             I will give you a description of the product surrounded by <description></description> tags. \
             Based on this input, write a four sentence paragraph in {language} following FDA's prescription drug advertising about the product.\n\n\
             <description>{document_text}</description>\n\n\
             Remove the <description></description> tags\n\
             \n\nAssistant: Sure thing! Here is the description:"
        )
    } else {
        format!(
            "\n\nHuman: {ROLE_PREAMBLE}\n\
             You are responsible for generating marketing content for a new drug named \"{brand_name}\".\n\
             I will give you a description of the product surrounded by <description></description> tags. \
             Based on this input, write a four sentence paragraph in {language} describing the product benefits and why people should use it.\n\
             The description should be upbeat and make people feel like this product will make their life better. \
             Be sure to include a description of any potential side effects or other warnings.\n\
             End the description by instructing the reader to ask their doctor about the product.\n\n\
             <description>{document_text}</description>\n\n\
             Remove the <description></description> tags\n\
             \n\nAssistant: Sure thing! Here is the description:"
        )
    };

    GenerationRequest {
        prompt,
        temperature: SUMMARY_TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Prompt for the one-sentence headline. The brand name is embedded
/// verbatim as produced by the brand stage.
pub fn title_prompt(summary: &str, brand_name: &str, language: &str) -> GenerationRequest {
    let prompt = format!(
        "\n\nHuman: {ROLE_PREAMBLE}\n\
         You are responsible for generating marketing content for a new drug named {brand_name}.\n\
         This drug has the following approved uses: \"{summary}\". \
         Create a one-sentence headline in {language} about {brand_name} that includes the name \"{brand_name}\" and conveys good health and excitement.\n\
         Only return the headline in your response. Remove any text that are not part of the headline.\n\
         \n\nAssistant:"
    );

    GenerationRequest {
        prompt,
        temperature: TITLE_TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
