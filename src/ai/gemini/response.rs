//! Normalization of Gemini `generateContent` responses.
//!
//! Transport failures are classified by the HTTP client before a body ever
//! reaches this module; here we handle provider error objects, missing
//! candidates and the part scan.

use super::types::{Candidate, GenerateContentResponse, ResponsePart};
use crate::models::GeneratedImage;
use crate::{Error, Result};

/// Fold the first candidate's parts into a [`GeneratedImage`].
///
/// The last inline image wins, the last plain text part becomes the
/// description, and thought parts accumulate newline-joined.
pub fn normalize_generated(response: GenerateContentResponse) -> Result<GeneratedImage> {
    let candidate = first_candidate(response)?.ok_or(Error::EmptyResponse)?;

    let mut image: Option<(String, String)> = None;
    let mut description: Option<String> = None;
    let mut thoughts: Option<String> = None;

    for part in candidate.parts() {
        match part {
            ResponsePart::InlineBinary { mime_type, data } => {
                image = Some((mime_type, data));
            }
            ResponsePart::Text {
                content,
                is_thought: true,
            } => match thoughts.as_mut() {
                Some(acc) => {
                    acc.push('\n');
                    acc.push_str(&content);
                }
                None => thoughts = Some(content),
            },
            ResponsePart::Text {
                content,
                is_thought: false,
            } => description = Some(content),
        }
    }

    let (mime_type, base64_data) = image.ok_or(Error::NoImageData)?;

    let search_queries = candidate
        .web_search_queries()
        .filter(|queries| !queries.is_empty())
        .map(<[String]>::to_vec);

    tracing::debug!(
        "Gemini returned image with mime_type: {} (description: {}, thoughts: {}, search queries: {})",
        mime_type,
        description.is_some(),
        thoughts.is_some(),
        search_queries.as_ref().map_or(0, Vec::len)
    );

    Ok(GeneratedImage {
        mime_type,
        base64_data,
        description,
        thoughts,
        search_queries,
    })
}

/// Concatenate every text part of the first candidate, in order, unseparated.
pub fn normalize_description(response: GenerateContentResponse) -> Result<String> {
    let candidate = first_candidate(response)?.ok_or(Error::NoResponse)?;

    let description: String = candidate
        .parts()
        .filter_map(|part| match part {
            ResponsePart::Text { content, .. } => Some(content),
            ResponsePart::InlineBinary { .. } => None,
        })
        .collect();

    if description.is_empty() {
        return Err(Error::NoDescription);
    }

    Ok(description)
}

/// Surface a provider error object, then take the first candidate if any.
fn first_candidate(response: GenerateContentResponse) -> Result<Option<Candidate>> {
    if let Some(error) = response.error {
        tracing::error!(
            "Gemini reported an error (code {:?}, status {:?}): {}",
            error.code,
            error.status,
            error.message
        );
        return Err(Error::Provider(error.message));
    }

    Ok(response
        .candidates
        .and_then(|candidates| candidates.into_iter().next()))
}
