//! Wire types for the hosted captioning model.

use serde::{Deserialize, Serialize};

/// Request body: the provider fetches the image by URL.
#[derive(Debug, Serialize)]
pub(crate) struct CaptionRequestDto<'a> {
    pub inputs: &'a str,
}

/// One element of the provider's response sequence.
#[derive(Debug, Deserialize)]
pub(crate) struct CaptionResultDto {
    #[serde(default)]
    pub generated_text: Option<String>,
}
