use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::profiles::model::Profile;

/// Longest text accepted by `POST /profiles`, in characters.
pub const MAX_TEXT_CHARS: usize = 20_000;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfilesRequest {
    /// Free text mentioning people.
    #[schema(example = "John Smith is a software engineer at Google")]
    pub text: String,
}

impl ProfilesRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.chars().count() > MAX_TEXT_CHARS {
            return Err(format!("text exceeds {} characters", MAX_TEXT_CHARS));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
