mod openai;

pub use openai::{OpenAiClient, DEFAULT_MODEL};

use crate::error::Result;

/// The remote text-generation collaborator. The pipeline only ever needs one
/// system/user exchange at a time; everything else (model, auth, transport)
/// belongs to the implementation.
pub trait TextGenerator {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
