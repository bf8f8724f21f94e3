//! Stand-in provider for when no generation backend can be built.

use agenda_application::{CompletionOptions, GenerationProvider, ProviderError};
use async_trait::async_trait;

/// Fails every request with the error that prevented building the real adapter.
///
/// Lets commands that never generate (confirm, show, finalize) run without
/// an API key.
pub struct UnavailableProvider {
    reason: ProviderError,
}

impl UnavailableProvider {
    pub fn new(reason: ProviderError) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl GenerationProvider for UnavailableProvider {
    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        Err(self.reason.clone())
    }
}
