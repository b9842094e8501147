//! Upstream adapter implementations

pub mod chat_completion;
pub mod completion;
pub(crate) mod http;
pub mod messages;
pub mod summary;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;

pub use chat_completion::ChatCompletionAdapter;
pub use completion::CompletionAdapter;
pub use messages::MessagesAdapter;
pub use summary::SummaryAdapter;

use crate::traits::UpstreamAdapter;
use crate::types::{AdapterConfig, AdapterKind};

/// Build the adapter matching `config.kind`
pub fn build_adapter(config: AdapterConfig) -> Arc<dyn UpstreamAdapter> {
    match config.kind {
        AdapterKind::Completion => Arc::new(CompletionAdapter::new(config)),
        AdapterKind::Summary => Arc::new(SummaryAdapter::new(config)),
        AdapterKind::ChatCompletion => Arc::new(ChatCompletionAdapter::new(config)),
        AdapterKind::Messages => Arc::new(MessagesAdapter::new(config)),
    }
}
