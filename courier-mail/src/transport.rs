//! Email transport trait.

use async_trait::async_trait;

use crate::{Email, Result};

/// Email transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, email: &Email) -> Result<()> {
        (**self).send(email).await
    }
}
