use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::NavError;

/// Unit of work performed inside an animated transition.
pub type UpdateFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NavError>> + Send + 'a>>;

/// Animated content-transition primitive.
///
/// Runs `update` between the before and after snapshots of the content
/// surface and resolves once the animation has settled. An error from
/// `update` is returned after the transition is abandoned.
#[async_trait]
pub trait ViewTransition: Send + Sync {
    async fn run<'a>(&self, update: UpdateFuture<'a>) -> Result<(), NavError>;
}

/// Cross-fade that settles a fixed duration after the update completes.
pub struct CrossfadeTransition {
    settle: Duration,
}

impl CrossfadeTransition {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

#[async_trait]
impl ViewTransition for CrossfadeTransition {
    async fn run<'a>(&self, update: UpdateFuture<'a>) -> Result<(), NavError> {
        update.await?;
        tokio::time::sleep(self.settle).await;
        Ok(())
    }
}
