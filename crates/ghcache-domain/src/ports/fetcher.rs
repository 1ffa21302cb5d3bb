//! Fetcher Port
//!
//! A `Fetcher` turns a [`Request`] into a fully-read [`Response`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{Request, Response};

/// One stage of the fetch pipeline
///
/// Implementations must be `Send + Sync`: the coalescer runs the delegate call
/// on its own task so that it outlives a cancelled caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform the request
    async fn fetch(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, request: Request) -> Result<Response> {
        (**self).fetch(request).await
    }
}
