use std::time::Instant;

use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use http::Extensions;

/// Logs method, URL, status, and latency of each outgoing request.
pub struct LogMiddleware;

#[async_trait::async_trait]
impl Middleware for LogMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().to_string();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed = started.elapsed().as_millis();
        match &result {
            Ok(response) => {
                log::debug!("{} {} -> {} ({} ms)", method, url, response.status(), elapsed)
            }
            Err(err) => log::debug!("{} {} -> error after {} ms: {}", method, url, elapsed, err),
        }
        result
    }
}
