use reqwest::{Request, Response, header::{AUTHORIZATION, HeaderValue}};
use reqwest_middleware::{Middleware, Next, Result};
use http::Extensions;

/// Adds the hosted database's `apikey` and bearer headers to every request.
pub struct ApiKeyMiddleware {
    api_key: HeaderValue,
    bearer: HeaderValue,
}

impl ApiKeyMiddleware {
    pub fn new(api_key: &str) -> std::result::Result<Self, http::header::InvalidHeaderValue> {
        let mut api_key_value = HeaderValue::from_str(api_key)?;
        api_key_value.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
        bearer.set_sensitive(true);
        Ok(ApiKeyMiddleware {
            api_key: api_key_value,
            bearer,
        })
    }
}

#[async_trait::async_trait]
impl Middleware for ApiKeyMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        req.headers_mut().insert("apikey", self.api_key.clone());
        req.headers_mut().insert(AUTHORIZATION, self.bearer.clone());
        next.run(req, extensions).await
    }
}
