use super::ResourceCache;
use crate::error::ResourceError;

/// A loaded stylesheet ready to be attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub url: String,
    pub text: String,
}

/// Load the GUI stylesheet through the shared cache.
pub async fn load_stylesheet(cache: &ResourceCache, url: &str) -> Result<Stylesheet, ResourceError> {
    let resource = cache.load(url).await?;
    let text = resource.text().map_err(|err| ResourceError::Fetch {
        url: url.to_string(),
        reason: format!("stylesheet is not valid UTF-8: {err}"),
    })?;
    tracing::debug!(url, bytes = text.len(), "stylesheet loaded");
    Ok(Stylesheet {
        url: url.to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::MockFetcher;
    use std::sync::Arc;

    #[tokio::test]
    async fn loads_text_through_cache() {
        let fetcher = Arc::new(MockFetcher::new().with_body("style.css", b"body { margin: 0 }", None));
        let cache = ResourceCache::new(fetcher.clone());
        let sheet = load_stylesheet(&cache, "style.css").await.unwrap();
        assert_eq!(sheet.text, "body { margin: 0 }");
        load_stylesheet(&cache, "style.css").await.unwrap();
        assert_eq!(fetcher.calls("style.css"), 1);
    }

    #[tokio::test]
    async fn rejects_binary_payloads() {
        let fetcher = Arc::new(MockFetcher::new().with_body("style.css", &[0xff, 0xfe, 0x00], None));
        let cache = ResourceCache::new(fetcher);
        let err = load_stylesheet(&cache, "style.css").await.unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"), "got: {err}");
    }
}
