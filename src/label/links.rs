//! Link generation for node labels

/// Path of the graph image endpoint
pub const GRAPH_PATH: &str = "/api/v1/graph.svg";

/// Prefix of the per-resource schema endpoint
pub const SCHEMA_PATH_PREFIX: &str = "/api/v1/";

/// Builds the URLs embedded in rendered labels
pub trait LinkBuilder: Send + Sync {
    /// Link that re-renders the graph focused on `name`
    fn self_link(&self, name: &str) -> String;

    /// Link that downloads the latest schema of a resource
    fn download_link(&self, name: &str) -> String;

    /// URL of a bundled static file such as an icon
    fn static_resource(&self, path: &str) -> String;
}

/// Link builder rooted at the server's public URL
#[derive(Debug, Clone)]
pub struct UrlLinkBuilder {
    base_url: String,
}

impl UrlLinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl LinkBuilder for UrlLinkBuilder {
    fn self_link(&self, name: &str) -> String {
        format!(
            "{}{}?include-pattern={}",
            self.base_url,
            GRAPH_PATH,
            urlencoding::encode(name)
        )
    }

    fn download_link(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            SCHEMA_PATH_PREFIX,
            urlencoding::encode(name)
        )
    }

    fn static_resource(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_link() {
        let links = UrlLinkBuilder::new("https://acl.example.com/");
        assert_eq!(
            links.self_link("svc-orders"),
            "https://acl.example.com/api/v1/graph.svg?include-pattern=svc-orders"
        );
    }

    #[test]
    fn test_self_link_encodes_name() {
        let links = UrlLinkBuilder::new("http://localhost:8080");
        assert_eq!(
            links.self_link("svc *"),
            "http://localhost:8080/api/v1/graph.svg?include-pattern=svc%20%2A"
        );
    }

    #[test]
    fn test_download_link() {
        let links = UrlLinkBuilder::new("http://localhost:8080");
        assert_eq!(
            links.download_link("orders_v1"),
            "http://localhost:8080/api/v1/orders_v1"
        );
    }

    #[test]
    fn test_static_resource() {
        let links = UrlLinkBuilder::new("http://localhost:8080");
        assert_eq!(
            links.static_resource("/static/warning.svg"),
            "http://localhost:8080/static/warning.svg"
        );
        assert_eq!(links.base_url(), "http://localhost:8080");
    }
}
