//! Endpoint URL helpers.

/// Ensures a base URL ends with `/`. An empty URL becomes `/`.
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// URL of a model's collection endpoint: `base_url + model_name`.
pub fn endpoint_url(base_url: &str, model_name: &str) -> String {
    format!("{}{}", normalize_base_url(base_url), model_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://api"), "http://api/");
        assert_eq!(normalize_base_url("http://api/"), "http://api/");
        assert_eq!(normalize_base_url(""), "/");
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("http://api", "todos"), "http://api/todos");
        assert_eq!(endpoint_url("http://api/v1/", "todos"), "http://api/v1/todos");
        assert_eq!(endpoint_url("", "todos"), "/todos");
    }
}
