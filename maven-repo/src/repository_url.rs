/// Base URL of a remote Maven repository, e.g. `https://repo1.maven.org/maven2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl(String);

pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2";

impl AsRef<str> for RepositoryUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for RepositoryUrl {
    fn default() -> Self {
        Self::new(MAVEN_CENTRAL_URL)
    }
}

impl RepositoryUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}
