use url::Url;

/// The location signals a context key is derived from: hostname plus the raw
/// `/`-splits of the URL path and fragment.
///
/// The splits keep leading empty segments and the fragment keeps its `#`
/// prefix (an absent fragment still splits into one empty segment). Segment
/// counts feed directly into persisted context keys, so these exact shapes
/// are load-bearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub hostname: String,
    pub path_segments: Vec<String>,
    pub hash_segments: Vec<String>,
}

impl PageState {
    /// Build from pre-split location parts. `hash` is the raw fragment
    /// including its `#`, or the empty string when there is none.
    pub fn new(hostname: &str, pathname: &str, hash: &str) -> Self {
        Self {
            hostname: hostname.to_lowercase(),
            path_segments: pathname.split('/').map(str::to_string).collect(),
            hash_segments: hash.split('/').map(str::to_string).collect(),
        }
    }

    pub fn from_url(url: &Url) -> Self {
        let hash = match url.fragment() {
            Some(f) => format!("#{f}"),
            None => String::new(),
        };
        Self::new(url.host_str().unwrap_or_default(), url.path(), &hash)
    }
}
