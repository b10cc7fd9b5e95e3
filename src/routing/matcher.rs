//! Route pattern matching logic.
//!
//! # Responsibilities
//! - Parse `/segment/:param` patterns
//! - Match request paths segment by segment
//! - Bind positional parameters by name
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A parameter matches exactly one non-empty segment
//! - Empty segments are significant: `/health/` and `//health` do not
//!   match `/health`, the same as the Axum router
//! - No regex to guarantee O(n) matching

/// Parameters bound while matching a path, in pattern order.
pub type PathParams = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A compiled path pattern such as `/status/:code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: &'static str,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. Segments starting with `:` are parameters.
    pub fn new(source: &'static str) -> Self {
        let segments = source
            .strip_prefix('/')
            .unwrap_or(source)
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(seg),
            })
            .collect();

        Self { source, segments }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &'static str {
        self.source
    }

    /// Whether the pattern has no parameters.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|seg| matches!(seg, Segment::Literal(_)))
    }

    /// The pattern in Axum's `{param}` syntax.
    pub fn axum_path(&self) -> String {
        self.segments
            .iter()
            .map(|seg| match seg {
                Segment::Literal(lit) => format!("/{lit}"),
                Segment::Param(name) => format!("/{{{name}}}"),
            })
            .collect()
    }

    /// Match `path`, returning the bound parameters on success.
    ///
    /// Parameter values are the raw segments, still percent-encoded.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::new();
        let mut parts = split(path)?;

        for seg in &self.segments {
            let part = parts.next()?;
            match seg {
                Segment::Literal(lit) if *lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => params.push((*name, part.to_string())),
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// Segments of an absolute path. The root `/` is a single empty segment.
fn split(path: &str) -> Option<std::str::Split<'_, char>> {
    path.strip_prefix('/').map(|rest| rest.split('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let root = PathPattern::new("/");
        assert!(root.is_static());
        assert_eq!(root.axum_path(), "/");
        assert_eq!(root.matches("/"), Some(vec![]));
        assert_eq!(root.matches("/health"), None);
        assert_eq!(root.matches("//"), None);
        assert_eq!(root.matches(""), None);
    }

    #[test]
    fn test_static_pattern() {
        let health = PathPattern::new("/health");
        assert_eq!(health.matches("/health"), Some(vec![]));
        assert_eq!(health.matches("/Health"), None); // Case sensitive
        assert_eq!(health.matches("/health/extra"), None);
    }

    #[test]
    fn test_empty_segments_do_not_match() {
        let health = PathPattern::new("/health");
        assert_eq!(health.matches("/health/"), None);
        assert_eq!(health.matches("//health"), None);
        assert_eq!(health.matches("/health//"), None);

        let status = PathPattern::new("/status/:code");
        assert_eq!(status.matches("/status/"), None);
        assert_eq!(status.matches("/status//200"), None);
    }

    #[test]
    fn test_param_pattern() {
        let status = PathPattern::new("/status/:code");
        assert!(!status.is_static());
        assert_eq!(status.axum_path(), "/status/{code}");
        assert_eq!(
            status.matches("/status/418"),
            Some(vec![("code", "418".to_string())])
        );
        assert_eq!(
            status.matches("/status/abc"),
            Some(vec![("code", "abc".to_string())])
        );
        assert_eq!(status.matches("/status"), None);
        assert_eq!(status.matches("/status/1/2"), None);
        assert_eq!(
            status.matches("/status/%FF"),
            Some(vec![("code", "%FF".to_string())])
        );
    }
}
