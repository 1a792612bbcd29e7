//! Gitignore-style exclusion rules.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use treeshape_core::{ScanWarning, WarningKind};

/// Compiled ignore rules anchored at a scan root.
///
/// Patterns follow gitignore semantics: directory-only rules (`build/`),
/// anchored rules (`/dist`), `*` and `**` globs, and `!` negation, with the
/// last matching rule deciding.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    rules: Gitignore,
}

impl IgnoreMatcher {
    /// A matcher that excludes nothing.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Gitignore::empty(),
        }
    }

    /// Start building a matcher for `root`.
    pub fn builder(root: impl Into<PathBuf>) -> IgnoreMatcherBuilder {
        IgnoreMatcherBuilder::new(root)
    }

    /// Load `root/<file_name>` followed by `extra` patterns.
    ///
    /// A missing rules file is not an error. An unreadable one is reported
    /// and treated as empty, so the scan still proceeds.
    pub fn load(root: &Path, file_name: &str, extra: &[String]) -> (Self, Vec<ScanWarning>) {
        let mut builder = Self::builder(root);
        let rules_path = root.join(file_name);

        match fs::read(&rules_path) {
            Ok(bytes) => {
                debug!(path = %rules_path.display(), "loading ignore rules");
                builder.add_source(&rules_path, &String::from_utf8_lossy(&bytes));
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %rules_path.display(), "no ignore rules file");
            }
            Err(err) => {
                warn!(path = %rules_path.display(), "cannot read ignore rules: {err}");
                builder.warnings.push(ScanWarning::io(&rules_path, &err));
            }
        }

        for pattern in extra {
            builder.add_pattern(pattern);
        }

        builder.build()
    }

    /// Number of compiled rules (negations included).
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether no rules are active.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check whether `path` is excluded.
    ///
    /// `path` may be absolute (under the root) or already relative to it.
    /// The root itself is never excluded.
    pub fn excluded(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.as_os_str().is_empty() || self.rules.is_empty() {
            return false;
        }
        self.rules.matched(relative, is_dir).is_ignore()
    }
}

/// Incremental builder that tolerates bad lines.
pub struct IgnoreMatcherBuilder {
    root: PathBuf,
    inner: GitignoreBuilder,
    warnings: Vec<ScanWarning>,
}

impl IgnoreMatcherBuilder {
    /// Create a builder with no rules.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            inner: GitignoreBuilder::new(&root),
            root,
            warnings: Vec::new(),
        }
    }

    /// Add every line of a rules file. Lines that fail to compile are
    /// skipped with a warning; blank lines and `#` comments are ignored.
    pub fn add_source(&mut self, origin: &Path, source: &str) -> &mut Self {
        for (index, line) in source.lines().enumerate() {
            if let Err(err) = self.inner.add_line(Some(origin.to_path_buf()), line) {
                let warning = ScanWarning::invalid_pattern(origin, index + 1, line, &err);
                warn!("{}", warning.message);
                self.warnings.push(warning);
            }
        }
        self
    }

    /// Add a single pattern, e.g. from the command line.
    pub fn add_pattern(&mut self, pattern: &str) -> &mut Self {
        if let Err(err) = self.inner.add_line(None, pattern) {
            let warning = ScanWarning::invalid_pattern(&self.root, 1, pattern, &err);
            warn!("{}", warning.message);
            self.warnings.push(warning);
        }
        self
    }

    /// Compile the collected rules.
    pub fn build(self) -> (IgnoreMatcher, Vec<ScanWarning>) {
        let mut warnings = self.warnings;
        let rules = match self.inner.build() {
            Ok(rules) => rules,
            Err(err) => {
                warn!("ignore rules failed to compile, excluding nothing: {err}");
                warnings.push(ScanWarning::new(
                    &self.root,
                    format!("Ignore rules failed to compile: {err}"),
                    WarningKind::InvalidPattern,
                ));
                Gitignore::empty()
            }
        };
        (
            IgnoreMatcher {
                root: self.root,
                rules,
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(source: &str) -> IgnoreMatcher {
        let mut builder = IgnoreMatcher::builder("/project");
        builder.add_source(Path::new("/project/.gitignore"), source);
        let (matcher, warnings) = builder.build();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        matcher
    }

    #[test]
    fn test_empty_matcher_excludes_nothing() {
        let matcher = IgnoreMatcher::empty("/project");
        assert!(matcher.is_empty());
        assert!(!matcher.excluded(Path::new("/project/target"), true));
        assert!(!matcher.excluded(Path::new("anything.log"), false));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let matcher = matcher("# build output\n\n*.log\n");
        assert_eq!(matcher.len(), 1);
        assert!(matcher.excluded(Path::new("debug.log"), false));
    }

    #[test]
    fn test_directory_only_pattern() {
        let matcher = matcher("build/\n");
        assert!(matcher.excluded(Path::new("build"), true));
        assert!(matcher.excluded(Path::new("/project/nested/build"), true));
        assert!(!matcher.excluded(Path::new("build"), false));
    }

    #[test]
    fn test_anchored_pattern() {
        let matcher = matcher("/dist\n");
        assert!(matcher.excluded(Path::new("/project/dist"), true));
        assert!(!matcher.excluded(Path::new("/project/pkg/dist"), true));
    }

    #[test]
    fn test_double_star_glob() {
        let matcher = matcher("docs/**/*.tmp\n");
        assert!(matcher.excluded(Path::new("docs/a/b/c.tmp"), false));
        assert!(matcher.excluded(Path::new("docs/c.tmp"), false));
        assert!(!matcher.excluded(Path::new("src/c.tmp"), false));
    }

    #[test]
    fn test_last_match_wins() {
        let matcher = matcher("*.log\n!keep.log\n");
        assert!(matcher.excluded(Path::new("debug.log"), false));
        assert!(!matcher.excluded(Path::new("keep.log"), false));

        let matcher = self::matcher("!keep.log\n*.log\n");
        assert!(matcher.excluded(Path::new("keep.log"), false));
    }

    #[test]
    fn test_root_is_never_excluded() {
        let matcher = matcher("*\n");
        assert!(!matcher.excluded(Path::new("/project"), true));
        assert!(matcher.excluded(Path::new("/project/a"), false));
    }

    #[test]
    fn test_bad_line_does_not_disable_others() {
        let mut builder = IgnoreMatcher::builder("/project");
        builder.add_source(Path::new("/project/.gitignore"), "*.log\na{b\nnode_modules/\n");
        let (matcher, warnings) = builder.build();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::InvalidPattern);
        assert!(warnings[0].message.contains("line 2"));
        assert!(matcher.excluded(Path::new("a.log"), false));
        assert!(matcher.excluded(Path::new("node_modules"), true));
    }

    #[test]
    fn test_each_bad_line_reported_with_its_number() {
        let mut builder = IgnoreMatcher::builder("/project");
        builder.add_source(Path::new("/project/.gitignore"), "[z-a]\n*.tmp\ntrailing\\\n");
        let (matcher, warnings) = builder.build();

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("line 1"));
        assert!(warnings[1].message.contains("line 3"));
        assert!(matcher.excluded(Path::new("x.tmp"), false));
    }

    #[test]
    fn test_unclosed_bracket_compiles() {
        let matcher = matcher("[unclosed\n*.log\n");
        assert_eq!(matcher.len(), 2);
        assert!(matcher.excluded(Path::new("a.log"), false));
    }

    #[test]
    fn test_extra_patterns_apply_after_file() {
        let mut builder = IgnoreMatcher::builder("/project");
        builder.add_source(Path::new("/project/.gitignore"), "!vendor/\n");
        builder.add_pattern("vendor/");
        let (matcher, _) = builder.build();
        assert!(matcher.excluded(Path::new("vendor"), true));
    }
}
