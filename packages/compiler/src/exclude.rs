//! Base-name exclusion rules applied while walking the source directory.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{CompileError, Result};

/// Decides which entries the compiler leaves out.
///
/// Rules match an entry's base name only. An excluded directory is not
/// descended.
pub trait Exclusion {
    /// Check that every rule is usable. Called once before the walk.
    fn validate(&self) -> Result<()>;

    /// True when an entry with this base name is left out.
    fn matches(&self, base_name: &str) -> bool;
}

/// Excludes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExcludes;

impl Exclusion for NoExcludes {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn matches(&self, _base_name: &str) -> bool {
        false
    }
}

/// Shell-glob exclusion rules such as `*.tmp`, `.git` or `node_modules`.
///
/// Patterns are compiled on construction; a bad pattern is reported by
/// [`Exclusion::validate`] and matches nothing.
#[derive(Debug, Clone)]
pub struct GlobExcludes {
    patterns: Vec<String>,
    compiled: std::result::Result<GlobSet, (String, String)>,
}

impl GlobExcludes {
    pub fn new(patterns: Vec<String>) -> Self {
        let compiled = Self::compile(&patterns);
        Self { patterns, compiled }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn compile(patterns: &[String]) -> std::result::Result<GlobSet, (String, String)> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| (pattern.clone(), e.kind().to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| (patterns.join(", "), e.to_string()))
    }
}

impl Default for GlobExcludes {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Exclusion for GlobExcludes {
    fn validate(&self) -> Result<()> {
        match &self.compiled {
            Ok(_) => Ok(()),
            Err((pattern, reason)) => Err(CompileError::InvalidExclude {
                pattern: pattern.clone(),
                reason: reason.clone(),
            }),
        }
    }

    fn matches(&self, base_name: &str) -> bool {
        match &self.compiled {
            Ok(set) => set.is_match(base_name),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_base_names() {
        let excludes = GlobExcludes::new(vec![
            "*.tmp".to_string(),
            ".git".to_string(),
            "node_modules".to_string(),
        ]);
        excludes.validate().unwrap();
        assert!(excludes.matches("notes.tmp"));
        assert!(excludes.matches(".git"));
        assert!(excludes.matches("node_modules"));
        assert!(!excludes.matches("index.html"));
        assert!(!excludes.matches("tmp"));
    }

    #[test]
    fn invalid_pattern_fails_validation() {
        let excludes = GlobExcludes::new(vec!["*.css".to_string(), "[a-".to_string()]);
        match excludes.validate() {
            Err(CompileError::InvalidExclude { pattern, .. }) => assert_eq!(pattern, "[a-"),
            other => panic!("expected InvalidExclude, got {:?}", other),
        }
        assert!(!excludes.matches("site.css"));
    }

    #[test]
    fn no_excludes() {
        NoExcludes.validate().unwrap();
        assert!(!NoExcludes.matches("anything"));
        assert!(!GlobExcludes::default().matches("anything"));
    }
}
