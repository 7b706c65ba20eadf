use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use crate::error::DiscoveryError;

const PATH_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Exclusion filter applied to absolute candidate paths.
///
/// `node_modules` is always excluded. User globs support `*`, `**` and
/// `{a,b}` groups and match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<Pattern>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Result<Self, DiscoveryError> {
        let mut patterns = Vec::new();
        for glob in globs {
            let glob = glob.as_ref();
            for expanded in expand_braces(glob) {
                let pattern = Pattern::new(&expanded)
                    .map_err(|e| DiscoveryError::pattern(glob, e))?;
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if is_node_modules_path(path) {
            return true;
        }
        let text = path.to_string_lossy().replace('\\', "/");
        self.patterns
            .iter()
            .any(|p| p.matches_with(&text, PATH_MATCH))
    }
}

fn is_node_modules_path(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(s) => s.to_string_lossy().eq_ignore_ascii_case("node_modules"),
        _ => false,
    })
}

/// Expands `{a,b}` groups (nested groups included) into plain globs.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        let at = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(at);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(at),
            _ => {}
        }
    }

    // Unbalanced braces are left to the glob parser as literals.
    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|w| {
            let alt = &pattern[w[0] + 1..w[1]];
            expand_braces(&format!("{prefix}{alt}{suffix}"))
        })
        .collect()
}
