//! Regex-driven replacement of fenced `mermaid` blocks.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fragment;
use crate::scratch::Scratch;

/// Matches one fenced mermaid block: the opening fence line, the body up to
/// the next closing fence, non-greedy. The body is captured byte-for-byte.
/// A fence that never reaches a closing marker does not match and passes
/// through untouched.
static MERMAID_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid\n(.*?)\n```").unwrap());

/// Errors from the substituter's interactive path.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("failed to create scratch directory: {0}")]
    ScratchCreate(#[from] std::io::Error),

    #[error("scratch directory already released")]
    ScratchReleased,
}

/// Output mode for substituted blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Embed raw diagram source for client-side rendering by Mermaid.js.
    Interactive,
    /// Quote diagram source as a code block, no live rendering.
    StaticFallback,
}

/// Replaces fenced `mermaid` blocks with HTML fragments.
///
/// Substitution is a single left-to-right pass; each match consumes its own
/// closing fence, so matches cannot overlap. Text without mermaid fences is
/// returned unchanged, and substituted output contains no fences to re-match.
///
/// The substituter owns a scratch directory for intermediate artifacts,
/// created at construction and released by [`cleanup`](Self::cleanup).
pub struct MermaidSubstituter {
    scratch: Scratch,
}

impl MermaidSubstituter {
    /// Create a new substituter, acquiring its scratch directory.
    pub fn new() -> Result<Self, DiagramError> {
        Ok(Self {
            scratch: Scratch::acquire()?,
        })
    }

    /// Replace every mermaid block in `text` with a fragment for `mode`.
    ///
    /// The static fallback path cannot fail. The interactive path fails only
    /// when the scratch directory is gone, which callers recover by retrying
    /// in [`RenderMode::StaticFallback`].
    pub fn substitute(&self, text: &str, mode: RenderMode) -> Result<String, DiagramError> {
        match mode {
            RenderMode::Interactive => {
                if self.scratch.path().is_none() {
                    return Err(DiagramError::ScratchReleased);
                }
                Ok(replace_blocks(text, fragment::interactive))
            }
            RenderMode::StaticFallback => Ok(Self::substitute_static(text)),
        }
    }

    /// Replace every mermaid block with the static fallback fragment.
    ///
    /// Needs no substituter instance and cannot fail.
    #[must_use]
    pub fn substitute_static(text: &str) -> String {
        replace_blocks(text, fragment::static_fallback)
    }

    /// Path to the scratch directory, or `None` after cleanup.
    #[must_use]
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.path()
    }

    /// Release the scratch directory. Idempotent; failures are logged only.
    pub fn cleanup(&mut self) {
        self.scratch.release();
    }
}

/// Run the fence regex over `text`, building a fragment per match.
fn replace_blocks(text: &str, build: fn(&str) -> String) -> String {
    MERMAID_FENCE_RE
        .replace_all(text, |caps: &Captures| build(&caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Title\n\n```mermaid\ngraph TD; A-->B;\n```\n\nMore text.\n";

    fn substituter() -> MermaidSubstituter {
        MermaidSubstituter::new().unwrap()
    }

    #[test]
    fn test_no_blocks_is_a_noop() {
        let text = "# Hello\n\nJust prose, no diagrams.\n";
        let sub = substituter();
        assert_eq!(
            sub.substitute(text, RenderMode::Interactive).unwrap(),
            text
        );
        assert_eq!(MermaidSubstituter::substitute_static(text), text);
    }

    #[test]
    fn test_interactive_replaces_block() {
        let sub = substituter();
        let html = sub.substitute(DOC, RenderMode::Interactive).unwrap();
        assert!(!html.contains("```mermaid"));
        assert!(html.contains("<div class=\"mermaid\">\ngraph TD; A-->B;\n</div>"));
        assert!(html.starts_with("# Title\n\n"));
        assert!(html.ends_with("More text.\n"));
    }

    #[test]
    fn test_static_fallback_has_no_live_container() {
        let html = MermaidSubstituter::substitute_static(DOC);
        assert!(!html.contains("<div class=\"mermaid\">"));
        assert!(html.contains("language-mermaid"));
        assert!(html.contains("mermaid-alternatives"));
    }

    #[test]
    fn test_block_count_and_order_preserved() {
        let text = "```mermaid\nfirst\n```\n\ntext\n\n```mermaid\nsecond\n```\n";
        let html = MermaidSubstituter::substitute_static(text);
        assert_eq!(html.matches("mermaid-alternatives").count(), 2);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_other_fences_untouched() {
        let text = "```rust\nfn main() {}\n```\n";
        assert_eq!(MermaidSubstituter::substitute_static(text), text);
    }

    #[test]
    fn test_unterminated_block_passes_through() {
        // An unterminated fence becomes part of the following content,
        // matching the behavior of the regex it replaces.
        let text = "# Doc\n\n```mermaid\ngraph TD; A-->B;\n";
        assert_eq!(MermaidSubstituter::substitute_static(text), text);
    }

    #[test]
    fn test_substitution_is_idempotent() {
        let sub = substituter();
        let once = sub.substitute(DOC, RenderMode::Interactive).unwrap();
        let twice = sub.substitute(&once, RenderMode::Interactive).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_body() {
        let text = "```mermaid\n\n```\n";
        let html = MermaidSubstituter::substitute_static(text);
        assert!(!html.contains("```"));
        assert!(html.contains("mermaid-diagram"));
    }

    #[test]
    fn test_body_preserved_with_indentation_and_blank_lines() {
        let body = "sequenceDiagram\n    participant A\n\n    A->>B: hi";
        let text = format!("```mermaid\n{body}\n```\n");
        let sub = substituter();
        let html = sub.substitute(&text, RenderMode::Interactive).unwrap();
        assert!(html.contains(body));
    }

    #[test]
    fn test_scratch_directory_lifecycle() {
        let mut sub = substituter();
        let path = sub.scratch_dir().unwrap().to_path_buf();
        assert!(path.is_dir());
        sub.cleanup();
        assert!(!path.exists());
        sub.cleanup(); // idempotent
        assert!(sub.scratch_dir().is_none());
    }

    #[test]
    fn test_interactive_fails_after_cleanup() {
        let mut sub = substituter();
        sub.cleanup();
        let err = sub.substitute(DOC, RenderMode::Interactive).unwrap_err();
        assert!(matches!(err, DiagramError::ScratchReleased));
        // Static fallback still works.
        assert!(
            sub.substitute(DOC, RenderMode::StaticFallback)
                .unwrap()
                .contains("mermaid-diagram")
        );
    }
}
