use depfix_fs::is_absolute_path;

/// Tracks whether the scan has passed the first colon-terminated token.
/// Everything before it is a target and must never be rewritten; everything
/// after it is a prerequisite. A rule may wrap across lines, so this state
/// lives for a whole rewrite call, not per line.
#[derive(Default)]
struct TargetTracker {
    seen_target_token: bool,
}

impl TargetTracker {
    #[inline]
    fn in_prerequisites(&self) -> bool {
        self.seen_target_token
    }

    #[inline]
    fn observe(&mut self, token: &str) {
        if token.ends_with(':') {
            self.seen_target_token = true;
        }
    }
}

/// Replace absolute prerequisite paths in depfile `content` with the
/// relative form supplied by `make_relative`.
///
/// `make_relative` is consulted once per absolute prerequisite-side token;
/// `None` (or a replacement equal to the token) leaves the token as-is.
/// Returns `None` when no token was replaced, so callers can skip writing
/// the file back. In rewritten output, runs of whitespace between tokens
/// collapse to a single space; line boundaries and the presence of leading
/// indentation are preserved.
///
/// Tokens are split on literal space/tab here, without decoding escapes:
/// substitution replaces the whole path payload, and any escaping the
/// original author applied to untouched tokens must survive byte-for-byte.
///
/// The substring scan for `base_dir` is a fast path for the common case of
/// a depfile with no paths below it. It assumes `base_dir` never appears
/// split across an escape sequence, which holds for the directory strings
/// compilers emit.
#[must_use]
pub fn rewrite_source_paths<F>(content: &str, base_dir: &str, mut make_relative: F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    if base_dir.is_empty() {
        return None;
    }
    if memchr::memmem::find(content.as_bytes(), base_dir.as_bytes()).is_none() {
        return None;
    }

    let mut rewritten = String::with_capacity(content.len());
    let mut changed = false;
    let mut tracker = TargetTracker::default();

    for line in content.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        let indented = body.starts_with([' ', '\t']);
        let chunks = body.split([' ', '\t']).filter(|chunk| !chunk.is_empty());
        for (i, chunk) in chunks.enumerate() {
            if i > 0 || indented {
                rewritten.push(' ');
            }

            let mut replaced = false;
            if tracker.in_prerequisites() && is_absolute_path(chunk) {
                if let Some(new_path) = make_relative(chunk) {
                    if new_path != chunk {
                        rewritten.push_str(&new_path);
                        replaced = true;
                    }
                }
            }
            if replaced {
                changed = true;
            } else {
                rewritten.push_str(chunk);
            }

            tracker.observe(chunk);
        }

        rewritten.push_str(newline);
    }

    changed.then_some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strip a `/abs/` prefix, the shape of relativization in these tests.
    fn strip_abs(path: &str) -> Option<String> {
        path.strip_prefix("/abs/").map(str::to_owned)
    }

    #[test]
    fn prerequisite_side_absolute_paths_are_replaced() {
        let out = rewrite_source_paths("a b: c /abs/d\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("a b: c d\n"));
    }

    #[test]
    fn target_side_tokens_are_never_replaced() {
        let out = rewrite_source_paths("/abs/out.o: /abs/src.c\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("/abs/out.o: src.c\n"));
    }

    #[test]
    fn relative_prerequisites_are_left_alone() {
        assert_eq!(rewrite_source_paths("t: a b/c ../d /abs\n", "/abs", strip_abs), None);
    }

    #[test]
    fn target_state_persists_across_lines() {
        let out = rewrite_source_paths("t: \\\n/abs/a\n/abs/b\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("t: \\\na\nb\n"));
    }

    #[test]
    fn unchanged_content_is_signalled_not_copied() {
        // `/abs` occurs, but only target-side; nothing to rewrite.
        assert_eq!(rewrite_source_paths("/abs/t: x\n", "/abs", strip_abs), None);
    }

    #[test]
    fn fast_path_skips_the_collaborator_entirely() {
        let mut calls = 0;
        let out = rewrite_source_paths("t: /other/d\n", "/abs", |path| {
            calls += 1;
            strip_abs(path)
        });
        assert_eq!(out, None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn empty_base_dir_never_rewrites() {
        assert_eq!(rewrite_source_paths("t: /abs/d\n", "", strip_abs), None);
    }

    #[test]
    fn collaborator_returning_the_same_path_is_not_a_change() {
        let out = rewrite_source_paths("t: /abs/d\n", "/abs", |path| Some(path.to_owned()));
        assert_eq!(out, None);
    }

    #[test]
    fn whitespace_runs_collapse_in_rewritten_output() {
        let out = rewrite_source_paths("t:  /abs/a \t /abs/b\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("t: a b\n"));
    }

    #[test]
    fn indented_continuation_lines_keep_a_leading_space() {
        let out = rewrite_source_paths("t: a \\\n    /abs/b\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("t: a \\\n b\n"));
    }

    #[test]
    fn missing_trailing_newline_is_preserved() {
        let out = rewrite_source_paths("t: /abs/d", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("t: d"));
    }

    #[test]
    fn blank_lines_are_kept() {
        let out = rewrite_source_paths("t: /abs/a\n\nu: /abs/b\n", "/abs", strip_abs);
        assert_eq!(out.as_deref(), Some("t: a\n\nu: b\n"));
    }

    #[test]
    fn rewrite_is_idempotent() {
        let content = "t: /abs/a b\n";
        let first = rewrite_source_paths(content, "/abs", strip_abs).unwrap();
        assert_eq!(rewrite_source_paths(&first, "/abs", strip_abs), None);
    }
}
