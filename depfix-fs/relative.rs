use crate::is_absolute_path;

/// Express `path` relative to `cwd`, provided it lies below `base_dir`.
///
/// This is the default path-relativization collaborator for depfile
/// rewriting. It is purely lexical: `.` and `..` components are folded
/// without consulting the filesystem, so symlinks are not resolved. Paths
/// outside `base_dir` (or that escape the root through `..`) yield `None`,
/// meaning the token should be left as-is.
#[must_use]
pub fn make_relative(path: &str, base_dir: &str, cwd: &str) -> Option<String> {
    if !is_absolute_path(path) || !is_absolute_path(cwd) {
        return None;
    }

    let path = normal_components(path)?;
    let base = normal_components(base_dir)?;
    if path.len() < base.len() || path[..base.len()] != base[..] {
        return None;
    }

    let cwd = normal_components(cwd)?;
    let common = path.iter().zip(&cwd).take_while(|(a, b)| a == b).count();

    let mut relative: Vec<&str> = Vec::with_capacity(cwd.len() - common + path.len() - common);
    relative.resize(cwd.len() - common, "..");
    relative.extend(&path[common..]);
    if relative.is_empty() {
        return Some(String::from("."));
    }
    Some(relative.join("/"))
}

/// Normalized `/`-separated components of an absolute path. `None` if `..`
/// would escape the root.
fn normal_components(path: &str) -> Option<Vec<&str>> {
    let mut components = Vec::new();
    for c in path.split('/') {
        match c {
            "" | "." => {}
            ".." => {
                components.pop()?;
            }
            c => components.push(c),
        }
    }
    Some(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_below_cwd() {
        assert_eq!(
            make_relative("/work/src/foo.c", "/work", "/work").as_deref(),
            Some("src/foo.c")
        );
    }

    #[test]
    fn path_beside_cwd() {
        assert_eq!(
            make_relative("/work/src/foo.c", "/work", "/work/obj").as_deref(),
            Some("../src/foo.c")
        );
    }

    #[test]
    fn path_equal_to_cwd() {
        assert_eq!(make_relative("/work", "/work", "/work").as_deref(), Some("."));
    }

    #[test]
    fn path_outside_base_dir() {
        assert_eq!(make_relative("/usr/include/stdio.h", "/work", "/work"), None);
    }

    #[test]
    fn base_dir_prefix_must_end_on_a_component_boundary() {
        assert_eq!(make_relative("/workbench/foo.c", "/work", "/work"), None);
    }

    #[test]
    fn dot_and_dot_dot_are_folded() {
        assert_eq!(
            make_relative("/work/src/../include/./foo.h", "/work", "/work").as_deref(),
            Some("include/foo.h")
        );
    }

    #[test]
    fn trailing_separator_on_base_dir_is_ignored() {
        assert_eq!(
            make_relative("/work/src/foo.c", "/work/", "/work").as_deref(),
            Some("src/foo.c")
        );
    }

    #[test]
    fn escaping_the_root_is_refused() {
        assert_eq!(make_relative("/../etc/passwd", "/", "/work"), None);
    }

    #[test]
    fn relative_inputs_are_refused() {
        assert_eq!(make_relative("src/foo.c", "/work", "/work"), None);
        assert_eq!(make_relative("/work/src/foo.c", "/work", "obj"), None);
    }
}
