use std::fs;
use std::path::Path;

use crate::SnapshotError;

/// Version-control metadata directory left out of the rendering.
pub const EXCLUDED_DIR_NAME: &str = ".git";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Renders the directory structure under `root`, depth-first and pre-order.
///
/// Entries keep the order returned by the directory listing, which is
/// platform dependent. Directories carry a trailing `/`. Symlinked
/// directories are marked but not descended.
pub fn render_tree(root: &Path) -> Result<String, SnapshotError> {
    let mut output = String::new();
    render_level(root, "", &mut output)?;
    Ok(output)
}

fn render_level(current: &Path, indent: &str, output: &mut String) -> Result<(), SnapshotError> {
    let read_error = |source| SnapshotError::ReadDir {
        path: current.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(current).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if entry.file_name() == EXCLUDED_DIR_NAME {
            continue;
        }
        entries.push(entry);
    }

    let total = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        let path = entry.path();
        let name = entry.file_name();
        let is_last = index + 1 == total;
        let (connector, child_indent) = if is_last {
            (LAST_BRANCH, SPACE_INDENT)
        } else {
            (BRANCH, PIPE_INDENT)
        };
        let is_dir = path.is_dir();

        output.push_str(indent);
        output.push_str(connector);
        output.push_str(&name.to_string_lossy());
        if is_dir {
            output.push('/');
        }
        output.push('\n');

        let is_symlink = entry
            .file_type()
            .map(|file_type| file_type.is_symlink())
            .unwrap_or(false);
        if is_dir && !is_symlink {
            render_level(&path, &format!("{indent}{child_indent}"), output)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use super::render_tree;

    #[test]
    fn unit_empty_directory_renders_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert_eq!(render_tree(temp.path()).expect("render"), "");
    }

    #[test]
    fn unit_single_chain_uses_last_connectors_and_space_indent() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("src/bin")).expect("mkdir");
        fs::write(temp.path().join("src/bin/main.rs"), "fn main() {}").expect("write");

        let rendered = render_tree(temp.path()).expect("render");

        assert_eq!(
            rendered,
            "└── src/\n    └── bin/\n        └── main.rs\n"
        );
    }

    #[test]
    fn functional_siblings_use_branch_then_last_connector() {
        let temp = tempfile::tempdir().expect("tempdir");
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp.path().join(name), name).expect("write");
        }

        let rendered = render_tree(temp.path()).expect("render");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("├── "));
        assert!(lines[1].starts_with("├── "));
        assert!(lines[2].starts_with("└── "));
        let names: BTreeSet<&str> = lines.iter().map(|line| &line[line.len() - 5..]).collect();
        assert_eq!(names, BTreeSet::from(["a.txt", "b.txt", "c.txt"]));
    }

    #[test]
    fn functional_non_last_directory_children_use_pipe_indent() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("docs")).expect("mkdir docs");
        fs::write(temp.path().join("docs/guide.md"), "guide").expect("write guide");
        fs::create_dir(temp.path().join("lib")).expect("mkdir lib");
        fs::write(temp.path().join("lib/mod.rs"), "").expect("write mod");

        let rendered = render_tree(temp.path()).expect("render");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("├── ") && lines[0].ends_with('/'));
        assert!(lines[1].starts_with("│   └── "));
        assert!(lines[2].starts_with("└── ") && lines[2].ends_with('/'));
        assert!(lines[3].starts_with("    └── "));
        assert!(!lines[1].ends_with('/'));
        assert!(!lines[3].ends_with('/'));
    }

    #[test]
    fn regression_git_metadata_directory_is_excluded() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join(".git/objects")).expect("mkdir .git");
        fs::write(temp.path().join("README.md"), "readme").expect("write readme");

        let rendered = render_tree(temp.path()).expect("render");

        assert_eq!(rendered, "└── README.md\n");
    }

    #[test]
    fn regression_missing_root_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let error = render_tree(&temp.path().join("absent")).expect_err("missing root");
        assert!(error.to_string().contains("absent"));
    }
}
