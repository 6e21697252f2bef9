//! JWalk-based project tree scanner.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{ClientState, DirEntry, Parallelism, WalkDir};
use tracing::{debug, warn};

use treewise_core::{Node, ProjectTree, ScanConfig, ScanError, ScanWarning, WarningKind, extension_of};

use crate::lines::count_lines;

/// Scanner that walks a project root and builds the filtered node tree.
///
/// Traversal is serial. Hidden and ignored entries are dropped while each
/// directory is read, so pruned subtrees are never opened.
#[derive(Debug, Default)]
pub struct TreeScanner;

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of the configured root.
    ///
    /// Only a missing or non-directory root is an error. Unreadable
    /// directories become childless nodes and unreadable files get a line
    /// count of 0; both are reported as warnings on the returned tree.
    pub fn scan(&self, config: &ScanConfig) -> Result<ProjectTree, ScanError> {
        let start = Instant::now();
        if config.root.as_os_str().is_empty() {
            return Err(ScanError::InvalidConfig {
                message: "Root path cannot be empty".to_string(),
            });
        }
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }

        let mut warnings = WarningLog::default();
        let mut entries = self.collect_entries(config, &root_path, &mut warnings);

        let root_name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root_path.display().to_string());
        let root = self.build_node(root_name.into(), &root_path, String::new(), 0, &mut entries);

        debug!(
            nodes = root.node_count(),
            warnings = warnings.len(),
            "scan finished"
        );

        Ok(ProjectTree::new(
            root,
            root_path,
            config.clone(),
            start.elapsed(),
            warnings.into_vec(),
        ))
    }

    /// Walk the root and group surviving entries by parent directory.
    fn collect_entries(
        &self,
        config: &ScanConfig,
        root_path: &Path,
        warnings: &mut WarningLog,
    ) -> HashMap<PathBuf, Vec<EntryInfo>> {
        let filter = config.clone();
        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir(move |depth, dir, _state, children| {
                // Called once for the root entry itself, which is never pruned.
                if depth.is_none() {
                    return;
                }
                children.retain(|child| match child {
                    Ok(entry) => {
                        let name = entry.file_name.to_string_lossy();
                        let skip = filter.should_skip(&name, points_to_dir(entry));
                        if skip {
                            debug!(dir = %dir.display(), entry = %name, "pruned");
                        }
                        !skip
                    }
                    Err(_) => true,
                });
            });

        let mut entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>> = HashMap::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    let warning = match err.io_error() {
                        Some(io) => ScanWarning::unreadable_dir(&path, io),
                        None => ScanWarning::new(&path, err.to_string(), WarningKind::ReadError),
                    };
                    warnings.push(warning);
                    continue;
                }
            };

            let path = entry.path();

            if let Some(err) = &entry.read_children_error {
                let warning = match err.io_error() {
                    Some(io) => ScanWarning::unreadable_dir(&path, io),
                    None => ScanWarning::new(&path, err.to_string(), WarningKind::ReadError),
                };
                warnings.push(warning);
            }

            if entry.depth == 0 {
                continue;
            }

            let name: CompactString = entry.file_name.to_string_lossy().as_ref().into();
            let file_type = entry.file_type;

            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_symlink() {
                match std::fs::metadata(&path) {
                    Ok(target) if target.is_dir() => EntryKind::Directory,
                    Ok(target) => EntryKind::File {
                        size: target.len(),
                        line_count: self.line_count(config, &name, &path, warnings),
                    },
                    Err(_) => {
                        warnings.push(ScanWarning::broken_symlink(&path));
                        EntryKind::File {
                            size: 0,
                            line_count: 0,
                        }
                    }
                }
            } else {
                let size = match std::fs::metadata(&path) {
                    Ok(metadata) => metadata.len(),
                    Err(err) => {
                        warnings.push(ScanWarning::new(
                            &path,
                            err.to_string(),
                            WarningKind::ReadError,
                        ));
                        0
                    }
                };
                EntryKind::File {
                    size,
                    line_count: self.line_count(config, &name, &path, warnings),
                }
            };

            entries_by_parent
                .entry(entry.parent_path().to_path_buf())
                .or_default()
                .push(EntryInfo { name, path, kind });
        }

        entries_by_parent
    }

    /// Count lines for tracked extensions; failures count as 0.
    fn line_count(
        &self,
        config: &ScanConfig,
        name: &str,
        path: &Path,
        warnings: &mut WarningLog,
    ) -> u64 {
        if !config.is_tracked(&extension_of(name)) {
            return 0;
        }
        match count_lines(path) {
            Ok(lines) => lines,
            Err(err) => {
                warnings.push(ScanWarning::decode_error(path, &err));
                0
            }
        }
    }

    /// Recursively build a directory node and its children.
    ///
    /// Symlinked directories are never walked, so they end up childless.
    fn build_node(
        &self,
        name: CompactString,
        path: &Path,
        relative_path: String,
        depth: u32,
        entries_by_parent: &mut HashMap<PathBuf, Vec<EntryInfo>>,
    ) -> Node {
        let mut node = Node::new_directory(name, relative_path, depth);

        for entry in entries_by_parent.remove(path).unwrap_or_default() {
            let child_path = node.child_path(&entry.name);
            let child = match entry.kind {
                EntryKind::Directory => self.build_node(
                    entry.name,
                    &entry.path,
                    child_path,
                    depth + 1,
                    entries_by_parent,
                ),
                EntryKind::File { size, line_count } => {
                    Node::new_file(entry.name, child_path, depth + 1, size, line_count)
                }
            };
            node.children.push(child);
        }

        node.sort_children();
        node
    }
}

/// Warnings collected during a scan, recorded once per path and kind.
#[derive(Default)]
struct WarningLog {
    warnings: Vec<ScanWarning>,
    seen: HashSet<(PathBuf, WarningKind)>,
}

impl WarningLog {
    fn push(&mut self, warning: ScanWarning) {
        if !self.seen.insert((warning.path.clone(), warning.kind)) {
            return;
        }
        warn!(path = %warning.path.display(), "{}", warning.message);
        self.warnings.push(warning);
    }

    fn len(&self) -> usize {
        self.warnings.len()
    }

    fn into_vec(self) -> Vec<ScanWarning> {
        self.warnings
    }
}

/// Whether an entry is a directory, or a symlink whose target is one.
fn points_to_dir<C: ClientState>(entry: &DirEntry<C>) -> bool {
    entry.file_type.is_dir()
        || (entry.file_type.is_symlink()
            && std::fs::metadata(entry.path()).is_ok_and(|target| target.is_dir()))
}

/// Temporary struct for collecting entry information.
struct EntryInfo {
    name: CompactString,
    path: PathBuf,
    kind: EntryKind,
}

enum EntryKind {
    Directory,
    File { size: u64, line_count: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::create_dir(root.join(".github")).unwrap();

        fs::write(root.join("README.md"), "# Title\n\nBody\n").unwrap();
        fs::write(root.join("src/index.ts"), "export {};\n").unwrap();
        fs::write(root.join("src/components/button.tsx"), "a\nb\nc\n").unwrap();
        fs::write(root.join("node_modules/react/index.js"), "x\n").unwrap();
        fs::write(root.join(".github/ci.yml"), "on: push\n").unwrap();
        fs::write(root.join(".env"), "KEY=1\n").unwrap();
        fs::write(root.join(".prettierrc"), "{}\n").unwrap();
        fs::write(root.join("logo.png"), [0u8, 10, 10, 10]).unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let tree = TreeScanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        let names: Vec<&str> = tree.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["src", ".env", "README.md", "logo.png"]);
        assert_eq!(tree.root.depth, 0);
        assert_eq!(tree.root.relative_path, "");
    }

    #[test]
    fn test_ignored_and_hidden_pruned() {
        let temp = create_test_tree();
        let tree = TreeScanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        assert!(!tree.contains("node_modules"));
        assert!(!tree.contains(".github"));
        assert!(!tree.contains(".prettierrc"));
        assert!(tree.contains(".env"));
    }

    #[test]
    fn test_file_metadata() {
        let temp = create_test_tree();
        let tree = TreeScanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        let button = tree.find("src/components/button.tsx").unwrap();
        assert_eq!(button.relative_path, "src/components/button.tsx");
        assert_eq!(button.depth, 3);
        assert_eq!(button.size(), 6);
        assert_eq!(button.line_count(), 3);
        assert_eq!(button.extension(), Some(".tsx"));

        // untracked extension: lines never counted
        let logo = tree.find("logo.png").unwrap();
        assert_eq!(logo.size(), 4);
        assert_eq!(logo.line_count(), 0);
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp = create_test_tree();
        let result = TreeScanner::new().scan(&ScanConfig::new(temp.path().join("README.md")));
        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));

        let result = TreeScanner::new().scan(&ScanConfig::new(temp.path().join("missing")));
        assert!(matches!(result, Err(ScanError::NotFound { .. })));

        let result = TreeScanner::new().scan(&ScanConfig::new(""));
        assert!(matches!(result, Err(ScanError::InvalidConfig { .. })));
    }

    #[test]
    fn test_warnings_recorded_once_per_path_and_kind() {
        let mut log = WarningLog::default();
        log.push(ScanWarning::broken_symlink("a/link"));
        log.push(ScanWarning::broken_symlink("a/link"));
        log.push(ScanWarning::new("a/link", "unreadable", WarningKind::ReadError));
        log.push(ScanWarning::broken_symlink("b/link"));

        let warnings = log.into_vec();
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[1].kind, WarningKind::ReadError);
    }
}
