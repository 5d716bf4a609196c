use crate::artifacts::objects::tree::DEFAULT_MAX_TREE_ENTRIES;
use std::path::{Path, PathBuf};

/// Name of the repository metadata directory
pub const DEFAULT_GIT_DIR: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository metadata directory, relative to the repository root unless absolute
    pub git_dir: PathBuf,
    /// Ceiling on the number of entries decoded from a single tree object
    pub max_tree_entries: usize,
}

impl Config {
    pub fn with_git_dir(mut self, git_dir: impl Into<PathBuf>) -> Self {
        self.git_dir = git_dir.into();
        self
    }

    pub fn with_max_tree_entries(mut self, max_tree_entries: usize) -> Self {
        self.max_tree_entries = max_tree_entries;
        self
    }

    pub fn objects_path(&self, root: &Path) -> PathBuf {
        root.join(&self.git_dir).join("objects")
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.git_dir).join("index")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_dir: PathBuf::from(DEFAULT_GIT_DIR),
            max_tree_entries: DEFAULT_MAX_TREE_ENTRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_paths_from_git_dir() {
        let config = Config::default();
        let root = Path::new("/repo");

        assert_eq!(config.objects_path(root), PathBuf::from("/repo/.git/objects"));
        assert_eq!(config.index_path(root), PathBuf::from("/repo/.git/index"));
    }

    #[test]
    fn absolute_git_dir_ignores_root() {
        let config = Config::default()
            .with_git_dir("/elsewhere/meta")
            .with_max_tree_entries(10);

        assert_eq!(
            config.objects_path(Path::new("/repo")),
            PathBuf::from("/elsewhere/meta/objects")
        );
        assert_eq!(config.max_tree_entries, 10);
    }
}
