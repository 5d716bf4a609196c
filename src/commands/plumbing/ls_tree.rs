use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    pub fn ls_tree(&mut self, object_sha: &str, recursive: bool) -> anyhow::Result<()> {
        let tree = self.database().read_tree(object_sha)?;

        self.print_tree(tree, None, recursive)
    }

    fn print_tree(&self, tree: Tree, prefix: Option<&str>, recursive: bool) -> anyhow::Result<()> {
        for entry in tree.into_entries() {
            let path = match prefix {
                Some(prefix) => format!("{prefix}/{}", entry.path),
                None => entry.path.clone(),
            };

            if recursive && entry.is_tree() {
                let subtree = self.database().read_tree(entry.oid.as_ref())?;
                self.print_tree(subtree, Some(&path), recursive)?;
            } else {
                writeln!(
                    self.writer(),
                    "{:06o} {} {}\t{}",
                    entry.mode,
                    entry.entry_mode().object_kind(),
                    entry.oid,
                    path
                )?;
            }
        }

        Ok(())
    }
}
