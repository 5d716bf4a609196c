use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn ls_files(&mut self, stage: bool) -> anyhow::Result<()> {
        let entries = self.index().load()?;

        for entry in entries {
            if stage {
                writeln!(
                    self.writer(),
                    "{:06o} {} {}\t{}",
                    entry.mode,
                    entry.oid,
                    entry.stage(),
                    entry.path
                )?;
            } else {
                writeln!(self.writer(), "{}", entry.path)?;
            }
        }

        Ok(())
    }
}
