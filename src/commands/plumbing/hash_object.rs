use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn hash_object(
        &mut self,
        object_path: &str,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let file_path = self.path().join(object_path);
        let payload = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        // write (if write is true) as compressed object file
        let object_id = if write {
            self.database().write(object_type, &payload)?
        } else {
            self.database().hash(object_type, &payload)
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
