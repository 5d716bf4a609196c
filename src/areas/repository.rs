use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::artifacts::core::config::Config;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    config: Config,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>, config: Config) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let database = Database::open(&config.objects_path(&path), &config);
        let index = Index::new(config.index_path(&path).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            index,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
