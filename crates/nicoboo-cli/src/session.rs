//! Opening the progress engine for one CLI invocation.

use std::error::Error;

use nicoboo_core::{Config, Database, Partition, ProgressEngine, SharedMirror};

pub type Engine = ProgressEngine<Database>;

pub struct Session {
    pub engine: Engine,
    pub config: Config,
}

impl Session {
    /// Open the database in the data directory for `user`'s partition.
    pub fn open(user: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let config = Config::load()?;
        let mirror = config.mirror_dir()?.map(SharedMirror::new);
        let partition = Partition::from_user_id(user);
        let engine = ProgressEngine::open(Database::open()?, partition, mirror)?;
        Ok(Self { engine, config })
    }

    pub fn partition(&self) -> &Partition {
        self.engine.partition()
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn no_profile() -> Box<dyn Error> {
    "no profile set; run `nicoboo-cli profile init` first".into()
}
