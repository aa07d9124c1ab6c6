use crate::config::{StatusRegistry, DEFAULT_CONFIG_FILE};
use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let contents = StatusRegistry::default().to_toml()?;
    io::write_file(&config_path, &contents)?;
    println!("Created {DEFAULT_CONFIG_FILE} with the default status registry");

    Ok(())
}
