use anyhow::Result;
use cksync_config::Config;
use std::path::Path;

pub fn handle(config: &Config, explicit: Option<&Path>, db_path: &Path) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    println!("# config:   {}", path.display());
    println!("# database: {}", db_path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
