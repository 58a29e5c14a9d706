use std::path::PathBuf;

use anyhow::Result;

use satwatch_route_core::config::{Config, default_config_path};

use crate::ui::{info, warning};

pub fn run(cfg: &Config, config_arg: Option<&str>, only_path: bool) -> Result<()> {
    let path = match config_arg {
        Some(p) => PathBuf::from(p),
        None => default_config_path()?,
    };

    if only_path {
        println!("{}", path.display());
        return Ok(());
    }

    if path.exists() {
        info(format!("Config file: {}", path.display()));
    } else {
        warning(format!(
            "Config file not found at: {}\nUsing built-in defaults.",
            path.display()
        ));
    }
    println!();
    println!("{}", cfg.to_pretty_json()?);
    Ok(())
}
