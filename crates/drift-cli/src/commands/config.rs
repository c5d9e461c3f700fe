//! Config command - prints or checks a field configuration

use anyhow::{Context, Result};
use drift_core::FieldConfig;
use std::path::Path;

pub fn run(check: Option<&str>) -> Result<()> {
    let config = match check {
        Some(path) => {
            let config = FieldConfig::load(Some(Path::new(path)))
                .with_context(|| format!("Invalid config: {path}"))?;
            println!("# {path}: OK");
            config
        }
        None => FieldConfig::default(),
    };

    print!("{}", config.to_toml_string()?);
    Ok(())
}
