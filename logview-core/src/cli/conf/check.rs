use crate::conf::{ConfigError, FileConditions, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ listening on {}", cfg.server.listen);
            println!("✔ serving logs from {}", cfg.server.root_path.display());
            if let Some(conditions) = &cfg.general.file_conditions {
                match FileConditions::read(conditions) {
                    Ok(c) => println!("✔ {} file conditions", c.len()),
                    Err(e) => println!("✘ file conditions ignored: {e}"),
                }
            }
            if let Some(store) = &cfg.object_store {
                println!("✔ object store fallback {}/{}", store.base_url, store.container);
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::UnknownFilter { .. } => Some(
            "general.filter must name a known filter: sevfilter or nofilter.\n\
             \n\
             Example:\n\
             \n\
             general = { filter = \"sevfilter\" }",
        ),

        ConfigError::UnknownView { .. } => Some(
            "general.view must name a known view: htmlview, textview or passthroughview.",
        ),

        ConfigError::InvalidListen { .. } => Some(
            "server.listen must be an ip:port pair, e.g. \"0.0.0.0:8000\".",
        ),

        _ => None,
    }
}
