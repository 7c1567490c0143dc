//! `--show-settings`: dump the effective settings as JSON.

use crate::cli::Options;

pub fn print(options: &Options) {
    match serde_json::to_string_pretty(options) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: cannot render settings: {e}"),
    }
}
