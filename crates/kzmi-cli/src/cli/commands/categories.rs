//! Categories command: print the category table.

use kzmi_core::config::KzmiConfig;
use kzmi_core::sink::{JSON_EXT, MIN_JSON_EXT};

pub fn run_categories(cfg: &KzmiConfig) {
    for c in &cfg.categories {
        println!(
            "{:<28} -> {}{}, {}{}",
            c.key, c.name, JSON_EXT, c.name, MIN_JSON_EXT
        );
    }
}
