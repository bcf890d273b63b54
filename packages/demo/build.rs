use std::env;
use std::fs;
use std::path::PathBuf;

use embedfs_compiler::{compile, GlobExcludes};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    let assets = manifest_dir.join("assets");

    println!("cargo:rerun-if-changed=assets");

    let excludes = GlobExcludes::new(vec!["*.tmp".to_string()]);
    let source = compile("/app", &assets, &excludes).expect("compile assets");
    fs::write(out_dir.join("assets.rs"), source).expect("write assets.rs");
}
