//! Build script for chart-station-flow.
//!
//! Copies the station detail, flow sample and month/year CSV files to
//! OUT_DIR so they can be embedded via `include_str!` at compile time.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let files = vec![
        ("../fixtures/sta_detail.csv", "sta_detail.csv"),
        ("../fixtures/pems_data.csv", "pems_data.csv"),
        ("../fixtures/monyr.csv", "monyr.csv"),
    ];

    for (src_path, dest_name) in &files {
        let src = Path::new(src_path);
        let dest = Path::new(&out_dir).join(dest_name);
        if src.exists() {
            fs::copy(src, &dest).unwrap_or_else(|e| {
                panic!("Failed to copy {} to {}: {}", src_path, dest.display(), e);
            });
        } else {
            fs::write(&dest, "").unwrap();
            println!(
                "cargo:warning=Fixture file {} not found, using empty placeholder",
                src_path
            );
        }
        println!("cargo:rerun-if-changed={}", src_path);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
