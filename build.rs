//! Build script for KetoScan
//!
//! Fingerprints the reference tables compiled in with `include_str!` so a
//! running server can report which table revision it carries.

use std::fs;
use std::path::Path;

const TABLE_FILES: [&str; 4] = [
    "sugar_alcohols.json",
    "gi_master.csv",
    "category_gi.json",
    "fda_dv_2024.csv",
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn main() {
    let data_dir = Path::new("data");
    let mut digest = FNV_OFFSET;

    for name in TABLE_FILES {
        let path = data_dir.join(name);
        println!("cargo:rerun-if-changed={}", path.display());

        let bytes = fs::read(&path)
            .unwrap_or_else(|e| panic!("Failed to read table {}: {}", path.display(), e));
        digest = fnv1a(digest, name.as_bytes());
        digest = fnv1a(digest, &bytes);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=KETOSCAN_TABLES_DIGEST={:016x}", digest);
    println!("cargo:rustc-env=KETOSCAN_BUILD_TIMESTAMP={}", timestamp);
}
