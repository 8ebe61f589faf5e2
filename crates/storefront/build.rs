//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served under a
//! content-addressed name and cached forever by the browser.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = static_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    match fingerprint_stylesheet(&css_path, &static_dir.join("derived")) {
        Ok(hash) => println!("cargo:rustc-env=CSS_HASH={hash}"),
        Err(e) => {
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
        }
    }
}

/// Copy `css_path` to `derived_dir/main.<hash>.css` and return the hash.
///
/// The hash is the first 8 hex characters of the SHA-256 of the file.
fn fingerprint_stylesheet(css_path: &Path, derived_dir: &Path) -> io::Result<String> {
    let content = fs::read(css_path)?;
    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest).to_string();

    fs::create_dir_all(derived_dir)?;
    fs::write(derived_dir.join(format!("main.{short_hash}.css")), &content)?;

    Ok(short_hash)
}
