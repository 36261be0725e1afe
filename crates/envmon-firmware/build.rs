//! Bakes the device profile from `.env` into the firmware image.
//!
//! `ENVMON_PROFILE` may be set in the environment or in a `.env` file next to
//! this crate (see `.env.example`). Missing values fall back to the library
//! default at runtime.

const KEYS: &[&str] = &["ENVMON_PROFILE"];

fn main() {
    println!("cargo:rerun-if-changed=.env");
    for key in KEYS {
        println!("cargo:rerun-if-env-changed={key}");
    }

    // A missing .env is fine; variables may come from the shell
    let _ = dotenvy::dotenv();

    for key in KEYS {
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
