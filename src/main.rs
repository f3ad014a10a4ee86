//! `resident_desk` (desk) - Resident complaint desk
//!
//! Residents file issues, the committee posts status updates, and every
//! record stays in a local data directory.

use resident_desk::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
