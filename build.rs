//! Build script: embeds the version string into the binary.

use std::process::Command;

fn main() {
    // INIFILE_VERSION from the environment (release builds) wins over
    // git describe (local builds).
    if let Ok(version) = std::env::var("INIFILE_VERSION") {
        println!("cargo:rustc-env=INIFILE_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=INIFILE_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=INIFILE_VERSION");
}
