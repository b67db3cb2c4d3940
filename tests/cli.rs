//! End-to-end tests: run the compiled binary against the fixture repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    /// Fresh copy of `fixtures/repo/` with a `website/` site directory.
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/repo");
        copy_dir_recursive(&fixtures, tmp.path()).unwrap();
        fs::create_dir_all(tmp.path().join("website")).unwrap();
        Self { tmp }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.tmp.path().join(rel)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_workshop-catalog"))
            .arg("--releases")
            .arg(self.path("releases"))
            .arg("--data")
            .arg(self.path("website/releases.json"))
            .arg("--output")
            .arg(self.path("dist"))
            .args(args)
            .output()
            .expect("failed to run workshop-catalog")
    }

    /// Run, assert success, return stdout.
    fn ok(&self, args: &[&str]) -> String {
        let out = self.run(args);
        assert!(
            out.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8(out.stdout).unwrap()
    }

    fn scanned() -> Self {
        let ws = Self::new();
        ws.ok(&["scan"]);
        ws
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

#[test]
fn scan_writes_data_file_and_summary() {
    let ws = Workspace::new();
    let stdout = ws.ok(&["scan"]);

    assert!(stdout.contains("  03: Turing Machine"));
    assert!(stdout.contains("Generated data for 5 releases"));
    assert!(stdout.contains("10_twists: could not parse info.yaml"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.path("website/releases.json")).unwrap())
            .unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "03_Turing_Machine",
            "05_chord_blimey",
            "10_twists",
            "13_noisebox",
            "sandbox"
        ]
    );
}

#[test]
fn build_produces_site_and_report() {
    let ws = Workspace::new();
    let stdout = ws.ok(&["build"]);

    assert!(stdout.contains("==> Stage 1: Scanning"));
    assert!(stdout.contains("Turing Machine → release-03_Turing_Machine.html"));
    assert!(stdout.contains("    Releases with documentation: 1"));
    assert!(stdout.contains("    Releases with firmware: 3"));
    assert!(stdout.contains("    Total releases: 5"));

    for file in [
        "index.html",
        "releases.json",
        "release-03_Turing_Machine.html",
        "release-sandbox.html",
    ] {
        assert!(ws.path("dist").join(file).exists(), "missing {file}");
    }

    let index = fs::read_to_string(ws.path("dist/index.html")).unwrap();
    assert_eq!(index.matches(r#"class="release-card""#).count(), 5);
    assert!(index.contains(r#"<option value="Rust">Rust</option>"#));
}

#[test]
fn build_into_the_data_directory_keeps_the_data() {
    let ws = Workspace::new();
    let out = Command::new(env!("CARGO_BIN_EXE_workshop-catalog"))
        .current_dir(ws.path(""))
        .args(["build", "--output", "website"])
        .output()
        .expect("failed to run workshop-catalog");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.path("website/releases.json")).unwrap())
            .unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);
    assert!(ws.path("website/index.html").exists());
}

#[test]
fn generate_uses_site_config() {
    let ws = Workspace::scanned();
    fs::write(
        ws.path("website/config.toml"),
        "[site]\ntitle = \"Card Archive\"\n",
    )
    .unwrap();
    ws.ok(&["generate"]);

    let detail = fs::read_to_string(ws.path("dist/release-13_noisebox.html")).unwrap();
    assert!(detail.contains("<title>Noisebox - Card Archive</title>"));
    assert!(detail.contains("Noise algorithms for the Workshop Computer."));
}

#[test]
fn generate_rejects_bad_config() {
    let ws = Workspace::scanned();
    fs::write(ws.path("website/config.toml"), "[site]\ntitel = \"typo\"\n").unwrap();
    let out = ws.run(&["generate"]);
    assert!(!out.status.success());
}

#[test]
fn generate_without_data_fails() {
    let ws = Workspace::new();
    let out = ws.run(&["generate"]);
    assert!(!out.status.success());
    assert!(!ws.path("dist").exists());
}

#[test]
fn list_filters_by_status_and_language() {
    let ws = Workspace::scanned();

    let beta = ws.ok(&["list", "--status", "BETA"]);
    assert!(beta.starts_with("05 Chord Blimey\n"));
    assert!(beta.contains("Showing 1 of 5 releases"));

    let rust = ws.ok(&["list", "--language", "Rust"]);
    assert!(rust.starts_with("sandbox sandbox\n"));

    let none = ws.ok(&["list", "--status", "released", "--language", "Rust"]);
    assert!(none.starts_with("No releases match the current filters."));
}

#[test]
fn show_prints_detail_markup() {
    let ws = Workspace::scanned();
    let stdout = ws.ok(&["show", "03_Turing_Machine"]);
    assert!(stdout.contains("Turing_Manual.pdf"));
    assert!(stdout.contains("Turn the <strong>main knob</strong> to lock the loop."));
}

#[test]
fn show_unknown_and_missing_id_fail() {
    let ws = Workspace::scanned();

    let unknown = ws.run(&["show", "99_nope"]);
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stdout).contains("Release not found."));

    let missing = ws.run(&["show"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stdout).contains("No release ID specified."));
}

#[test]
fn download_single_file_prints_link() {
    let ws = Workspace::scanned();
    let stdout = ws.ok(&["download", "03_Turing_Machine"]);
    assert_eq!(
        stdout,
        "Download: Turing.uf2\n    Link: ../releases/03_Turing_Machine/Rev_1_5_Code/build/Turing.uf2\n"
    );
}

#[test]
fn download_multiple_files_needs_a_pick() {
    let ws = Workspace::scanned();

    let options = ws.ok(&["download", "05_chord_blimey"]);
    assert!(options.contains("1. chord_blimey.uf2"));
    assert!(options.contains("2. chord_blimey_drone.uf2"));

    let picked = ws.ok(&["download", "05_chord_blimey", "--pick", "2"]);
    assert!(picked.starts_with("Download: chord_blimey_drone.uf2"));

    let cancelled = ws.ok(&["download", "05_chord_blimey", "--pick", ""]);
    assert_eq!(cancelled, "Download cancelled.\n");

    let signed = ws.ok(&["download", "05_chord_blimey", "--pick", "+1"]);
    assert!(signed.starts_with("Download: chord_blimey.uf2"));

    for answer in ["7", "  "] {
        let invalid = ws.run(&["download", "05_chord_blimey", "--pick", answer]);
        assert!(!invalid.status.success(), "{answer:?}");
        assert_eq!(String::from_utf8_lossy(&invalid.stderr), "Invalid selection.\n");
    }
}

#[test]
fn download_without_firmware_fails() {
    let ws = Workspace::scanned();
    let out = ws.run(&["download", "sandbox"]);
    assert!(!out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stderr),
        "No firmware files available for this release.\n"
    );
}

#[test]
fn gen_config_is_valid_toml() {
    let ws = Workspace::new();
    let stdout = ws.ok(&["gen-config"]);
    let value: toml::Value = toml::from_str(&stdout).unwrap();
    assert_eq!(value["site"]["title"].as_str(), Some("Workshop Computer"));
}
