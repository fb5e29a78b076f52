#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/gplotcli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

/// Script run by `/bin/sh` in place of gnuplot; it records its stdin.
fn recorder(dir: &Path) -> (PathBuf, PathBuf) {
    let captured = dir.join("stdin.bin");
    let script = dir.join("fake-gnuplot.sh");
    std::fs::write(&script, format!("cat > '{}'\n", captured.display()))
        .expect("script should be writable");
    (script, captured)
}

fn gplot() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gplot"));
    cmd.env_remove("GPLOT_GNUPLOT").arg("--log-level").arg("error");
    cmd
}

#[test]
fn plot_from_stdin_streams_binary_values() {
    let dir = unique_temp_dir("stdin");
    let (script, captured) = recorder(&dir);

    let mut child = gplot()
        .arg("--gnuplot")
        .arg("/bin/sh")
        .arg("--gnuplot-arg")
        .arg(&script)
        .arg("--format")
        .arg("json")
        .arg("plot")
        .arg("--title")
        .arg("jake")
        .arg("--style")
        .arg("points")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("plot should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"1 2 4\n8\n")
        .expect("input should be writable");
    let output = child.wait_with_output().expect("plot should finish");

    assert!(output.status.success(), "status: {:?}", output.status);
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary should be json");
    assert_eq!(summary.get("points").and_then(|v| v.as_u64()), Some(4));
    assert_eq!(summary.get("style").and_then(|v| v.as_str()), Some("points"));

    let wire = std::fs::read(&captured).expect("fake gnuplot should record stdin");
    let header = "set datafile binary format=\"%float64\" endian=big\n\
                  plot \"-\" binary array=4 title \"jake\" with points\n";
    assert!(wire.starts_with(header.as_bytes()));
    let data = &wire[header.len()..];
    let expected: Vec<u8> = [1.0f64, 2.0, 4.0, 8.0]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    assert_eq!(data, expected.as_slice());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn plot_with_missing_gnuplot_returns_127() {
    let dir = unique_temp_dir("missing");
    let data = dir.join("data.txt");
    std::fs::write(&data, "1 2 3\n").expect("data should be writable");

    let output = gplot()
        .arg("--gnuplot")
        .arg("/nonexistent/bin/gnuplot")
        .arg("plot")
        .arg(&data)
        .output()
        .expect("plot should run");

    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not find executable"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn plot_rejects_non_numeric_input_with_60() {
    let dir = unique_temp_dir("invalid");
    let data = dir.join("data.txt");
    std::fs::write(&data, "1 2 x\n").expect("data should be writable");

    let output = gplot()
        .arg("--gnuplot")
        .arg("/bin/sh")
        .arg("plot")
        .arg(&data)
        .output()
        .expect("plot should run");

    assert_eq!(output.status.code(), Some(60));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn plot_rejects_unknown_style_with_64() {
    let dir = unique_temp_dir("style");
    let (script, _) = recorder(&dir);
    let data = dir.join("data.txt");
    std::fs::write(&data, "1 2 3\n").expect("data should be writable");

    let output = gplot()
        .arg("--gnuplot")
        .arg("/bin/sh")
        .arg("--gnuplot-arg")
        .arg(&script)
        .arg("plot")
        .arg(&data)
        .arg("--style")
        .arg("spline")
        .output()
        .expect("plot should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid style 'spline'"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn doctor_fails_without_gnuplot() {
    let output = gplot()
        .arg("--gnuplot")
        .arg("/nonexistent/bin/gnuplot")
        .arg("--format")
        .arg("json")
        .arg("doctor")
        .output()
        .expect("doctor should run");

    assert_eq!(output.status.code(), Some(30));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor should emit json");
    assert_eq!(
        payload.get("overall").and_then(|v| v.as_str()),
        Some("fail")
    );
}

#[test]
fn version_reports_package_version() {
    let output = gplot().arg("version").output().expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("gplot {}", env!("CARGO_PKG_VERSION"))
    );
}
