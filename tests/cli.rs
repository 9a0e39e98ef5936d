use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const HEADER: &str = "Time,Ticker,Price,Size,Exchange";

fn venue_lag(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_venue_lag"))
        .current_dir(cwd)
        .args(args)
        .env_remove("VENUE_LAG_INPUT")
        .env_remove("VENUE_LAG_DATA_DIR")
        .env_remove("VENUE_LAG_FRACTION")
        .env_remove("VENUE_LAG_MATCHER")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn write_feed(path: &Path, rows: &[&str]) {
    let mut text = format!("{HEADER}\n");
    for r in rows {
        text.push_str(r);
        text.push('\n');
    }
    fs::write(path, text).unwrap();
}

#[test]
fn usage_errors_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let none = venue_lag(dir.path(), &[]);
    assert_eq!(none.status.code(), Some(1));
    assert!(stderr(&none).contains("Usage"));

    let extra = venue_lag(dir.path(), &["2017-04-18", "2017-04-19"]);
    assert_eq!(extra.status.code(), Some(1));
    assert!(stderr(&extra).contains("Usage"));
}

#[test]
fn help_and_version_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let help = venue_lag(dir.path(), &["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(stdout(&help).contains("Usage"));

    let version = venue_lag(dir.path(), &["--version"]);
    assert_eq!(version.status.code(), Some(0));
}

#[test]
fn missing_source_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = venue_lag(dir.path(), &["2099-01-01"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("cannot open"));
}

#[test]
fn header_only_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    write_feed(&path, &[]);
    let out = venue_lag(dir.path(), &["d", "--input", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).starts_with("Read 0 trades from "));
    assert!(stderr(&out).contains("no trades read"));
}

#[test]
fn labelled_feed_from_data_dir_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("test_data")).unwrap();
    write_feed(&dir.path().join("test_data/labeled_trade_data_2024-01-01.csv"), &[
        "2024-01-01 00:00:00.000000,XYZ,150.0,10,A",
        "2024-01-01 00:00:00.000100,XYZ,150.0,10,B",
    ]);
    let out = venue_lag(dir.path(), &["2024-01-01", "--utc"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Read 2 trades from "));
    assert_eq!(lines[1], "Trades from Exchange A: 1");
    assert_eq!(lines[2], "Trades from Exchange B: 1");
    assert_eq!(
        lines[3],
        "Estimation - B Exchange is 100 microseconds slower than A Exchange on 2024-01-01"
    );
}

#[test]
fn one_sided_feed_reports_zero_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a_only.csv");
    write_feed(&path, &["2024-01-01 00:00:00.000000,XYZ,150.0,10,A"]);
    let input = path.to_str().unwrap();

    let out = venue_lag(dir.path(), &["d", "--input", input]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("B Exchange is 0 microseconds slower"));
    assert!(stderr(&out).contains("not enough trades"));

    let strict = venue_lag(dir.path(), &["d", "--input", input, "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn generate_labels_a_raw_feed() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.csv");
    fs::write(
        &raw,
        "Time,Ticker,Price,Size\n\
         2017-04-17 15:59:59.000000,GOOG,830.00,1\n\
         2017-04-18 09:30:00.000000,GOOG,830.10,100\n\
         2017-04-18 09:30:01.000000,GOOG,830.20,10\n\
         2017-04-18 09:30:02.000000,GOOG,830.30,5\n\
         2017-04-18 09:30:03.000000,GOOG,830.40,20\n",
    )
    .unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_generate"))
        .current_dir(dir.path())
        .args(["2017-04-18", "--folder", "out", "--seed", "3", "--noise-std", "0"])
        .arg("--from")
        .arg(&raw)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).starts_with("Labeled data for 2017-04-18 saved to "));

    let written = dir.path().join("out/labeled_trade_data_2017-04-18.csv");
    let text = fs::read_to_string(written).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.starts_with("2017-04-18 09:30:0")));
    assert_eq!(rows.iter().filter(|r| r.ends_with(",B")).count(), 2);
    assert_eq!(rows.iter().filter(|r| r.ends_with(",A")).count(), 2);
    for r in rows.iter().filter(|r| r.ends_with(",B")) {
        assert!(r[..26].ends_with(".000005"), "B row not shifted: {r}");
    }
}
