use std::fs;
use std::path::Path;

use vypislib::config::Settings;
use vypislib::convert::{self, check_disjoint};
use vypislib::error::VypisError;

const GIRO: &str = "\
\"Kontonummer:\";\"DE02120300000000202051 / Girokonto\";
\"Von:\";\"01.10.2022\";
\"Bis:\";\"31.10.2022\";
\"Kontostand vom 31.10.2022:\";\"1.426,01 EUR\";
\"\";
\"\";
\"Buchungstag\";\"Wertstellung\";\"Buchungstext\";\"Auftraggeber / Begünstigter\";\"Verwendungszweck\";\"Betrag (EUR)\";\"\"
\"04.10.2022\";\"05.10.2022\";\"Lastschrift\";\"REWE Markt GmbH\";\"Einkauf Danke\";\"-23,99\";\"\"
\"05.10.2022\";\"06.10.2022\";\"Überweisung\";\"Max Mustermann\";\"Miete Oktober\";\"-1.050,00\";\"\"
\"05.10.2022\";\"06.10.2022\";\"Gutschrift\";\"ACME GmbH\";\"Gehalt\";\"2.500,00\";\"\"
";

fn latin1(text: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);
    bytes.into_owned()
}

fn sjis(text: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(text);
    bytes.into_owned()
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, bytes).expect("write");
}

fn settings(root: &Path) -> Settings {
    Settings {
        in_dir: root.join("in"),
        out_dir: root.join("out"),
    }
}

#[test]
fn run_mirrors_input_layout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    write(
        &settings.in_dir.join("dkb_giro_v1/2022-10-06/transactions.csv"),
        &latin1(GIRO),
    );

    let summary = convert::run(&settings).expect("run");

    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.records_written, 3);
    assert!(summary.errors.is_empty());
    assert!(summary.skipped.is_empty());
    assert!(summary.is_success());

    let out = fs::read_to_string(
        settings.out_dir.join("dkb_giro_v1/2022-10-06/transactions.csv"),
    )
    .expect("read output");
    assert_eq!(
        out,
        "date,num,description,memo,amount,source,row\n\
         2022-10-05,,REWE Markt GmbH,Einkauf Danke,-23.99,dkb_giro_v1,1\n\
         2022-10-06,,Max Mustermann,Miete Oktober,-1050.00,dkb_giro_v1,2\n\
         2022-10-06,,ACME GmbH,Gehalt,2500.00,dkb_giro_v1,3\n"
    );
}

#[test]
fn reruns_are_byte_identical() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    write(
        &settings.in_dir.join("dkb_giro_v1/2022-10-06/transactions.csv"),
        &latin1(GIRO),
    );
    let out_file = settings.out_dir.join("dkb_giro_v1/2022-10-06/transactions.csv");

    convert::run(&settings).expect("first run");
    let first = fs::read(&out_file).expect("first output");

    convert::run(&settings).expect("second run");
    let second = fs::read(&out_file).expect("second output");

    assert_eq!(first, second);
}

#[test]
fn broken_snapshot_does_not_stop_the_batch() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    write(
        &settings.in_dir.join("dkb_giro_v1/2022-10-06/transactions.csv"),
        &latin1(GIRO),
    );
    let bad = settings.in_dir.join("smbc_v2/2022-10-01/statement.csv");
    write(
        &bad,
        &sjis("年月日,お引出し,お預入れ,お取り扱い内容\nこわれた,10,,振込\n"),
    );

    let summary = convert::run(&settings).expect("run");

    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.records_written, 3);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].unit, bad);
    assert!(summary.is_success());
    // для сломанного файла не должно появиться частичного выхода
    assert!(!settings.out_dir.join("smbc_v2").exists());
}

#[test]
fn all_failed_files_mean_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    write(
        &settings.in_dir.join("smbc_v2/2022-10-01/statement.csv"),
        &sjis("совсем не та раскладка\n"),
    );

    let summary = convert::run(&settings).expect("run");

    assert_eq!(summary.files_processed, 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(!summary.is_success());
}

#[test]
fn empty_input_tree_is_success() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    fs::create_dir_all(&settings.in_dir).expect("mkdir");

    let summary = convert::run(&settings).expect("run");

    assert_eq!(summary.files_processed, 0);
    assert_eq!(summary.records_written, 0);
    assert!(summary.is_success());
}

#[test]
fn unknown_directory_lands_in_skipped() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let settings = settings(tmp.path());
    write(&settings.in_dir.join("scratch/2022-10-01/a.csv"), b"x");

    let summary = convert::run(&settings).expect("run");

    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.is_success());
}

#[test]
fn nested_roots_are_rejected_before_any_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let in_dir = tmp.path().join("in");
    let out_dir = in_dir.join("out");
    write(
        &in_dir.join("dkb_giro_v1/2022-10-06/transactions.csv"),
        &latin1(GIRO),
    );

    let settings = Settings {
        in_dir: in_dir.clone(),
        out_dir: out_dir.clone(),
    };
    let err = convert::run(&settings).expect_err("nested roots must be rejected");
    assert!(matches!(err, VypisError::Config(_)));
    assert!(!out_dir.exists());
}

#[test]
fn path_overlap_checks() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();

    assert!(check_disjoint(&root.join("a/b"), &root.join("a/b")).is_err());
    assert!(check_disjoint(&root.join("a/b"), &root.join("a/b/out")).is_err());
    assert!(check_disjoint(&root.join("a/b/in"), &root.join("a/b")).is_err());
    // «..» схлопывается до сравнения
    assert!(check_disjoint(&root.join("a/b"), &root.join("a/b/out/..")).is_err());
    assert!(check_disjoint(&root.join("a/in"), &root.join("a/out")).is_ok());
}
