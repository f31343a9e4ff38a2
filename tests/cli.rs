use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kantong(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kantong").unwrap();
    cmd.env("KANTONG_DATA_DIR", dir.path());
    cmd
}

fn add_category(dir: &TempDir, month: &str, name: &str, budget: &str) {
    kantong(dir)
        .args(["--month", month, "category", "add", name, budget])
        .assert()
        .success();
}

#[test]
fn test_config_shows_data_dir() {
    let dir = TempDir::new().unwrap();
    kantong(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max transactions: 1000"))
        .stdout(predicate::str::contains(dir.path().to_string_lossy().to_string()));
}

#[test]
fn test_category_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "500000");

    kantong(&dir)
        .args(["--month", "maret", "category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pos Anggaran Maret"))
        .stdout(predicate::str::contains("Makan"));

    let file = dir.path().join("data").join("pos_03.txt");
    let content = std::fs::read_to_string(file).unwrap();
    assert!(content.starts_with("1|Makan|500000|0|500000|0|1"));
}

#[test]
fn test_duplicate_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "500000");

    kantong(&dir)
        .args(["--month", "3", "category", "add", "makan", "1000"])
        .assert()
        .failure();
}

#[test]
fn test_transaction_updates_category_realization() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");

    kantong(&dir)
        .args([
            "transaction",
            "add",
            "05-03-2025",
            "pengeluaran",
            "Makan",
            "25000",
            "--note",
            "Nasi goreng",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaksi berhasil ditambahkan"));

    let line = std::fs::read_to_string(dir.path().join("data").join("transaksi.txt")).unwrap();
    assert_eq!(
        line.trim_end(),
        "T0001|05-03-2025|Pengeluaran|Makan|25000|Nasi goreng"
    );

    kantong(&dir)
        .args(["--month", "3", "category", "show", "Makan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.000"));
}

#[test]
fn test_transaction_needs_existing_category() {
    let dir = TempDir::new().unwrap();
    kantong(&dir)
        .args(["transaction", "add", "05-03-2025", "pengeluaran", "Kos", "1000"])
        .assert()
        .failure();

    let file = dir.path().join("data").join("transaksi.txt");
    let content = std::fs::read_to_string(file).unwrap_or_default();
    assert!(content.trim().is_empty());
}

#[test]
fn test_invalid_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "2", "Makan", "100000");

    kantong(&dir)
        .args([
            "--month",
            "2",
            "transaction",
            "add",
            "30-02-2025",
            "pengeluaran",
            "Makan",
            "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tanggal tidak valid"));
}

#[test]
fn test_invalid_date_reported_before_missing_category() {
    let dir = TempDir::new().unwrap();
    kantong(&dir)
        .args(["transaction", "add", "31-02-2025", "pengeluaran", "Kos", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tanggal tidak valid"))
        .stderr(predicate::str::contains("Kos").not());
}

#[test]
fn test_note_with_line_break_is_rejected() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");

    kantong(&dir)
        .args([
            "transaction",
            "add",
            "05-03-2025",
            "pengeluaran",
            "Makan",
            "1000",
            "--note",
            "beli\nT0009",
        ])
        .assert()
        .failure();

    let file = dir.path().join("data").join("transaksi.txt");
    let content = std::fs::read_to_string(file).unwrap_or_default();
    assert!(content.trim().is_empty());
}

#[test]
fn test_category_in_use_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");
    kantong(&dir)
        .args(["transaction", "add", "05-03-2025", "pengeluaran", "Makan", "1000"])
        .assert()
        .success();

    kantong(&dir)
        .args(["--month", "3", "category", "delete", "Makan", "--force"])
        .assert()
        .failure();

    kantong(&dir)
        .args(["transaction", "delete", "T0001", "--force"])
        .assert()
        .success();

    kantong(&dir)
        .args(["--month", "3", "category", "delete", "Makan", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pos 'Makan' dihapus"));
}

#[test]
fn test_delete_without_force_changes_nothing() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");
    kantong(&dir)
        .args(["transaction", "add", "05-03-2025", "pemasukan", "Makan", "1000"])
        .assert()
        .success();

    kantong(&dir)
        .args(["transaction", "delete", "T0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    kantong(&dir)
        .args(["transaction", "show", "T0001"])
        .assert()
        .success();
}

#[test]
fn test_analysis_refresh_and_show() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");
    kantong(&dir)
        .args(["transaction", "add", "01-03-2025", "pemasukan", "Makan", "1000000"])
        .assert()
        .success();
    kantong(&dir)
        .args(["transaction", "add", "02-03-2025", "pengeluaran", "Makan", "400000"])
        .assert()
        .success();

    kantong(&dir)
        .args(["--month", "3", "analysis", "refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SURPLUS"))
        .stdout(predicate::str::contains("60.00%"));

    kantong(&dir)
        .args(["--month", "3", "analysis", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SURPLUS"))
        .stdout(predicate::str::contains("Jalankan").not());
}

#[test]
fn test_copy_categories_from_previous_month() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "1", "Makan", "100000");
    add_category(&dir, "1", "Kos", "750000");

    kantong(&dir)
        .args(["--month", "2", "category", "copy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 pos anggaran disalin"));

    kantong(&dir)
        .args(["--month", "2", "category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kos"));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");
    kantong(&dir)
        .args(["transaction", "add", "05-03-2025", "pengeluaran", "Makan", "25000"])
        .assert()
        .success();

    kantong(&dir)
        .args(["--month", "3", "export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Tanggal,Jenis,Pos,Nominal,Deskripsi"))
        .stdout(predicate::str::contains("T0001"));
}

#[test]
fn test_export_json_file() {
    let dir = TempDir::new().unwrap();
    add_category(&dir, "3", "Makan", "100000");
    let out = dir.path().join("maret.json");

    kantong(&dir)
        .args(["--month", "3", "export", "--format", "json", "--pretty"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json["month"], 3);
    assert_eq!(json["categories"].as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_month_argument() {
    let dir = TempDir::new().unwrap();
    kantong(&dir)
        .args(["--month", "13", "category", "list"])
        .assert()
        .failure();
}
