//! Integration tests for domgen-cli.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DOMAIN: &str = r#"
name = "billing"

[[objects]]
name = 'App\Domain\Invoice'
kind = "entity"
properties = [
  { name = "total", type = "money" },
  { name = "issuedAt", type = "datetime" },
  { name = "vendor", type = 'App\Domain\Supplier' },
  { name = "lines", type = 'collection<App\Domain\InvoiceLine>' },
  { name = "notes", type = "string", nullable = true },
]

[[objects]]
name = 'App\Domain\Supplier'
properties = [{ name = "name", type = "string" }]

[[objects]]
name = 'App\Domain\InvoiceLine'
kind = "value-object"
properties = [{ name = "amount", type = "money" }]
"#;

/// A scratch project with `domain.toml`, isolated from the user's config.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("domain.toml"), DOMAIN).unwrap();
    dir
}

fn domgen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("domgen").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn read(dir: &TempDir, relative: &str) -> String {
    fs::read_to_string(dir.path().join(relative)).unwrap()
}

const INVOICE_MAPPER: &str = "src/Persistence/Infrastructure/Mapper/InvoiceMapper.php";

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    domgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("persistence"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    domgen(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn persistence_scaffolds_every_entity() {
    let dir = project();
    domgen(&dir)
        .args(["-d", "domain.toml", "persistence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IInvoiceRepository.php"))
        .stdout(predicate::str::contains("Matched 2, wrote 6, skipped 0"));

    for file in [
        "src/Persistence/Services/IInvoiceRepository.php",
        "src/Persistence/Services/ISupplierRepository.php",
        "src/Persistence/Infrastructure/DbInvoiceRepository.php",
        "src/Persistence/Infrastructure/DbSupplierRepository.php",
        INVOICE_MAPPER,
        "src/Persistence/Infrastructure/Mapper/SupplierMapper.php",
    ] {
        assert!(dir.path().join(file).is_file(), "missing {file}");
    }
    // value objects get no repository
    assert!(!dir.path().join("src/Persistence/Services/IInvoiceLineRepository.php").exists());

    let mapper = read(&dir, INVOICE_MAPPER);
    assert!(mapper.contains("namespace App\\Persistence\\Infrastructure\\Mapper;"));
    assert!(mapper.contains("use App\\Domain\\Invoice;"));
    assert!(mapper.contains("$map->toTable('invoices');"));
    assert!(mapper.contains("$map->relation(Invoice::VENDOR)->to(Supplier::class)"));
    assert!(mapper.contains("$map->property(Invoice::NOTES)->to('notes')->nullable()->asVarchar(255);"));
    assert!(!mapper.contains("{property_mappings}"));

    let repository = read(&dir, "src/Persistence/Infrastructure/DbInvoiceRepository.php");
    assert!(repository.contains("use App\\Persistence\\Services\\IInvoiceRepository;"));
    assert!(repository.contains("class DbInvoiceRepository extends DbRepository"));
}

#[test]
fn persistence_keeps_existing_files_without_overwrite() {
    let dir = project();
    domgen(&dir).args(["-d", "domain.toml", "persistence"]).assert().success();

    fs::write(dir.path().join(INVOICE_MAPPER), "// edited by hand").unwrap();

    domgen(&dir)
        .args(["-d", "domain.toml", "persistence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"))
        .stdout(predicate::str::contains("Matched 2, wrote 0, skipped 6"));
    assert_eq!(read(&dir, INVOICE_MAPPER), "// edited by hand");

    domgen(&dir)
        .args(["-d", "domain.toml", "persistence", "--overwrite"])
        .assert()
        .success();
    assert!(read(&dir, INVOICE_MAPPER).contains("class InvoiceMapper extends EntityMapper"));
}

#[test]
fn persistence_is_deterministic() {
    let dir = project();
    domgen(&dir).args(["-d", "domain.toml", "persistence"]).assert().success();
    let first = read(&dir, INVOICE_MAPPER);

    domgen(&dir)
        .args(["-d", "domain.toml", "persistence", "--overwrite"])
        .assert()
        .success();
    assert_eq!(read(&dir, INVOICE_MAPPER), first);
}

#[test]
fn persistence_dry_run_writes_nothing() {
    let dir = project();
    domgen(&dir)
        .args(["-d", "domain.toml", "persistence", "*Invoice", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class InvoiceMapper extends EntityMapper"))
        .stdout(predicate::str::contains("SupplierMapper").not());

    assert!(!dir.path().join("src").exists());
}

#[test]
fn filter_matching_nothing_warns_and_succeeds() {
    let dir = project();
    domgen(&dir)
        .args(["-d", "domain.toml", "persistence", "App\\Billing\\*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entities match"));

    assert!(!dir.path().join("src").exists());
}

#[test]
fn generate_renders_user_stub() {
    let dir = project();
    fs::write(
        dir.path().join("dto.stub"),
        "<?php\n\nnamespace {namespace}\\Dto;\n\n{imports}\n\nfinal class {class}Dto\n{\n    public function __construct(int $id{constructor_params})\n    {\n    }\n}\n// {author}\n",
    )
    .unwrap();

    domgen(&dir)
        .args([
            "-d",
            "domain.toml",
            "generate",
            "--stub",
            "dto.stub",
            "--output",
            "{namespace_path}/Dto/{class}Dto.php",
            "--kind",
            "value-object",
            "--var",
            "{author}=Jane",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched 1, wrote 1, skipped 0"));

    let dto = read(&dir, "src/Domain/Dto/InvoiceLineDto.php");
    assert!(dto.contains("namespace App\\Domain\\Dto;"));
    assert!(dto.contains("use Dms\\Common\\Structure\\Money\\Money;"));
    assert!(dto.contains("final class InvoiceLineDto"));
    assert!(dto.contains("__construct(int $id, Money $amount)"));
    assert!(dto.contains("// Jane"));
}

#[test]
fn inspect_json_reports_generators() {
    let dir = project();
    let assert = domgen(&dir)
        .args(["-d", "domain.toml", "--output-format", "json", "inspect", "*Invoice"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let invoice = &report[0];

    assert_eq!(invoice["class"], "App\\Domain\\Invoice");
    assert_eq!(invoice["kind"], "entity");
    let generators: Vec<&str> = invoice["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["generator"].as_str().unwrap())
        .collect();
    assert_eq!(
        generators,
        vec!["money", "date-time", "entity", "value-object-collection", "scalar"]
    );
    assert_eq!(invoice["properties"][4]["nullable"], true);
}

#[test]
fn inspect_table_is_human_readable() {
    let dir = project();
    domgen(&dir)
        .args(["-d", "domain.toml", "inspect", "App\\Domain\\Supplier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("App\\Domain\\Supplier (entity)"))
        .stdout(predicate::str::contains("\u{2192} scalar"));
}

#[test]
fn domain_path_from_config_file() {
    let dir = project();
    fs::write(
        dir.path().join("domgen.toml"),
        "[domain]\npath = \"domain.toml\"\n\n[generation]\npersistence_namespace = 'App\\Db'\n",
    )
    .unwrap();

    domgen(&dir)
        .args(["-c", "domgen.toml", "persistence", "*Supplier"])
        .assert()
        .success();

    assert!(dir.path().join("src/Db/Services/ISupplierRepository.php").is_file());
}

#[test]
fn environment_overrides_config() {
    let dir = project();
    domgen(&dir)
        .env("DOMGEN__DOMAIN__PATH", "domain.toml")
        .args(["config", "get", "domain.path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("domain.path = domain.toml"));
}

#[test]
fn init_writes_default_config() {
    let dir = TempDir::new().unwrap();
    domgen(&dir)
        .args(["-c", "conf/domgen.toml", "init"])
        .assert()
        .success();

    let written = read(&dir, "conf/domgen.toml");
    assert!(written.contains("persistence_namespace"));

    // the written file loads back
    domgen(&dir)
        .args(["-c", "conf/domgen.toml", "config", "get", "storage.uploads_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage/app/uploads"));
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    domgen(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("domgen"));
}
