//! End-to-end scaffolding through the shipped adapters.

use std::path::{Path, PathBuf};

use domgen_adapters::{
    MemoryDomainLoader, MemoryFilesystem, StubLibrary,
    builtin_stubs::MAPPER,
    domain_loader::{DescriptionFormat, FileDomainLoader},
};
use domgen_core::prelude::*;

const DOMAIN: &str = r#"
name = "billing"

[[objects]]
name = 'App\Domain\Invoice'
properties = [
  { name = "total", type = "money" },
  { name = "issuedAt", type = "datetime" },
  { name = "vendor", type = "Supplier" },
  { name = "lines", type = 'collection<App\Domain\InvoiceLine>' },
]

[[objects]]
name = 'App\Domain\Supplier'

[[objects]]
name = 'App\Domain\InvoiceLine'
kind = "value-object"
properties = [{ name = "amount", type = "money" }]
"#;

fn mapper_request(stubs: &StubLibrary) -> ScaffoldRequest {
    ScaffoldRequest::new(
        ObjectFilter::new("App\\Domain\\*").unwrap(),
        StubSource::Inline(stubs.require(MAPPER).unwrap().to_string()),
        |object| PathBuf::from(format!("src/Mapper/{}Mapper.php", object.short_name())),
    )
    .only(ObjectKind::Entity)
    .replacements(|object| {
        Replacements::from([
            (
                "{infrastructure_namespace}".to_string(),
                "App\\Persistence\\Infrastructure".to_string(),
            ),
            (
                "{table}".to_string(),
                CodeConvention::new().table_name(object.name()),
            ),
        ])
    })
}

#[test]
fn generates_mappers_for_entities() {
    let domain = FileDomainLoader::parse(DOMAIN, DescriptionFormat::Toml, "billing.toml").unwrap();
    let loader = MemoryDomainLoader::new(domain);
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(fs.clone()), GeneratorRegistry::default());

    let report = service
        .scaffold(&loader.load_structure().unwrap(), &mapper_request(&StubLibrary::builtin()))
        .unwrap();

    assert_eq!(report.matched, 2);
    assert_eq!(
        fs.list_files(),
        vec![
            PathBuf::from("src/Mapper/InvoiceMapper.php"),
            PathBuf::from("src/Mapper/SupplierMapper.php"),
        ]
    );

    let mapper = fs.file_content("src/Mapper/InvoiceMapper.php").unwrap();
    assert!(mapper.contains("namespace App\\Persistence\\Infrastructure\\Mapper;"));
    assert!(mapper.contains("use App\\Domain\\InvoiceLine;"));
    assert!(mapper.contains("use Dms\\Core\\Model\\ValueObjectCollection;"));
    assert!(mapper.contains("$map->toTable('invoices');"));
    assert!(mapper.contains(
        "        $map->relation(Invoice::VENDOR)->to(Supplier::class)->manyToOne()->withRelatedIdAs('vendor_id');\n"
    ));
    assert!(mapper.contains(
        "$map->embeddedCollection(Invoice::LINES)->toTable('invoice_lines')"
    ));
}

#[test]
fn second_run_skips_existing_files() {
    let domain = FileDomainLoader::parse(DOMAIN, DescriptionFormat::Toml, "billing.toml").unwrap();
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(fs.clone()), GeneratorRegistry::default());
    let request = mapper_request(&StubLibrary::builtin());

    service.scaffold(&domain, &request).unwrap();
    let report = service.scaffold(&domain, &request).unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert!(fs.exists(Path::new("src/Mapper")));
}

#[test]
fn self_referencing_entity_imports_its_class_once() {
    let description = r#"
name = "catalog"

[[objects]]
name = 'App\Domain\Category'
properties = [
  { name = "parent", type = 'App\Domain\Category', nullable = true },
  { name = "children", type = "collection<Category>" },
  { name = "legacy", type = 'App\Legacy\Category' },
]

[[objects]]
name = 'App\Legacy\Category'
"#;
    let domain =
        FileDomainLoader::parse(description, DescriptionFormat::Toml, "catalog.toml").unwrap();
    let service = ScaffoldService::new(
        Box::new(MemoryFilesystem::new()),
        GeneratorRegistry::default(),
    );
    let stubs = StubLibrary::builtin();
    let replacements = Replacements::from([(
        "{infrastructure_namespace}".to_string(),
        "App\\Persistence\\Infrastructure".to_string(),
    )]);

    let mapper = service
        .render_object(
            &domain,
            domain.object("App\\Domain\\Category").unwrap(),
            stubs.require(MAPPER).unwrap(),
            &replacements,
        )
        .unwrap();

    assert_eq!(mapper.matches("use App\\Domain\\Category;").count(), 1);
    assert!(mapper.contains("use App\\Legacy\\Category as LegacyCategory;"));
    assert!(mapper.contains("$map->relation(Category::PARENT)->to(Category::class)"));
    assert!(mapper.contains("$map->relation(Category::CHILDREN)->to(Category::class)->toMany()"));
    assert!(mapper.contains("$map->relation(Category::LEGACY)->to(LegacyCategory::class)"));
}
