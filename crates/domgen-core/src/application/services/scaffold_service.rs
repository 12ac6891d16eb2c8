//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the whole scaffolding workflow:
//! 1. Select domain objects by filter (and optionally by kind)
//! 2. Dispatch every property to its generator, accumulating a context
//! 3. Render the stub with derived and caller replacements
//! 4. Write the result through the filesystem port

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        CodeBuilderContext, DomainObjectStructure, DomainStructure, ObjectFilter, ObjectKind,
        Replacements, StubRenderer,
    },
    error::DomgenResult,
    generation::GeneratorRegistry,
};

/// Indentation of continuation lines in `{property_mappings}`.
const MAPPING_INDENT: &str = "        ";

pub const CLASS: &str = "{class}";
pub const NAMESPACE: &str = "{namespace}";
pub const FQCN: &str = "{fqcn}";
pub const PROPERTY_MAPPINGS: &str = "{property_mappings}";

/// Where the stub text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    /// Read through the filesystem port.
    Path(PathBuf),
    /// Already in memory.
    Inline(String),
}

type OutputPathFn = Box<dyn Fn(&DomainObjectStructure) -> PathBuf + Send + Sync>;
type ReplacementsFn = Box<dyn Fn(&DomainObjectStructure) -> Replacements + Send + Sync>;

/// One scaffold invocation.
pub struct ScaffoldRequest {
    filter: ObjectFilter,
    stub: StubSource,
    output_path: OutputPathFn,
    replacements: ReplacementsFn,
    overwrite: bool,
    kind: Option<ObjectKind>,
}

impl ScaffoldRequest {
    pub fn new(
        filter: ObjectFilter,
        stub: StubSource,
        output_path: impl Fn(&DomainObjectStructure) -> PathBuf + Send + Sync + 'static,
    ) -> Self {
        Self {
            filter,
            stub,
            output_path: Box::new(output_path),
            replacements: Box::new(|_| Replacements::new()),
            overwrite: false,
            kind: None,
        }
    }

    /// Per-object caller replacements, applied over the derived ones.
    pub fn replacements(
        mut self,
        replacements: impl Fn(&DomainObjectStructure) -> Replacements + Send + Sync + 'static,
    ) -> Self {
        self.replacements = Box::new(replacements);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Restrict the run to objects of one kind.
    pub fn only(mut self, kind: ObjectKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn filter(&self) -> &ObjectFilter {
        &self.filter
    }

    pub fn stub(&self) -> &StubSource {
        &self.stub
    }

    pub fn output_path_for(&self, object: &DomainObjectStructure) -> PathBuf {
        (self.output_path)(object)
    }

    pub fn replacements_for(&self, object: &DomainObjectStructure) -> Replacements {
        (self.replacements)(object)
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn kind(&self) -> Option<ObjectKind> {
        self.kind
    }

    /// Objects this request applies to, in declaration order.
    pub fn select<'d>(&self, domain: &'d DomainStructure) -> Vec<&'d DomainObjectStructure> {
        self.filter
            .apply(domain)
            .into_iter()
            .filter(|object| self.kind.is_none_or(|kind| object.kind() == kind))
            .collect()
    }
}

impl fmt::Debug for ScaffoldRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaffoldRequest")
            .field("filter", &self.filter.pattern())
            .field("stub", &self.stub)
            .field("overwrite", &self.overwrite)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Outcome of one scaffold run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    /// Objects selected by the filter.
    pub matched: usize,
    pub written: Vec<PathBuf>,
    /// Existing destinations left untouched because overwrite was off.
    pub skipped: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

/// Generator chosen for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecision {
    pub property: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub nullable: bool,
    pub generator: &'static str,
}

/// Dispatch decisions for one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInspection {
    pub class: String,
    pub kind: ObjectKind,
    pub properties: Vec<PropertyDecision>,
}

/// Main scaffolding service.
///
/// Owns the generator registry; the registry is read-only and shared by
/// every object of a run.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    registry: GeneratorRegistry,
    renderer: StubRenderer,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapter and registry.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use domgen_core::application::ScaffoldService;
    /// use domgen_core::generation::GeneratorRegistry;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     GeneratorRegistry::default(),
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, registry: GeneratorRegistry) -> Self {
        Self {
            filesystem,
            registry,
            renderer: StubRenderer::new(),
        }
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Scaffold one file per selected object.
    ///
    /// Fails on the first unsupported property or filesystem error; files
    /// already written stay written.
    #[instrument(
        skip_all,
        fields(
            domain = %domain.name(),
            filter = %request.filter().pattern(),
            overwrite = request.is_overwrite()
        )
    )]
    pub fn scaffold(
        &self,
        domain: &DomainStructure,
        request: &ScaffoldRequest,
    ) -> DomgenResult<ScaffoldReport> {
        let objects = request.select(domain);
        let mut report = ScaffoldReport {
            matched: objects.len(),
            ..ScaffoldReport::default()
        };

        if objects.is_empty() {
            warn!("No domain objects match the filter");
            return Ok(report);
        }

        info!(objects = objects.len(), "Scaffolding");
        let stub = self.load_stub(request.stub())?;

        for object in objects {
            let content =
                self.render_object(domain, object, &stub, &request.replacements_for(object))?;
            let destination = request.output_path_for(object);

            if self.write(&destination, &content, request.is_overwrite())? {
                report.written.push(destination);
            } else {
                report.skipped.push(destination);
            }
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Scaffold completed"
        );
        Ok(report)
    }

    /// Run every property of `object` through the registry.
    ///
    /// Returns the filled context and one fragment per property, in
    /// declaration order.
    pub fn generate_object(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
    ) -> DomgenResult<(CodeBuilderContext, Vec<String>)> {
        let mut context = CodeBuilderContext::for_object(object.name());
        let fragments = object
            .property_names()
            .map(|property| self.registry.generate(domain, object, property, &mut context))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            object = %object.name(),
            imports = context.imports().count(),
            parameters = context.constructor_parameters().len(),
            "Object generated"
        );
        Ok((context, fragments))
    }

    /// Render `object` against `stub` without touching the filesystem.
    pub fn render_object(
        &self,
        domain: &DomainStructure,
        object: &DomainObjectStructure,
        stub: &str,
        replacements: &Replacements,
    ) -> DomgenResult<String> {
        let (context, fragments) = self.generate_object(domain, object)?;

        let mut table = Self::object_replacements(object, &fragments);
        table.extend(
            replacements
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        Ok(self.renderer.render(stub, &context, &table))
    }

    /// Render every selected object without writing anything.
    ///
    /// Returns `(destination, content)` pairs in declaration order.
    #[instrument(skip_all, fields(domain = %domain.name(), filter = %request.filter().pattern()))]
    pub fn preview(
        &self,
        domain: &DomainStructure,
        request: &ScaffoldRequest,
    ) -> DomgenResult<Vec<(PathBuf, String)>> {
        let objects = request.select(domain);
        if objects.is_empty() {
            warn!("No domain objects match the filter");
            return Ok(Vec::new());
        }

        let stub = self.load_stub(request.stub())?;
        objects
            .into_iter()
            .map(|object| -> DomgenResult<(PathBuf, String)> {
                let content =
                    self.render_object(domain, object, &stub, &request.replacements_for(object))?;
                Ok((request.output_path_for(object), content))
            })
            .collect()
    }

    /// Which generator each property of the matching objects dispatches to.
    #[instrument(skip_all, fields(domain = %domain.name(), filter = %filter.pattern()))]
    pub fn inspect(
        &self,
        domain: &DomainStructure,
        filter: &ObjectFilter,
    ) -> DomgenResult<Vec<ObjectInspection>> {
        let objects = filter.apply(domain);
        if objects.is_empty() {
            warn!("No domain objects match the filter");
        }

        objects
            .into_iter()
            .map(|object| -> DomgenResult<ObjectInspection> {
                let properties = object
                    .properties()
                    .map(|property| -> DomgenResult<PropertyDecision> {
                        let generator = self.registry.resolve(domain, object, property.name())?;
                        Ok(PropertyDecision {
                            property: property.name().to_string(),
                            property_type: property.property_type().to_string(),
                            nullable: property.is_nullable(),
                            generator: generator.name(),
                        })
                    })
                    .collect::<DomgenResult<Vec<_>>>()?;

                Ok(ObjectInspection {
                    class: object.name().to_string(),
                    kind: object.kind(),
                    properties,
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn object_replacements(object: &DomainObjectStructure, fragments: &[String]) -> Replacements {
        Replacements::from([
            (CLASS.to_string(), object.short_name().to_string()),
            (NAMESPACE.to_string(), object.name().namespace().to_string()),
            (FQCN.to_string(), object.name().to_string()),
            (
                PROPERTY_MAPPINGS.to_string(),
                fragments.join(&format!("\n{MAPPING_INDENT}")),
            ),
        ])
    }

    fn load_stub(&self, source: &StubSource) -> DomgenResult<String> {
        match source {
            StubSource::Inline(text) => Ok(text.clone()),
            StubSource::Path(path) => {
                if !self.filesystem.exists(path) {
                    return Err(ApplicationError::StubNotFound { path: path.clone() }.into());
                }
                self.filesystem.read_file(path)
            }
        }
    }

    /// Returns `false` when an existing file was kept.
    fn write(&self, destination: &Path, content: &str, overwrite: bool) -> DomgenResult<bool> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }

        if !overwrite && self.filesystem.exists(destination) {
            warn!(path = %destination.display(), "File exists, skipping");
            return Ok(false);
        }

        self.filesystem.write_file(destination, content)?;
        info!(path = %destination.display(), "Wrote file");
        Ok(true)
    }
}
