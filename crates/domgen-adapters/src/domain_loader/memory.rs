//! Loader over an already-built structure.

use domgen_core::{
    application::ports::DomainStructureLoader, domain::DomainStructure, error::DomgenResult,
};

/// Hands out clones of a prebuilt [`DomainStructure`].
#[derive(Debug, Clone)]
pub struct MemoryDomainLoader {
    structure: DomainStructure,
}

impl MemoryDomainLoader {
    pub fn new(structure: DomainStructure) -> Self {
        Self { structure }
    }
}

impl DomainStructureLoader for MemoryDomainLoader {
    fn load_structure(&self) -> DomgenResult<DomainStructure> {
        Ok(self.structure.clone())
    }
}
