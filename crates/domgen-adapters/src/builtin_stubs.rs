//! Persistence stubs that ship with domgen.
//!
//! Besides the blocks every render fills (`{imports}`, `{properties}`,
//! `{constructor_params}`, `{initializers}`, `{class}`, `{namespace}`,
//! `{fqcn}`, `{property_mappings}`), these stubs expect the persistence
//! replacements supplied by `domgen persistence`:
//!
//! | Placeholder | Example |
//! |-------------|---------|
//! | `{services_namespace}` | `App\Persistence\Services` |
//! | `{infrastructure_namespace}` | `App\Persistence\Infrastructure` |
//! | `{table}` | `invoices` |

pub const REPOSITORY_INTERFACE: &str = "repository-interface";
pub const DB_REPOSITORY: &str = "db-repository";
pub const MAPPER: &str = "mapper";

/// `(name, text)` for every built-in stub.
pub fn all() -> [(&'static str, &'static str); 3] {
    [
        (REPOSITORY_INTERFACE, REPOSITORY_INTERFACE_STUB),
        (DB_REPOSITORY, DB_REPOSITORY_STUB),
        (MAPPER, MAPPER_STUB),
    ]
}

const REPOSITORY_INTERFACE_STUB: &str = r#"<?php declare(strict_types=1);

namespace {services_namespace};

use {fqcn};
use Dms\Core\Model\ICriteria;
use Dms\Core\Model\ISpecification;
use Dms\Core\Persistence\IRepository;

/**
 * The repository for the {fqcn} entity.
 */
interface I{class}Repository extends IRepository
{
    /**
     * {@inheritDoc}
     *
     * @return {class}[]
     */
    public function getAll() : array;

    /**
     * {@inheritDoc}
     *
     * @return {class}
     */
    public function get(int $id);

    /**
     * {@inheritDoc}
     *
     * @return {class}[]
     */
    public function matching(ICriteria $criteria) : array;

    /**
     * {@inheritDoc}
     *
     * @return {class}[]
     */
    public function satisfying(ISpecification $specification) : array;
}
"#;

const DB_REPOSITORY_STUB: &str = r#"<?php declare(strict_types=1);

namespace {infrastructure_namespace};

use {fqcn};
use {services_namespace}\I{class}Repository;
use Dms\Core\Persistence\Db\Connection\IConnection;
use Dms\Core\Persistence\Db\Mapping\IOrm;
use Dms\Core\Persistence\DbRepository;

/**
 * The database repository implementation for the {fqcn} entity.
 */
class Db{class}Repository extends DbRepository implements I{class}Repository
{
    public function __construct(IConnection $connection, IOrm $orm)
    {
        parent::__construct($connection, $orm->getEntityMapper({class}::class));
    }
}
"#;

const MAPPER_STUB: &str = r#"<?php declare(strict_types=1);

namespace {infrastructure_namespace}\Mapper;

use {fqcn};
{imports}
use Dms\Core\Persistence\Db\Mapping\Definition\MapperDefinition;
use Dms\Core\Persistence\Db\Mapping\EntityMapper;

/**
 * The {fqcn} entity mapper.
 */
class {class}Mapper extends EntityMapper
{
    /**
     * Defines the entity mapper
     *
     * @param MapperDefinition $map
     *
     * @return void
     */
    protected function define(MapperDefinition $map)
    {
        $map->type({class}::class);
        $map->toTable('{table}');

        $map->idToPrimaryKey('id');

        {property_mappings}
    }
}
"#;
