//! Domain value objects: ObjectKind and the property type taxonomy.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold NO generation logic. Deciding what code a property produces lives in
//! `crate::generation`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Type tags
//!
//! | Tag | Type |
//! |-----|------|
//! | `string`, `int`, `float`, `bool` | [`PropertyType::Scalar`] |
//! | `date`, `time`, `datetime`, `timezoned-datetime` | [`PropertyType::Temporal`] |
//! | `file`, `image` | [`PropertyType::File`] |
//! | `colour`, `transparent-colour` | [`PropertyType::Colour`] |
//! | `latlng`, `street-address`, `street-address-with-latlng` | [`PropertyType::Geo`] |
//! | `country`, `money`, `currency` | the matching unit variant |
//! | `url`, `email` | [`PropertyType::Web`] |
//! | `enum<App\Status>` | [`PropertyType::Enum`] |
//! | `collection<...>` | [`PropertyType::Collection`] |
//! | `App\Domain\Supplier`, `Supplier` | [`PropertyType::Object`] |
//! | anything else (`mixed`, `array`, ...) | [`PropertyType::Unknown`] |

use crate::domain::entities::common::{ClassName, NAMESPACE_SEPARATOR};
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ObjectKind ───────────────────────────────────────────────────────────────

/// What a domain object is, as far as relations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    /// Has identity; referenced by relation.
    #[default]
    Entity,
    /// No identity; embedded in its owner.
    ValueObject,
    /// A closed set of values.
    Enum,
}

impl ObjectKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::ValueObject => "value-object",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entity" => Ok(Self::Entity),
            "value-object" | "value_object" | "valueobject" | "vo" => Ok(Self::ValueObject),
            "enum" => Ok(Self::Enum),
            other => Err(DomainError::InvalidPropertyType {
                value: other.into(),
                reason: "expected one of: entity, value-object, enum".into(),
            }),
        }
    }
}

// ── Category enums ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Bool,
}

impl ScalarType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalType {
    Date,
    Time,
    DateTime,
    TimezonedDateTime,
}

impl TemporalType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::TimezonedDateTime => "timezoned-datetime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    File,
    Image,
}

impl FileType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColourType {
    Colour,
    TransparentColour,
}

impl ColourType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Colour => "colour",
            Self::TransparentColour => "transparent-colour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoType {
    LatLng,
    StreetAddress,
    StreetAddressWithLatLng,
}

impl GeoType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LatLng => "latlng",
            Self::StreetAddress => "street-address",
            Self::StreetAddressWithLatLng => "street-address-with-latlng",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebType {
    Url,
    Email,
}

impl WebType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Email => "email",
        }
    }
}

// ── PropertyType ─────────────────────────────────────────────────────────────

/// Semantic type of a property.
///
/// `Object` references are not classified here: whether `App\Domain\Address`
/// is an entity or a value object depends on the [`DomainStructure`] it is
/// resolved against.
///
/// [`DomainStructure`]: crate::domain::DomainStructure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Scalar(ScalarType),
    Temporal(TemporalType),
    File(FileType),
    Colour(ColourType),
    Geo(GeoType),
    Country,
    Money,
    Currency,
    Web(WebType),
    Enum(ClassName),
    Object(ClassName),
    Collection(Box<PropertyType>),
    Unknown(String),
}

impl PropertyType {
    /// Convenience constructor for `collection<element>`.
    pub fn collection_of(element: PropertyType) -> Self {
        Self::Collection(Box::new(element))
    }

    /// Element type for collections, `None` otherwise.
    pub fn element(&self) -> Option<&PropertyType> {
        match self {
            Self::Collection(element) => Some(element),
            _ => None,
        }
    }

    /// The referenced class of an `Object` type.
    pub fn object_class(&self) -> Option<&ClassName> {
        match self {
            Self::Object(class) => Some(class),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(t) => f.write_str(t.as_str()),
            Self::Temporal(t) => f.write_str(t.as_str()),
            Self::File(t) => f.write_str(t.as_str()),
            Self::Colour(t) => f.write_str(t.as_str()),
            Self::Geo(t) => f.write_str(t.as_str()),
            Self::Country => f.write_str("country"),
            Self::Money => f.write_str("money"),
            Self::Currency => f.write_str("currency"),
            Self::Web(t) => f.write_str(t.as_str()),
            Self::Enum(class) => write!(f, "enum<{class}>"),
            Self::Object(class) => write!(f, "{class}"),
            Self::Collection(element) => write!(f, "collection<{element}>"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for PropertyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(DomainError::InvalidPropertyType {
                value: s.into(),
                reason: "type cannot be empty".into(),
            });
        }

        if let Some(inner) = generic_argument(tag, "collection") {
            return Ok(Self::collection_of(inner?.parse()?));
        }
        if let Some(inner) = generic_argument(tag, "enum") {
            return Ok(Self::Enum(ClassName::new(inner?)?));
        }

        let keyword = match tag.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Some(Self::Scalar(ScalarType::String)),
            "int" | "integer" => Some(Self::Scalar(ScalarType::Int)),
            "float" | "double" | "decimal" => Some(Self::Scalar(ScalarType::Float)),
            "bool" | "boolean" => Some(Self::Scalar(ScalarType::Bool)),
            "date" => Some(Self::Temporal(TemporalType::Date)),
            "time" | "time-of-day" => Some(Self::Temporal(TemporalType::Time)),
            "datetime" | "date-time" => Some(Self::Temporal(TemporalType::DateTime)),
            "timezoned-datetime" | "timezoned-date-time" => {
                Some(Self::Temporal(TemporalType::TimezonedDateTime))
            }
            "file" => Some(Self::File(FileType::File)),
            "image" => Some(Self::File(FileType::Image)),
            "colour" | "color" => Some(Self::Colour(ColourType::Colour)),
            "transparent-colour" | "transparent-color" => {
                Some(Self::Colour(ColourType::TransparentColour))
            }
            "latlng" | "lat-lng" => Some(Self::Geo(GeoType::LatLng)),
            "street-address" => Some(Self::Geo(GeoType::StreetAddress)),
            "street-address-with-latlng" => Some(Self::Geo(GeoType::StreetAddressWithLatLng)),
            "country" => Some(Self::Country),
            "money" => Some(Self::Money),
            "currency" => Some(Self::Currency),
            "url" => Some(Self::Web(WebType::Url)),
            "email" | "email-address" => Some(Self::Web(WebType::Email)),
            _ => None,
        };
        if let Some(keyword) = keyword {
            return Ok(keyword);
        }

        let looks_like_class = tag.contains(NAMESPACE_SEPARATOR)
            || tag.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        if looks_like_class {
            return Ok(Self::Object(ClassName::new(tag)?));
        }

        Ok(Self::Unknown(tag.to_string()))
    }
}

/// Extract `T` from `name<T>`; `None` when `tag` is not of that form.
fn generic_argument<'a>(tag: &'a str, name: &str) -> Option<Result<&'a str, DomainError>> {
    let head = tag.get(..name.len() + 1)?;
    if !head.eq_ignore_ascii_case(&format!("{name}<")) {
        return None;
    }

    let inner = tag[name.len() + 1..]
        .strip_suffix('>')
        .map(str::trim)
        .filter(|inner| !inner.is_empty())
        .ok_or_else(|| DomainError::InvalidPropertyType {
            value: tag.into(),
            reason: format!("expected '{name}<...>'"),
        });

    Some(inner)
}
