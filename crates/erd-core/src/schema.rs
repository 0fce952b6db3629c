//! Schema registry types.
//!
//! A [`Schema`] is the complete, immutable set of entity and relationship
//! declarations. It is built once through [`SchemaBuilder`], which checks the
//! declarations for structural soundness, and is then passed by reference to
//! whatever consumes it: a persistence layer, or the diagram renderer.
//!
//! # Example
//!
//! ```
//! use erd_core::schema::{Entity, Field, Relationship, Schema};
//!
//! let schema = Schema::builder()
//!     .entity(
//!         Entity::new("author")
//!             .with_field(Field::integer("id").primary_key())
//!             .with_field(Field::varchar("name")),
//!     )
//!     .entity(
//!         Entity::new("book")
//!             .with_field(Field::integer("id").primary_key())
//!             .with_field(Field::integer("author_id").references("author", "id")),
//!     )
//!     .relationship(
//!         Relationship::one_to_many("author", "book", "author_id").named("books", "author"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.entities().count(), 2);
//! assert!(schema.relationships().all(|rel| rel.is_enforced()));
//! ```

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use log::{debug, warn};
use thiserror::Error;

/// Errors detected while assembling a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("entity `{0}` is declared more than once")]
    DuplicateEntity(String),

    #[error("field `{field}` is declared more than once on entity `{entity}`")]
    DuplicateField { entity: String, field: String },

    #[error("entity `{0}` has no primary key")]
    MissingPrimaryKey(String),

    #[error("unknown entity `{0}`")]
    UnknownEntity(String),

    #[error("unknown field `{field}` on entity `{entity}`")]
    UnknownField { entity: String, field: String },

    #[error("foreign key `{entity}.{field}` has type {found}, but `{target}` is {expected}")]
    ForeignKeyTypeMismatch {
        entity: String,
        field: String,
        target: String,
        found: FieldType,
        expected: FieldType,
    },

    #[error("join column `{entity}.{field}` references `{found}`, not `{expected}`")]
    JoinTargetMismatch {
        entity: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("accessor `{accessor}` is declared more than once on entity `{entity}`")]
    DuplicateAccessor { entity: String, accessor: String },
}

/// Semantic column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    Varchar,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Varchar => write!(f, "VARCHAR"),
        }
    }
}

/// Target of a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    entity: String,
    field: String,
}

impl ForeignKey {
    pub fn new(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Referenced entity.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Referenced field on [`Self::entity`].
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.field)
    }
}

/// A single declared constraint on a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    PrimaryKey,
    ForeignKey(ForeignKey),
    Unique,
    Indexed,
    NotNull,
}

/// A column of an entity together with its constraints.
///
/// Fields are non-nullable unless [`Field::nullable`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    field_type: FieldType,
    primary_key: bool,
    nullable: bool,
    unique: bool,
    indexed: bool,
    references: Option<ForeignKey>,
}

impl Field {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            primary_key: false,
            nullable: false,
            unique: false,
            indexed: false,
            references: None,
        }
    }

    /// An `INTEGER` field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// A `VARCHAR` field.
    pub fn varchar(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Varchar)
    }

    /// Marks the field as (part of) the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declares a foreign key constraint to `entity.field`.
    pub fn references(mut self, entity: impl Into<String>, field: impl Into<String>) -> Self {
        self.references = Some(ForeignKey::new(entity, field));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// The foreign key constraint, if one is declared.
    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.references.as_ref()
    }

    /// All declared constraints, in a fixed order: primary key, foreign key,
    /// unique, indexed, not-null.
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut constraints = Vec::new();
        if self.primary_key {
            constraints.push(Constraint::PrimaryKey);
        }
        if let Some(fk) = &self.references {
            constraints.push(Constraint::ForeignKey(fk.clone()));
        }
        if self.unique {
            constraints.push(Constraint::Unique);
        }
        if self.indexed {
            constraints.push(Constraint::Indexed);
        }
        if !self.nullable {
            constraints.push(Constraint::NotNull);
        }
        constraints
    }
}

/// A record type: a name and an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    fields: Vec<Field>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field; declaration order is preserved.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Fields forming the primary key. More than one means a composite key.
    pub fn primary_key(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.primary_key).collect()
    }

    pub fn unique_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.unique).collect()
    }

    pub fn indexed_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.indexed).collect()
    }

    /// Fields that carry a foreign key constraint.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Field, &ForeignKey)> {
        self.fields
            .iter()
            .filter_map(|field| field.references.as_ref().map(|fk| (field, fk)))
    }
}

/// How many rows sit on each side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// One parent row, many child rows.
    OneToMany,
    /// Many rows on both sides, joined through a third entity.
    ManyToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::OneToMany => write!(f, "one-to-many"),
            Cardinality::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Columns that join the two sides of a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Join {
    /// A column on the child entity holding the parent's key.
    Column(String),
    /// A join entity with one column per side.
    Through {
        entity: String,
        parent_column: String,
        child_column: String,
    },
}

/// A declared association between two entities.
///
/// `name` is the accessor exposed on the parent side and `back_reference`
/// the accessor exposed on the child side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    name: String,
    back_reference: String,
    parent: String,
    child: String,
    join: Join,
    enforced: bool,
}

impl Relationship {
    /// One `parent` row owns many `child` rows through `child.join_column`.
    ///
    /// Accessor names default to the child and parent entity names.
    pub fn one_to_many(
        parent: impl Into<String>,
        child: impl Into<String>,
        join_column: impl Into<String>,
    ) -> Self {
        let parent = parent.into();
        let child = child.into();
        Self {
            name: child.clone(),
            back_reference: parent.clone(),
            parent,
            child,
            join: Join::Column(join_column.into()),
            enforced: false,
        }
    }

    /// Rows of `parent` and `child` associated through rows of `through`.
    pub fn many_to_many(
        parent: impl Into<String>,
        child: impl Into<String>,
        through: impl Into<String>,
        parent_column: impl Into<String>,
        child_column: impl Into<String>,
    ) -> Self {
        let parent = parent.into();
        let child = child.into();
        Self {
            name: child.clone(),
            back_reference: parent.clone(),
            parent,
            child,
            join: Join::Through {
                entity: through.into(),
                parent_column: parent_column.into(),
                child_column: child_column.into(),
            },
            enforced: false,
        }
    }

    /// Sets the parent-side accessor and the child-side back-reference.
    pub fn named(mut self, name: impl Into<String>, back_reference: impl Into<String>) -> Self {
        self.name = name.into();
        self.back_reference = back_reference.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn back_reference(&self) -> &str {
        &self.back_reference
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn child(&self) -> &str {
        &self.child
    }

    pub fn join(&self) -> &Join {
        &self.join
    }

    pub fn cardinality(&self) -> Cardinality {
        match self.join {
            Join::Column(_) => Cardinality::OneToMany,
            Join::Through { .. } => Cardinality::ManyToMany,
        }
    }

    /// Whether every join column is backed by a foreign key to the side it
    /// joins. Computed when the schema is built.
    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    /// Whether `entity` is on either side of the relationship.
    pub fn involves(&self, entity: &str) -> bool {
        self.parent == entity || self.child == entity
    }
}

/// Collects entity and relationship declarations and validates them.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

impl SchemaBuilder {
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Validates the declarations and freezes them into a [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found. Relationships whose join
    /// columns lack a foreign key are accepted and logged as warnings.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut entities = IndexMap::with_capacity(self.entities.len());
        for entity in self.entities {
            validate_entity(&entity)?;
            if entities.contains_key(&entity.name) {
                return Err(SchemaError::DuplicateEntity(entity.name));
            }
            entities.insert(entity.name.clone(), entity);
        }

        for entity in entities.values() {
            for (field, fk) in entity.foreign_keys() {
                validate_foreign_key(&entities, entity, field, fk)?;
            }
        }

        let mut relationships = self.relationships;
        for relationship in &mut relationships {
            relationship.enforced = validate_relationship(&entities, relationship)?;
            if !relationship.enforced {
                warn!(
                    relationship = relationship.name,
                    parent = relationship.parent,
                    child = relationship.child;
                    "Relationship join column is not backed by a foreign key"
                );
            }
        }
        validate_accessors(&entities, &relationships)?;

        debug!(
            entities = entities.len(),
            relationships = relationships.len();
            "Schema registry built"
        );

        Ok(Schema {
            entities,
            relationships,
        })
    }
}

fn validate_entity(entity: &Entity) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in &entity.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    if !entity.fields.iter().any(|field| field.primary_key) {
        return Err(SchemaError::MissingPrimaryKey(entity.name.clone()));
    }

    Ok(())
}

fn lookup_field<'a>(
    entities: &'a IndexMap<String, Entity>,
    entity: &str,
    field: &str,
) -> Result<&'a Field, SchemaError> {
    entities
        .get(entity)
        .ok_or_else(|| SchemaError::UnknownEntity(entity.to_string()))?
        .field(field)
        .ok_or_else(|| SchemaError::UnknownField {
            entity: entity.to_string(),
            field: field.to_string(),
        })
}

fn validate_foreign_key(
    entities: &IndexMap<String, Entity>,
    entity: &Entity,
    field: &Field,
    fk: &ForeignKey,
) -> Result<(), SchemaError> {
    let target = lookup_field(entities, &fk.entity, &fk.field)?;
    if target.field_type != field.field_type {
        return Err(SchemaError::ForeignKeyTypeMismatch {
            entity: entity.name.clone(),
            field: field.name.clone(),
            target: fk.to_string(),
            found: field.field_type,
            expected: target.field_type,
        });
    }
    Ok(())
}

/// Whether `entity.column` exists and references `target`.
///
/// A column without a foreign key is an unenforced join. A foreign key to any
/// entity other than `target` is a mis-wired declaration.
fn column_references(
    entities: &IndexMap<String, Entity>,
    entity: &str,
    column: &str,
    target: &str,
) -> Result<bool, SchemaError> {
    let field = lookup_field(entities, entity, column)?;
    match field.foreign_key() {
        None => Ok(false),
        Some(fk) if fk.entity == target => Ok(true),
        Some(fk) => Err(SchemaError::JoinTargetMismatch {
            entity: entity.to_string(),
            field: column.to_string(),
            expected: target.to_string(),
            found: fk.entity.clone(),
        }),
    }
}

/// Checks that both sides and all join columns exist, returning whether the
/// join is enforced by foreign keys.
fn validate_relationship(
    entities: &IndexMap<String, Entity>,
    relationship: &Relationship,
) -> Result<bool, SchemaError> {
    for side in [&relationship.parent, &relationship.child] {
        if !entities.contains_key(side) {
            return Err(SchemaError::UnknownEntity(side.clone()));
        }
    }

    match &relationship.join {
        Join::Column(column) => {
            column_references(entities, &relationship.child, column, &relationship.parent)
        }
        Join::Through {
            entity,
            parent_column,
            child_column,
        } => {
            let parent_side =
                column_references(entities, entity, parent_column, &relationship.parent)?;
            let child_side =
                column_references(entities, entity, child_column, &relationship.child)?;
            Ok(parent_side && child_side)
        }
    }
}

/// Accessor names must not collide with each other or with field names on
/// the entity that exposes them.
fn validate_accessors(
    entities: &IndexMap<String, Entity>,
    relationships: &[Relationship],
) -> Result<(), SchemaError> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let exposed = relationships.iter().flat_map(|rel| {
        [
            (rel.parent.as_str(), rel.name.as_str()),
            (rel.child.as_str(), rel.back_reference.as_str()),
        ]
    });

    for (entity, accessor) in exposed {
        let clashes_with_field = entities
            .get(entity)
            .is_some_and(|e| e.field(accessor).is_some());
        if clashes_with_field || !seen.insert((entity, accessor)) {
            return Err(SchemaError::DuplicateAccessor {
                entity: entity.to_string(),
                accessor: accessor.to_string(),
            });
        }
    }

    Ok(())
}

/// The validated, immutable set of entities and relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entities: IndexMap<String, Entity>,
    relationships: Vec<Relationship>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Relationships in declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Relationships with `entity` on either side.
    pub fn relationships_of<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |rel| rel.involves(entity))
    }

    /// Every declared foreign key as `(entity, field, target)`.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Entity, &Field, &ForeignKey)> {
        self.entities
            .values()
            .flat_map(|entity| entity.foreign_keys().map(move |(field, fk)| (entity, field, fk)))
    }

    /// Relationships whose join columns are not backed by foreign keys.
    ///
    /// Referential integrity for these is not guaranteed by the schema.
    pub fn unenforced_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|rel| !rel.enforced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Entity {
        Entity::new("author")
            .with_field(Field::integer("id").primary_key())
            .with_field(Field::varchar("name").indexed())
    }

    fn book() -> Entity {
        Entity::new("book")
            .with_field(Field::integer("id").primary_key())
            .with_field(Field::integer("author_id").references("author", "id"))
            .with_field(Field::integer("shelf_id"))
    }

    #[test]
    fn test_field_constraints_order() {
        let field = Field::integer("owner_id")
            .references("owner", "id")
            .unique()
            .indexed();

        assert_eq!(
            field.constraints(),
            vec![
                Constraint::ForeignKey(ForeignKey::new("owner", "id")),
                Constraint::Unique,
                Constraint::Indexed,
                Constraint::NotNull,
            ]
        );
        assert_eq!(Field::varchar("bio").nullable().constraints(), vec![]);
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Integer.to_string(), "INTEGER");
        assert_eq!(FieldType::Varchar.to_string(), "VARCHAR");
    }

    #[test]
    fn test_build_valid_schema() {
        let schema = Schema::builder()
            .entity(author())
            .entity(book())
            .relationship(
                Relationship::one_to_many("author", "book", "author_id").named("books", "author"),
            )
            .build()
            .expect("valid schema");

        let names: Vec<_> = schema.entities().map(Entity::name).collect();
        assert_eq!(names, vec!["author", "book"]);

        let rel = schema.relationships().next().unwrap();
        assert_eq!(rel.cardinality(), Cardinality::OneToMany);
        assert!(rel.is_enforced());
        assert_eq!(schema.unenforced_relationships().count(), 0);
        assert_eq!(schema.foreign_keys().count(), 1);
    }

    #[test]
    fn test_default_accessor_names() {
        let rel = Relationship::one_to_many("author", "book", "author_id");
        assert_eq!(rel.name(), "book");
        assert_eq!(rel.back_reference(), "author");
    }

    #[test]
    fn test_unenforced_relationship_is_accepted() {
        let schema = Schema::builder()
            .entity(author())
            .entity(book())
            .entity(Entity::new("shelf").with_field(Field::integer("id").primary_key()))
            .relationship(
                Relationship::one_to_many("shelf", "book", "shelf_id").named("books", "shelf"),
            )
            .build()
            .expect("unenforced joins are flagged, not rejected");

        let unenforced: Vec<_> = schema
            .unenforced_relationships()
            .map(Relationship::name)
            .collect();
        assert_eq!(unenforced, vec!["books"]);
    }

    #[test]
    fn test_join_column_referencing_another_entity_is_rejected() {
        let err = Schema::builder()
            .entity(author())
            .entity(book())
            .entity(Entity::new("shelf").with_field(Field::integer("id").primary_key()))
            .relationship(
                Relationship::one_to_many("shelf", "book", "author_id").named("books", "shelf"),
            )
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::JoinTargetMismatch {
                entity: "book".to_string(),
                field: "author_id".to_string(),
                expected: "shelf".to_string(),
                found: "author".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_entity() {
        let err = Schema::builder().entity(author()).entity(author()).build().unwrap_err();
        assert_eq!(err, SchemaError::DuplicateEntity("author".to_string()));
    }

    #[test]
    fn test_duplicate_field() {
        let entity = author().with_field(Field::varchar("name"));
        let err = Schema::builder().entity(entity).build().unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                entity: "author".to_string(),
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_missing_primary_key() {
        let entity = Entity::new("log").with_field(Field::varchar("line"));
        let err = Schema::builder().entity(entity).build().unwrap_err();
        assert_eq!(err, SchemaError::MissingPrimaryKey("log".to_string()));
    }

    #[test]
    fn test_dangling_foreign_key() {
        let err = Schema::builder().entity(book()).build().unwrap_err();
        assert_eq!(err, SchemaError::UnknownEntity("author".to_string()));

        let entity = Entity::new("review")
            .with_field(Field::integer("id").primary_key())
            .with_field(Field::integer("book_isbn").references("book", "isbn"));
        let err = Schema::builder()
            .entity(author())
            .entity(book())
            .entity(entity)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField { field, .. } if field == "isbn"));
    }

    #[test]
    fn test_foreign_key_type_mismatch() {
        let entity = Entity::new("quote")
            .with_field(Field::integer("id").primary_key())
            .with_field(Field::varchar("author_name").references("author", "id"));
        let err = Schema::builder().entity(author()).entity(entity).build().unwrap_err();
        assert!(matches!(err, SchemaError::ForeignKeyTypeMismatch { .. }));
        assert!(err.to_string().contains("quote.author_name"));
    }

    #[test]
    fn test_relationship_unknown_join_column() {
        let err = Schema::builder()
            .entity(author())
            .entity(book())
            .relationship(Relationship::one_to_many("author", "book", "writer_id"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                entity: "book".to_string(),
                field: "writer_id".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_accessor() {
        let err = Schema::builder()
            .entity(author())
            .entity(book())
            .relationship(
                Relationship::one_to_many("author", "book", "author_id").named("books", "author"),
            )
            .relationship(
                Relationship::one_to_many("author", "book", "author_id").named("books", "writer"),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateAccessor {
                entity: "author".to_string(),
                accessor: "books".to_string()
            }
        );
    }

    #[test]
    fn test_accessor_clashing_with_field() {
        let err = Schema::builder()
            .entity(author())
            .entity(book())
            .relationship(
                Relationship::one_to_many("author", "book", "author_id").named("name", "author"),
            )
            .build()
            .unwrap_err();
        assert!(
            matches!(err, SchemaError::DuplicateAccessor { accessor, .. } if accessor == "name")
        );
    }

    #[test]
    fn test_many_to_many_through_join_entity() {
        let tagging = Entity::new("tagging")
            .with_field(Field::integer("book_id").primary_key().references("book", "id"))
            .with_field(Field::integer("tag_id").primary_key().references("tag", "id"));
        let tag = Entity::new("tag").with_field(Field::integer("id").primary_key());

        let schema = Schema::builder()
            .entity(author())
            .entity(book())
            .entity(tag)
            .entity(tagging)
            .relationship(
                Relationship::many_to_many("book", "tag", "tagging", "book_id", "tag_id")
                    .named("tags", "books"),
            )
            .build()
            .expect("valid schema");

        let rel = schema.relationships_of("tag").next().unwrap();
        assert_eq!(rel.cardinality(), Cardinality::ManyToMany);
        assert!(rel.is_enforced());
        assert_eq!(schema.entity("tagging").unwrap().primary_key().len(), 2);
    }
}
