/// Column as reported by the catalog, before key resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub name: String,
    /// Formatted catalog type (e.g. `double precision`).
    pub data_type: String,
    pub is_nullable: bool,
}

impl CatalogColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, is_nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_nullable,
        }
    }
}

/// Primary, unique or exclusion constraint backing the table's first index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyConstraint {
    /// Name of the backing index.
    pub name: String,
    /// Constraint definition text; absent for indexes without a constraint.
    pub definition: Option<String>,
}

/// Foreign key constraint exactly as the catalog renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    pub name: String,
    pub definition: String,
}

/// Raw catalog view of one table, filled step by step by the introspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    pub oid: u32,
    pub name: String,
    /// Columns in attribute-number order.
    pub columns: Vec<CatalogColumn>,
    pub primary_key: Option<PrimaryKeyConstraint>,
    pub foreign_keys: Vec<ForeignKeyConstraint>,
}

impl TableDescription {
    pub fn new(oid: u32, name: impl Into<String>) -> Self {
        Self {
            oid,
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }
}

/// Column with its key membership resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub is_primary: bool,
    pub is_foreign: bool,
}

/// Foreign key with the local column recovered from its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: String,
    pub definition: String,
    /// `None` when the definition did not match the expected grammar.
    pub column: Option<String>,
}

/// Fully resolved table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub oid: u32,
    pub name: String,
    /// Columns in catalog order; every artifact follows this order.
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKeyConstraint>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// The column flagged as primary key, if any.
    pub fn primary_column(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.is_primary)
    }

    /// Columns supplied by the caller on insert, in catalog order.
    pub fn insert_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| !column.is_primary)
    }
}
