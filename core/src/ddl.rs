//! `create table` generation.

use crate::column::ColumnDescriptor;
use crate::entity::EntityDescriptor;
use crate::value::quote;

/// The parts of an entity needed to create its table, independent of the
/// record type.
pub trait TableSchema {
    fn table_name(&self) -> &str;

    /// `create table if not exists {table} ({columns}[, primary key(...)])`
    fn create_table_sql(&self) -> String;
}

impl<D> TableSchema for EntityDescriptor<D> {
    fn table_name(&self) -> &str {
        EntityDescriptor::table_name(self)
    }

    fn create_table_sql(&self) -> String {
        let mut definitions: Vec<String> = self.columns().iter().map(column_definition).collect();
        let primary_key = self.primary_key();
        if !primary_key.is_empty() {
            definitions.push(primary_key.to_string());
        }
        format!(
            "create table if not exists {} ({})",
            EntityDescriptor::table_name(self),
            definitions.join(", ")
        )
    }
}

/// `{name} {keyword}[ not null][ default '{literal}']`
///
/// Uniqueness is tracked on the descriptor but not rendered.
fn column_definition(column: &ColumnDescriptor) -> String {
    let mut definition = format!("{} {}", column.name(), column.kind().keyword());
    if !column.is_nullable() {
        definition.push_str(" not null");
    }
    if let Some(default) = column.default_literal() {
        definition.push_str(" default ");
        definition.push_str(&quote(default));
    }
    definition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::derive_entity;
    use crate::schema::tests::person_description;

    #[test]
    fn person_table() {
        let entity = derive_entity(person_description()).unwrap();
        assert_eq!(
            entity.create_table_sql(),
            "create table if not exists persontable \
             (id integer not null, name text not null, age integer, primary key(id))"
        );
    }

    #[test]
    fn unique_columns_render_without_a_constraint() {
        let mut description = person_description();
        description.fields[0].config.primary_key = false;
        description.fields[1].config.default_value = Some("O'Neil".to_string());
        let entity = derive_entity(description).unwrap();
        assert_eq!(
            entity.create_table_sql(),
            "create table if not exists persontable \
             (id integer not null, name text not null default 'O''Neil', age integer)"
        );
        assert!(entity.column("id").unwrap().is_unique());
    }

    #[test]
    fn table_schema_is_object_safe() {
        let entity = derive_entity(person_description()).unwrap();
        let tables: [&dyn TableSchema; 1] = [&entity];
        assert_eq!(tables[0].table_name(), "persontable");
    }
}
