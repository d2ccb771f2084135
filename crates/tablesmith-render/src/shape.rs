use tablesmith_core::{Table, to_lower_camel};

use crate::layout::{ColumnNames, entity_name, header, label, label_width};

/// Name of the data-transfer struct for a table, e.g. `UsersJson`.
pub fn shape_name(table: &Table) -> String {
    format!("{}Json", entity_name(table))
}

/// Render the serde data-transfer struct of a table.
///
/// Fields follow catalog column order; each carries a rename to the
/// lower-camel column name.
pub fn render_shape(table: &Table) -> String {
    let name = shape_name(table);
    let width = label_width(table);

    let mut out = header(table);
    out.push('\n');
    out.push_str("use serde::{Deserialize, Serialize};\n\n");
    out.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {name} {{\n"));
    for column in &table.columns {
        let names = ColumnNames::of(column);
        out.push_str(&format!(
            "    #[serde(rename = \"{}\")]\n",
            to_lower_camel(&column.name)
        ));
        out.push_str(&format!(
            "    pub {} {},\n",
            label(&names.field, width),
            names.rust_type
        ));
    }
    out.push_str("}\n");
    out
}
