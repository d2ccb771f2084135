use tablesmith_core::{Table, display_format};

use crate::layout::{ColumnNames, entity_name, header, label, label_width};

/// Render the entity struct of a table with `new` and `Display`.
pub fn render_entity(table: &Table) -> String {
    let name = entity_name(table);
    let width = label_width(table);
    let columns: Vec<ColumnNames> = table.columns.iter().map(ColumnNames::of).collect();

    let mut out = header(table);
    out.push('\n');
    out.push_str("use std::fmt;\n\n");

    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str(&format!("pub struct {name} {{\n"));
    for names in &columns {
        out.push_str(&format!(
            "    pub {} {},\n",
            label(&names.field, width),
            names.rust_type
        ));
    }
    out.push_str("}\n\n");

    let params: Vec<String> = columns
        .iter()
        .map(|names| format!("{}: {}", names.binding, names.rust_type))
        .collect();
    out.push_str(&format!("impl {name} {{\n"));
    out.push_str(&format!("    pub fn new({}) -> Self {{\n", params.join(", ")));
    out.push_str("        Self {\n");
    for names in &columns {
        out.push_str(&format!(
            "            {} {},\n",
            label(&names.field, width),
            names.binding
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl fmt::Display for {name} {{\n"));
    out.push_str("    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {\n");
    if table.columns.is_empty() {
        out.push_str(&format!("        f.write_str(\"{name}\")\n"));
    } else {
        let mut template = name.clone();
        for (column, names) in table.columns.iter().zip(&columns) {
            template.push_str(&format!(
                " {}({})",
                names.field,
                display_format(&column.data_type)
            ));
        }
        let args: Vec<String> = columns
            .iter()
            .map(|names| format!("self.{}", names.field))
            .collect();
        out.push_str("        write!(\n");
        out.push_str("            f,\n");
        out.push_str(&format!("            \"{template}\",\n"));
        out.push_str(&format!("            {}\n", args.join(", ")));
        out.push_str("        )\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}
