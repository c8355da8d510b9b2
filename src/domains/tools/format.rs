//! Text rendering of warehouse results.
//!
//! Pure functions, one per tool. Input order is preserved; nothing is sorted.

use std::fmt::Write;

use crate::core::warehouse::{DryRunStatus, SchemaField};

/// `Allowed datasets: a, b`
pub fn allowed_datasets(datasets: &[String]) -> String {
    format!("Allowed datasets: {}", datasets.join(", "))
}

/// Header followed by one `- <table>` line per table.
pub fn table_list(dataset: &str, tables: &[String]) -> String {
    let mut out = format!("Tables in dataset `{}`:\n\n", dataset);
    for table in tables {
        let _ = writeln!(out, "- {}", table);
    }
    out
}

/// Header followed by one block per field, each ending in a blank line.
pub fn table_schema(dataset: &str, table: &str, fields: &[SchemaField]) -> String {
    let mut out = format!("Schema for table {} in dataset {}:\n\n", table, dataset);
    for field in fields {
        out.push_str(&schema_field(field));
    }
    out
}

/// Render a single field block.
pub fn schema_field(field: &SchemaField) -> String {
    let mut out = format!("- {} ({})\n", field.name, field.field_type);
    if let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  Description: {}", description);
    }
    if field.repeated {
        out.push_str("  Repeated: true\n");
    }
    if field.required {
        out.push_str("  Required: true\n");
    }
    out.push('\n');
    out
}

/// Two-line dry-run summary.
pub fn dry_run(status: &DryRunStatus) -> String {
    format!(
        "Errors: {:?}\nTotal bytes processed: {}",
        status.errors, status.total_bytes_processed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_datasets_in_configured_order() {
        let datasets = vec!["sales".to_string(), "marketing".to_string()];
        assert_eq!(
            allowed_datasets(&datasets),
            "Allowed datasets: sales, marketing"
        );
    }

    #[test]
    fn test_table_list_keeps_adapter_order() {
        let tables = vec!["zeta".to_string(), "alpha".to_string()];
        assert_eq!(
            table_list("sales", &tables),
            "Tables in dataset `sales`:\n\n- zeta\n- alpha\n"
        );
    }

    #[test]
    fn test_empty_table_list_renders_header_only() {
        assert_eq!(table_list("sales", &[]), "Tables in dataset `sales`:\n\n");
    }

    #[test]
    fn test_required_field_without_description() {
        let field = SchemaField {
            name: "id".to_string(),
            field_type: "INTEGER".to_string(),
            description: Some(String::new()),
            repeated: false,
            required: true,
        };
        assert_eq!(schema_field(&field), "- id (INTEGER)\n  Required: true\n\n");
    }

    #[test]
    fn test_field_with_all_annotations() {
        let field = SchemaField::new("tags", "STRING")
            .with_description("Free-form labels")
            .repeated()
            .required();
        assert_eq!(
            schema_field(&field),
            "- tags (STRING)\n  Description: Free-form labels\n  Repeated: true\n  Required: true\n\n"
        );
    }

    #[test]
    fn test_table_schema() {
        let fields = vec![
            SchemaField::new("id", "INTEGER").required(),
            SchemaField::new("name", "STRING"),
        ];
        assert_eq!(
            table_schema("sales", "orders", &fields),
            "Schema for table orders in dataset sales:\n\n\
             - id (INTEGER)\n  Required: true\n\n\
             - name (STRING)\n\n"
        );
    }

    #[test]
    fn test_dry_run_without_errors() {
        assert_eq!(
            dry_run(&DryRunStatus::default()),
            "Errors: []\nTotal bytes processed: 0"
        );
    }

    #[test]
    fn test_dry_run_with_errors() {
        let status = DryRunStatus {
            errors: vec!["invalidQuery: Unrecognized name: foo".to_string()],
            total_bytes_processed: 2048,
        };
        assert_eq!(
            dry_run(&status),
            "Errors: [\"invalidQuery: Unrecognized name: foo\"]\nTotal bytes processed: 2048"
        );
    }
}
