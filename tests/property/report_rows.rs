//! Every record is written as one fixed-width row, in input order.

use gitops::capi::format::{write_rows, OutputFormat, Row};
use gitops::capi::{Template, TemplateParameter};
use proptest::prelude::*;

// Free text as a catalog may send it, tabs and line breaks included.
fn cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.\t\r\n-]{0,16}"
}

fn template() -> impl Strategy<Value = Template> {
    (cell(), cell(), cell()).prop_map(|(name, provider, description)| Template {
        name,
        description,
        provider,
    })
}

fn parameter() -> impl Strategy<Value = TemplateParameter> {
    (
        cell(),
        cell(),
        any::<bool>(),
        proptest::option::of(proptest::collection::vec(cell(), 0..4)),
    )
        .prop_map(|(name, description, required, options)| TemplateParameter {
            name,
            description,
            required,
            options,
        })
}

fn render_text<T: Row>(rows: &[T]) -> String {
    let mut out = Vec::new();
    write_rows(&mut out, rows, OutputFormat::Text, "empty").unwrap();
    String::from_utf8(out).unwrap()
}

fn tab_count(line: &str) -> usize {
    line.matches('\t').count()
}

proptest! {
    #[test]
    fn template_rows_keep_order_and_width(templates in proptest::collection::vec(template(), 1..12)) {
        let output = render_text(&templates);
        let lines: Vec<&str> = output.lines().collect();

        prop_assert_eq!(lines.len(), templates.len() + 1);
        prop_assert_eq!(lines[0], "NAME\tPROVIDER\tDESCRIPTION");
        for (line, template) in lines[1..].iter().zip(&templates) {
            prop_assert_eq!(tab_count(line), Template::HEADER.len() - 1);
            let expected_prefix = format!("{}\t", template.name.replace(['\t', '\r', '\n'], " "));
            prop_assert!(line.starts_with(&expected_prefix));
        }
    }

    #[test]
    fn parameter_rows_always_have_every_column(parameters in proptest::collection::vec(parameter(), 1..12)) {
        let output = render_text(&parameters);
        let lines: Vec<&str> = output.lines().collect();

        prop_assert_eq!(lines.len(), parameters.len() + 1);
        let header_tabs = tab_count(lines[0]);
        for line in &lines[1..] {
            prop_assert_eq!(tab_count(line), header_tabs);
        }
    }

    #[test]
    fn json_output_preserves_records(templates in proptest::collection::vec(template(), 0..8)) {
        let mut out = Vec::new();
        write_rows(&mut out, &templates, OutputFormat::Json, "empty").unwrap();
        let parsed: Vec<Template> = serde_json::from_slice(&out).unwrap();
        prop_assert_eq!(parsed, templates);
    }
}
