use costql_lib::Environment;

use super::diagnostics::{render_error, render_request_error, render_syntax_error};
use super::schema_loader::SourceFile;

#[test]
fn plain_errors() {
    insta::assert_snapshot!(render_error(&"query cannot be empty").trim_end(), @"error: query cannot be empty");
}

#[test]
fn syntax_error_points_into_source() {
    let source = SourceFile::new("schema.graphql", "type Query {\n  a: Int\n  b:\n}\n");
    let error = costql_syntax::parse_schema(&source.text).unwrap_err();
    let rendered = render_syntax_error(&error, &source, false);

    assert!(rendered.starts_with("error: "), "{rendered}");
    assert!(rendered.contains(&error.message), "{rendered}");
    assert!(rendered.contains("schema.graphql:"), "{rendered}");
    assert!(rendered.contains("b:"), "{rendered}");
}

#[test]
fn error_at_end_of_input() {
    let source = SourceFile::new("<request>", "{ a");
    let error = costql_syntax::parse_executable(&source.text).unwrap_err();
    let rendered = render_syntax_error(&error, &source, false);

    assert!(rendered.contains("<request>:1:"), "{rendered}");
}

#[test]
fn request_errors() {
    let env = Environment::from_sdl("type Query { a: Int }").unwrap();

    let request = SourceFile::new("<request>", "{ b }");
    let error = env.invoice_str(&request.text).unwrap_err();
    insta::assert_snapshot!(
        render_request_error(&error, &request, false).trim_end(),
        @"error: type `Query` has no field `b`"
    );

    let request = SourceFile::new("query.graphql", "{ a ");
    let error = env.invoice_str(&request.text).unwrap_err();
    assert!(render_request_error(&error, &request, false).contains("query.graphql:"));
}
