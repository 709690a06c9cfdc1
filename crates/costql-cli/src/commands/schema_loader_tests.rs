use std::fs;
use std::path::Path;

use costql_lib::EnvironmentConfig;
use indoc::indoc;

use super::schema_loader::{SourceFile, build_environment, is_schema_file, load_request, load_schema_sources};

#[test]
fn schema_extensions() {
    assert!(is_schema_file(Path::new("a/schema.graphql")));
    assert!(is_schema_file(Path::new("schema.graphqls")));
    assert!(!is_schema_file(Path::new("schema.gql.txt")));
    assert!(!is_schema_file(Path::new("README")));
}

#[test]
fn directory_files_are_sorted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.graphqls"), "extend type Query { b: Int }").unwrap();
    fs::write(dir.path().join("a.graphql"), "type Query { a: Int }").unwrap();
    fs::write(dir.path().join("notes.md"), "# not a schema").unwrap();

    let sources = load_schema_sources(dir.path()).unwrap();
    let names: Vec<String> = sources
        .iter()
        .map(|s| Path::new(&s.name).file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.graphql", "b.graphqls"]);

    let env = build_environment(&sources, true, EnvironmentConfig::default(), false).unwrap();
    let query = env.query_type().unwrap();
    assert!(query.has_field("a") && query.has_field("b"));
}

#[test]
fn empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_schema_sources(dir.path()).unwrap_err();
    assert!(err.starts_with("no .graphql or .graphqls files found"), "{err}");
}

#[test]
fn missing_file() {
    let err = load_schema_sources(Path::new("does/not/exist.graphql")).unwrap_err();
    assert!(err.starts_with("failed to read 'does/not/exist.graphql'"), "{err}");
}

#[test]
fn inline_request_wins() {
    let request = load_request(None, Some("{ a }")).unwrap();
    assert_eq!(request, SourceFile::new("<request>", "{ a }"));

    assert!(load_request(None, None).is_err());
}

#[test]
fn schema_may_declare_directives() {
    let sdl = format!("{}\n{}", costql_lib::DIRECTIVES_SDL, "type Query { a: Int @costqlFree }");
    let sources = [SourceFile::new("schema.graphql", sdl)];

    // Declared twice once the built-in definitions are added; both must build.
    assert!(build_environment(&sources, true, EnvironmentConfig::default(), false).is_ok());
    assert!(build_environment(&sources, false, EnvironmentConfig::default(), false).is_ok());
}

#[test]
fn build_errors_are_rendered() {
    let sources = [SourceFile::new(
        "schema.graphql",
        indoc! {r#"
            type Query { a: A }
        "#},
    )];
    let err = build_environment(&sources, false, EnvironmentConfig::default(), false).unwrap_err();
    insta::assert_snapshot!(err.trim_end(), @"error: unknown type `A` referenced by `Query.a`");
}

#[test]
fn syntax_errors_name_their_file() {
    let sources = [
        SourceFile::new("ok.graphql", "type Query { a: Int }"),
        SourceFile::new("broken.graphql", "type Broken {"),
    ];
    let err = build_environment(&sources, true, EnvironmentConfig::default(), false).unwrap_err();
    assert!(err.contains("broken.graphql"), "{err}");
    assert!(!err.contains("ok.graphql"), "{err}");
}
