//! Command functions against schemas written to disk.

use autoinvent::{check, relation, resolve, CliError, OutputFormat};
use autoinvent_schema::load_schema;
use tempfile::TempDir;

fn write_models(dir: &TempDir) {
    std::fs::write(
        dir.path().join("01_user.yaml"),
        r#"
fields:
  id: {type: id, show_index: false, show_create: false, show_detail: false}
  name: {}
  posts:
    type: {type: one_to_many, target: post, backref: author}
"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("02_post.yaml"),
        r#"
name: post
display_field: title
fields:
  - name: id
    type: id
    show_index: false
  - name: title
  - name: author
    type: {type: many_to_one, target: user}
"#,
    )
    .unwrap();
}

#[tokio::test]
async fn resolve_reports_every_model() {
    let tmp = TempDir::new().unwrap();
    write_models(&tmp);

    let schema = load_schema(tmp.path()).await.unwrap();
    let reports = resolve::build_reports(&schema, None).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["01_user", "post"]);
    assert_eq!(reports[1].orders.query_list, ["id", "title", "author"]);

    let json = resolve::render(&reports, OutputFormat::Json).unwrap();
    assert!(json.contains("\"table_link_field\": \"title\""));
}

#[tokio::test]
async fn table_columns_follow_target_index_order() {
    let tmp = TempDir::new().unwrap();
    write_models(&tmp);

    let schema = load_schema(tmp.path()).await.unwrap();
    let columns = relation::relationship_columns(&schema, "01_user", "posts").unwrap();
    let names: Vec<_> = columns.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["title", "author"]);
}

#[tokio::test]
async fn check_flags_dangling_target() {
    let tmp = TempDir::new().unwrap();
    write_models(&tmp);
    // the user model is registered under its file stem, so `target: user` dangles
    let err = check::run_check(tmp.path()).await.unwrap_err();
    assert!(matches!(err, CliError::ProblemsFound { count: 1 }));
}

#[tokio::test]
async fn missing_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = check::run_check(&tmp.path().join("absent.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Schema(_)));
}
