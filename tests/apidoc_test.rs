//! API doc generator invocation with a shell stand-in for the real generator.

mod common;

use assert2::{check, let_assert};
use common::{TempWorkspace, project, version};
use docsearch::{ApiDocBuild, ApiDocConfig, ApiDocError, Project, ProjectVersion};
use rstest::rstest;
use std::path::Path;

/// Generator that copies its config into `dir`, records the config path, then
/// exits with `code`.
fn recording_generator(dir: &Path, code: i32) -> ApiDocBuild {
    ApiDocBuild::new(
        "sh",
        vec![
            "-c".to_string(),
            concat!(
                r#"cp "$1" "$2/captured.json"; "#,
                r#"printf '%s' "$1" > "$2/path.txt"; "#,
                r#"echo failing >&2; exit "$3""#,
            )
            .to_string(),
            "generator".to_string(),
            "{config}".to_string(),
            dir.display().to_string(),
            code.to_string(),
        ],
    )
}

fn config(project: &Project, version: &ProjectVersion, root: &Path) -> ApiDocConfig {
    ApiDocConfig::for_version(
        project,
        version,
        root,
        root.join("src"),
        root.join("out"),
        root.join("cache"),
    )
    .unwrap()
}

#[rstest]
#[tokio::test]
async fn generator_receives_config(project: Project, version: ProjectVersion) {
    let workspace = TempWorkspace::new();
    let config = config(&project, &version, workspace.path());

    let_assert!(Ok(()) = recording_generator(workspace.path(), 0).run(&config).await);

    let captured: serde_json::Value =
        serde_json::from_str(&workspace.read_file("captured.json")).unwrap();
    check!(captured["repository"] == "acme/widgets");
    check!(captured["version"] == "main");
    check!(captured["output_dir"] == workspace.path().join("out").display().to_string());

    let config_path = workspace.read_file("path.txt");
    check!(!Path::new(&config_path).exists());
}

#[rstest]
#[tokio::test]
async fn failed_generator_still_removes_config(project: Project, version: ProjectVersion) {
    let workspace = TempWorkspace::new();
    let config = config(&project, &version, workspace.path());

    let result = recording_generator(workspace.path(), 3).run(&config).await;
    let_assert!(Err(ApiDocError::Failed { status, stderr, .. }) = result);
    check!(status.code() == Some(3));
    check!(stderr == "failing");

    let config_path = workspace.read_file("path.txt");
    check!(!config_path.is_empty());
    check!(!Path::new(&config_path).exists());
}

#[rstest]
#[tokio::test]
async fn missing_generator_is_spawn_error(project: Project, version: ProjectVersion) {
    let workspace = TempWorkspace::new();
    let config = config(&project, &version, workspace.path());
    let build = ApiDocBuild::new("docsearch-no-such-generator", vec!["{config}".to_string()]);

    let_assert!(Err(ApiDocError::Spawn { command, .. }) = build.run(&config).await);
    check!(command == "docsearch-no-such-generator");
}
