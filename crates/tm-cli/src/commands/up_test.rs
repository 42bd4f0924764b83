use super::*;
use crate::commands::common::ExitCode;
use crate::commands::testing::{capture, global, project, write_migration, POSTS, USERS};

#[test]
fn test_up_runs_default_stages_in_order() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);
    write_migration(dir.path(), "2-posts.sql", POSTS);

    let (result, output) = capture(|out| execute_to(&StageArgs::default(), &global(dir.path()), out));
    result.unwrap();
    assert_eq!(
        output,
        "Stage up:\n    users Migrated!\n    posts Migrated!\n\
         Stage script:\n    Nothing to migrate!\n\
         Stage seed:\n    users Migrated!\n"
    );
}

#[test]
fn test_up_twice_has_nothing_to_do() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);
    let args = StageArgs {
        stages: vec!["up".to_string()],
        name: None,
    };

    capture(|out| execute_to(&args, &global(dir.path()), out)).0.unwrap();
    let (result, output) = capture(|out| execute_to(&args, &global(dir.path()), out));
    result.unwrap();
    assert_eq!(output, "Stage up:\n    Nothing to migrate!\n");
}

#[test]
fn test_up_with_name_filter() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);
    write_migration(dir.path(), "2-posts.sql", POSTS);
    let args = StageArgs {
        stages: vec!["up".to_string()],
        name: Some("2-posts.sql".to_string()),
    };

    let (result, output) = capture(|out| execute_to(&args, &global(dir.path()), out));
    result.unwrap();
    assert_eq!(output, "Stage up:\n    posts Migrated!\n");
}

#[test]
fn test_up_stops_at_first_failing_stage() {
    let dir = project();
    write_migration(
        dir.path(),
        "1-broken.sql",
        "--{ up: up }\nCREATE TABLE (;\n--{ up: seed }\nSELECT 1;",
    );
    let args = StageArgs {
        stages: vec!["up".to_string(), "seed".to_string()],
        name: None,
    };

    let (result, output) = capture(|out| execute_to(&args, &global(dir.path()), out));
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<ExitCode>().is_some());
    assert!(output.starts_with("Stage up:\n    FAIL! [M005] [broken] (UP up): "));
    assert!(!output.contains("Stage seed:"));
}

#[test]
fn test_up_without_database_is_precondition_error() {
    let dir = crate::commands::testing::project_with_config("table: migrations\n");
    write_migration(dir.path(), "1-users.sql", USERS);

    let (result, output) = capture(|out| execute_to(&StageArgs::default(), &global(dir.path()), out));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("No database configured"));
    assert!(output.is_empty());
}

#[test]
fn test_up_missing_migrations_dir() {
    let dir = project();
    let mut args = global(dir.path());
    args.dir = Some("missing".to_string());

    let (result, _) = capture(|out| execute_to(&StageArgs::default(), &args, out));
    assert!(format!("{:#}", result.unwrap_err()).contains("C003"));
}

#[test]
fn test_up_rejects_invalid_stage_argument() {
    let dir = project();
    let args = StageArgs {
        stages: vec!["bad stage".to_string()],
        name: None,
    };
    let (result, _) = capture(|out| execute_to(&args, &global(dir.path()), out));
    assert!(result.is_err());
}
