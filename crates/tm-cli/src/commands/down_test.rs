use super::*;
use crate::commands::testing::{capture, global, project, write_migration, POSTS, USERS};

fn up_all(dir: &std::path::Path) {
    let (result, _) = capture(|out| {
        crate::commands::up::execute_to(&StageArgs::default(), &global(dir), out)
    });
    result.unwrap();
}

#[test]
fn test_down_default_stages_run_in_reverse() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);
    write_migration(dir.path(), "2-posts.sql", POSTS);
    up_all(dir.path());

    let (result, output) =
        capture(|out| execute_to(&StageArgs::default(), &global(dir.path()), out));
    result.unwrap();
    assert_eq!(
        output,
        "Stage seed:\n    users Rolled back!\n\
         Stage script:\n    Nothing to rollback!\n\
         Stage up:\n    posts Rolled back!\n    users Rolled back!\n"
    );
}

#[test]
fn test_down_explicit_stage_keeps_order() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);
    up_all(dir.path());

    let args = StageArgs {
        stages: vec!["seed".to_string()],
        name: Some("users".to_string()),
    };
    let (result, output) = capture(|out| execute_to(&args, &global(dir.path()), out));
    result.unwrap();
    assert_eq!(output, "Stage seed:\n    users Rolled back!\n");
}

#[test]
fn test_down_with_nothing_applied() {
    let dir = project();
    write_migration(dir.path(), "1-users.sql", USERS);

    let args = StageArgs {
        stages: vec!["up".to_string()],
        name: None,
    };
    let (result, output) = capture(|out| execute_to(&args, &global(dir.path()), out));
    result.unwrap();
    assert_eq!(output, "Stage up:\n    Nothing to rollback!\n");
}
