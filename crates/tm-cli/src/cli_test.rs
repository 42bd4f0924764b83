use super::*;
use clap::CommandFactory;

#[test]
fn test_verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_up_with_stages_and_name() {
    let cli = Cli::try_parse_from(["tidemark", "up", "up", "seed", "-n", "add-users"]).unwrap();
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.stages, vec!["up", "seed"]);
            assert_eq!(args.name.as_deref(), Some("add-users"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tidemark",
        "down",
        "--database",
        ":memory:",
        "--dir",
        "db/migrations",
        "--no-color",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.global.database.as_deref(), Some(":memory:"));
    assert_eq!(cli.global.dir.as_deref(), Some("db/migrations"));
    assert!(cli.global.no_color);
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, PathBuf::from("."));
}

#[test]
fn test_new_requires_a_name() {
    assert!(Cli::try_parse_from(["tidemark", "new"]).is_err());
}
