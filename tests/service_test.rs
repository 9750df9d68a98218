//! Tests for TreeService driven by parsed operation tokens

use avltree::application::services::{insert_all, TreeService, DEMO_VALUES};
use avltree::application::{parse_operations, ApplicationError, Operation};
use avltree::cli::{CliError, Commands};
use avltree::exitcode;

#[test]
fn given_demo_values_when_running_then_matches_reference_output() {
    let mut service = TreeService::new(false);
    let report = service.run(&insert_all(&DEMO_VALUES)).unwrap();

    assert_eq!(report.joined(" "), "10 20 25 30 40 50");
    assert_eq!(report.height, 2);
}

#[test]
fn given_token_script_when_running_then_applies_left_to_right() {
    let ops = parse_operations(["5", "+3", "8", "-5", "-42", "3"]).unwrap();
    let mut service = TreeService::new(true);

    let report = service.run(&ops).unwrap();

    assert_eq!(report.values, vec![3, 8]);
    assert_eq!(report.height, 1);
    assert_eq!(report.changed, 4);
    assert_eq!(report.skipped, 2);
}

#[test]
fn given_service_when_applying_single_operations_then_reports_change() {
    let mut service = TreeService::new(true);

    assert!(service.apply(Operation::Insert(1)).unwrap());
    assert!(!service.apply(Operation::Insert(1)).unwrap());
    assert!(service.apply(Operation::Remove(1)).unwrap());
    assert!(service.tree().is_empty());
    assert_eq!(service.report().height, -1);
}

#[test]
fn given_bad_token_when_parsing_then_cli_exit_code_is_usage() {
    let err = parse_operations(["1", "two"]).unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidOperation { ref token, .. } if token == "two"));

    let cli_err = CliError::from(err);
    assert_eq!(cli_err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_no_subcommand_when_executing_then_usage_error() {
    use clap::Parser;
    let cli = avltree::cli::Cli::try_parse_from(["avl"]).unwrap();
    assert!(cli.command.is_none());

    let err = avltree::cli::execute_command(&cli).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_run_without_ops_when_parsing_then_rejected() {
    use clap::Parser;
    let result = avltree::cli::Cli::try_parse_from(["avl", "run"]);
    assert!(result.is_err());

    let cli = avltree::cli::Cli::try_parse_from(["avl", "run", "--", "1", "--1"]).unwrap();
    match cli.command {
        Some(Commands::Run { ops, .. }) => {
            let parsed = parse_operations(&ops).unwrap();
            assert_eq!(parsed, vec![Operation::Insert(1), Operation::Remove(-1)]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
