//! Query overrides flowing from the command line and config into the buffer

use codebuffer::cli::SourceArgs;
use codebuffer::config::AppConfig;
use codebuffer::startup::build_model;
use codebuffer::syntax::{highlight_id_for_name, GrammarSource};

fn write_query(dir: &std::path::Path, query: &str) {
    std::fs::write(dir.join("xml.scm"), query).unwrap();
}

#[test]
fn test_cli_syntax_path_overrides_builtin_query() {
    let dir = tempfile::tempdir().unwrap();
    write_query(dir.path(), "(Comment) @comment\n");

    let args = SourceArgs {
        syntax_path: vec![dir.path().to_path_buf()],
        ..Default::default()
    };
    let startup = args.resolve(&AppConfig::default(), None);
    let model = build_model(&startup, AppConfig::default()).unwrap();

    let grammar = model.buffer().grammar().unwrap();
    assert_eq!(grammar.source(), &GrammarSource::File(dir.path().join("xml.scm")));

    // Only comments are highlighted now
    let comment = highlight_id_for_name("comment").unwrap();
    assert!(model.buffer().line_tokens(2).is_empty());
    assert!(model
        .buffer()
        .line_tokens(1)
        .iter()
        .all(|t| t.highlight == comment));
}

#[test]
fn test_cli_path_beats_config_path() {
    let from_config = tempfile::tempdir().unwrap();
    let from_cli = tempfile::tempdir().unwrap();
    write_query(from_config.path(), "(Comment) @comment\n");
    write_query(from_cli.path(), "(Comment) @comment\n(STag) @tag\n");

    let config = AppConfig {
        syntax_paths: vec![from_config.path().to_path_buf()],
        ..AppConfig::default()
    };
    let args = SourceArgs {
        syntax_path: vec![from_cli.path().to_path_buf()],
        ..Default::default()
    };
    let startup = args.resolve(&config, None);
    let model = build_model(&startup, config).unwrap();

    assert_eq!(
        model.buffer().grammar().unwrap().source(),
        &GrammarSource::File(from_cli.path().join("xml.scm"))
    );
}

#[test]
fn test_user_dir_is_lowest_priority() {
    let user = tempfile::tempdir().unwrap();
    let from_config = tempfile::tempdir().unwrap();
    write_query(user.path(), "(Comment) @comment\n");
    write_query(from_config.path(), "(Comment) @comment\n");

    let config = AppConfig {
        syntax_paths: vec![from_config.path().to_path_buf()],
        ..AppConfig::default()
    };
    let startup = SourceArgs::default().resolve(&config, Some(user.path().to_path_buf()));
    let model = build_model(&startup, config).unwrap();

    assert_eq!(
        model.buffer().grammar().unwrap().source(),
        &GrammarSource::File(from_config.path().join("xml.scm"))
    );
}

#[test]
fn test_broken_override_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_query(dir.path(), "(NoSuchNode) @tag\n");

    let args = SourceArgs {
        syntax_path: vec![dir.path().to_path_buf()],
        ..Default::default()
    };
    let startup = args.resolve(&AppConfig::default(), None);
    let err = build_model(&startup, AppConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid highlight query for XML"));
}
