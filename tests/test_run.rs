mod helpers;

use anyhow::Result;
use clap::Parser;
use helpers::{TestServer, PASSWORD, USERNAME};
use memocards::application::CardRepository;
use memocards::cli::args::Args;
use memocards::domain::Column;
use memocards::infrastructure::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Parse a command line for `server`, logging in with `password`
fn args(server: &TestServer, config: &Path, password: &str, command: &[&str]) -> Args {
    let mut argv = vec![
        "memocards".to_string(),
        "--config".to_string(),
        config.display().to_string(),
        "--base-url".to_string(),
        server.base_url.clone(),
        "-u".to_string(),
        USERNAME.to_string(),
        "--password".to_string(),
        password.to_string(),
    ];
    argv.extend(command.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).unwrap()
}

fn config_file() -> Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("config.toml");
    Config::create_default(&path)?;
    Ok((temp_dir, path))
}

#[tokio::test]
async fn given_wrong_password_when_running_board_then_refused_at_login() -> Result<()> {
    // Arrange
    let server = TestServer::start().await?;
    let (_dir, config) = config_file()?;

    // Act
    let result = memocards::run(args(&server, &config, "wrong", &["board"])).await;

    // Assert
    let err = result.expect_err("board must not run without a session");
    assert!(err.to_string().contains("Login failed"), "got: {err}");
    Ok(())
}

#[tokio::test]
async fn given_valid_session_when_running_add_then_card_stored() -> Result<()> {
    // Arrange
    let server = TestServer::start().await?;
    let (_dir, config) = config_file()?;
    let command = ["add", "-q", "Largest ocean?", "-a", "Pacific", "--new-tag", "geo"];

    // Act
    memocards::run(args(&server, &config, PASSWORD, &command)).await?;

    // Assert
    let cards = server.store().list_cards().await?;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].tag, "geo");
    assert_eq!(cards[0].column, Column::ToLearn);
    Ok(())
}

#[tokio::test]
async fn given_store_refusing_writes_when_running_add_then_error_and_nothing_stored() -> Result<()> {
    // Arrange
    let server = TestServer::start().await?;
    let (_dir, config) = config_file()?;
    server.break_store_file()?;
    let command = ["add", "-q", "Largest ocean?", "-a", "Pacific", "-t", "geo"];

    // Act
    let result = memocards::run(args(&server, &config, PASSWORD, &command)).await;

    // Assert
    let err = result.expect_err("rolled back add must fail the command");
    assert!(err.to_string().contains("Card was not added"), "got: {err}");
    assert!(server.store().list_cards().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_seeded_card_when_running_move_then_column_persisted() -> Result<()> {
    // Arrange
    let server = TestServer::start().await?;
    let (_dir, config) = config_file()?;
    let card = server.seed("2 + 2?", "math", Column::Mastered).await?;
    let id = card.id.to_string();

    // Act
    memocards::run(args(&server, &config, PASSWORD, &["move", id.as_str(), "next"])).await?;

    // Assert
    let stored = server.store().get_card(card.id).await?;
    assert_eq!(stored.column, Column::ToLearn);
    Ok(())
}
