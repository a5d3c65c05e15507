// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use application::{
    guard, AuthGate, BoardController, CardRepository, Credentials, Mutation, Notices, Route,
};
use domain::{CardForm, CardId, TagFilter};
use infrastructure::{BrowserRenderer, Config, HttpCardStore, JsonDb};
use ports::{HtmlPresenter, TerminalPresenter};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(command = ?args.command, "Starting memocards");

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        debug!(%base_url, "Base URL overridden");
        config.server.base_url = base_url.clone();
    }

    match args.command.clone() {
        Command::Serve {
            port,
            db,
            seed_users,
        } => serve(&config, port, db, &seed_users).await,
        Command::InitConfig { path, force } => init_config(path, force),
        command => {
            let store = HttpCardStore::new(&config.server.base_url);
            let gate = open_session(store.clone(), credentials(&args)?).await?;

            let notices = Notices::new(config.notifications.dismiss_after());
            let mut board = BoardController::with_notices(store, notices);
            let result = execute(&mut board, command).await;

            gate.logout();
            result
        }
    }
}

fn credentials(args: &Args) -> Result<Credentials> {
    let username = args
        .username
        .clone()
        .context("Username required (--username or MEMOCARDS_USERNAME)")?;
    let password = args
        .password
        .clone()
        .context("Password required (--password or MEMOCARDS_PASSWORD)")?;
    Ok(Credentials::new(username, password))
}

/// Log in and make sure the guard lets us onto the board.
async fn open_session(
    store: HttpCardStore,
    credentials: Credentials,
) -> Result<AuthGate<HttpCardStore>> {
    let base_url = store.base_url().to_string();
    let gate = AuthGate::new(store);

    gate.login(&credentials).await;
    match guard(Route::Home, gate.state()) {
        Route::Home => Ok(gate),
        Route::Login => bail!(
            "Login failed for '{}'. Check the credentials and that the card store is reachable at {}",
            credentials.username,
            base_url
        ),
    }
}

async fn execute<R: CardRepository>(board: &mut BoardController<R>, command: Command) -> Result<()> {
    let presenter = TerminalPresenter::new();

    if !matches!(command, Command::View { .. }) {
        board.load().await.context("Failed to load cards")?;
    }

    match command {
        Command::Board { tag } => {
            if let Some(tag) = &tag {
                if !board.tags().contains(tag) {
                    warn!(%tag, "No card carries this tag");
                }
            }
            board.set_filter(TagFilter::from(tag));
            print!("{}", presenter.board(board));
        }
        Command::Tags => {
            println!("{}", presenter.tags(board.tags()));
        }
        Command::Add {
            question,
            answer,
            description,
            tag,
            new_tag,
            column,
        } => {
            let form = CardForm {
                question,
                answer,
                description,
                tag: tag.unwrap_or_default(),
                new_tag: new_tag.unwrap_or_default(),
                column,
            };
            let mutation = board.add(&form).await?;
            report(board, &presenter);
            match mutation {
                Mutation::Confirmed { card, .. } => println!("{}", presenter.card_line(&card)),
                Mutation::RolledBack { reason, .. } => bail!("Card was not added: {reason}"),
                Mutation::Pending { provisional } => bail!("Card {provisional} left pending"),
            }
        }
        Command::Edit {
            id,
            question,
            answer,
            description,
            tag,
            new_tag,
            column,
        } => {
            let id = CardId(id);
            let current = board
                .card(id)
                .ok_or(domain::DomainError::CardNotFound(id))?;
            let mut form = CardForm::from_card(current);
            if let Some(question) = question {
                form.question = question;
            }
            if let Some(answer) = answer {
                form.answer = answer;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(tag) = tag {
                form.tag = tag;
            }
            if let Some(new_tag) = new_tag {
                form.new_tag = new_tag;
            }
            if column.is_some() {
                form.column = column;
            }
            let result = board.update(id, &form).await;
            report(board, &presenter);
            let card = result?;
            println!("{}", presenter.card_line(&card));
        }
        Command::Delete { id } => {
            let result = board.delete(CardId(id)).await;
            report(board, &presenter);
            result?;
        }
        Command::Move { id, direction } => {
            let result = board.move_card(CardId(id), direction).await;
            report(board, &presenter);
            let card = result?;
            println!("{} -> {}", presenter.card_line(&card), card.column);
        }
        Command::View { id, json } => {
            let card = board.repository().get_card(CardId(id)).await?;
            if json {
                let output =
                    serde_json::to_string_pretty(&card).context("Failed to serialize card")?;
                println!("{}", output);
            } else {
                let html = HtmlPresenter::new().render(&card);
                let mut renderer = BrowserRenderer::new();
                let path = renderer.create_temp_file("card.html", &html)?;
                renderer.open_in_browser(&path)?;
            }
        }
        Command::Serve { .. } | Command::InitConfig { .. } => {
            bail!("This command does not run against the board")
        }
    }
    Ok(())
}

fn report<R: CardRepository>(board: &BoardController<R>, presenter: &TerminalPresenter) {
    if let Some(notice) = board.notices().current() {
        eprintln!("{}", presenter.notice(notice));
    }
}

async fn serve(
    config: &Config,
    port: Option<u16>,
    db_path: Option<PathBuf>,
    seed_users: &[String],
) -> Result<()> {
    let db_path = db_path.unwrap_or_else(|| config.serve.db_path.clone());
    let port = port.unwrap_or(config.serve.port);

    let mut db = JsonDb::open(&db_path)?;
    for entry in seed_users {
        let (username, password) = entry
            .split_once(':')
            .with_context(|| format!("Seed user '{entry}' must look like USER:PASSWORD"))?;
        if db.add_user(username, password)? {
            info!(username, "Seeded user");
        }
    }

    let address = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    println!("Card store listening on http://{address} (data: {})", db_path.display());

    infrastructure::server::run(
        listener,
        Arc::new(Mutex::new(db)),
        infrastructure::server::shutdown_signal(),
    )
    .await
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path().context("Could not find config directory")?,
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::create_default(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
