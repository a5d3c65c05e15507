use anyhow::{Context, Result};
use memocards::application::CardRepository;
use memocards::domain::{Card, Column, NewCard};
use memocards::infrastructure::server;
use memocards::infrastructure::{HttpCardStore, JsonDb};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

/// Mock card store running on an ephemeral port with a temp data file
#[allow(dead_code)]
pub struct TestServer {
    _temp_dir: TempDir,
    pub base_url: String,
    pub db_path: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Start a store holding one user (admin/admin) and no cards
    pub async fn start() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let db_path = temp_dir.path().join("db.json");

        let mut db = JsonDb::open(&db_path)?;
        db.add_user(USERNAME, PASSWORD)?;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let address = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(server::run(listener, Arc::new(Mutex::new(db)), async move {
            let _ = rx.await;
        }));

        Ok(Self {
            _temp_dir: temp_dir,
            base_url: format!("http://{address}"),
            db_path,
            shutdown: Some(tx),
        })
    }

    pub fn store(&self) -> HttpCardStore {
        HttpCardStore::new(&self.base_url)
    }

    /// Create a card directly through the REST surface
    pub async fn seed(&self, question: &str, tag: &str, column: Column) -> Result<Card> {
        let card = NewCard {
            question: question.to_string(),
            answer: format!("answer to {question}"),
            description: String::new(),
            tag: tag.to_string(),
            column,
        };
        Ok(self.store().create_card(&card).await?)
    }

    /// Replace the store file with a directory so every later write fails
    pub fn break_store_file(&self) -> Result<()> {
        std::fs::remove_file(&self.db_path)?;
        std::fs::create_dir(&self.db_path)?;
        Ok(())
    }

    /// Raw contents of the store file
    pub fn file_contents(&self) -> Result<serde_json::Value> {
        let content = std::fs::read_to_string(&self.db_path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
