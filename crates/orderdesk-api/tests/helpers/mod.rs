//! Test helpers: build AppState and router with injected collaborators.
//!
//! The store and mail transport are in-memory doubles wired through the same
//! seams production uses, so no database or SMTP server is needed.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use orderdesk_api::services::email::{Mailer, OutboundEmail};
use orderdesk_api::services::notifications::OrderNotifier;
use orderdesk_api::setup::routes::setup_routes;
use orderdesk_api::state::AppState;
use orderdesk_core::models::{NewOrder, Order};
use orderdesk_core::{AppError, Config, DatabaseSettings};
use orderdesk_db::OrderStore;
use orderdesk_storage::LocalStorage;
use tempfile::TempDir;

/// In-memory order store. `set_failing` makes every insert error, to exercise
/// the store-failure path deterministically.
pub struct MemoryOrderStore {
    next_id: AtomicI64,
    pub orders: Mutex<Vec<Order>>,
    fail: AtomicBool,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            orders: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated store failure".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Order {
            id,
            name: order.name,
            email: order.email,
            phone: order.phone,
            project_description: order.project_description,
            image_paths: order.image_paths,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

/// Recording mail transport; optionally failing every send.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(email);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Email("simulated transport failure".to_string()));
        }
        Ok(())
    }
}

/// Test application: server plus handles on the injected doubles.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryOrderStore>,
    pub mailer: Arc<RecordingMailer>,
    pub uploads_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of files currently present in the uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        match std::fs::read_dir(&self.uploads_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Setup test app with isolated storage root and in-memory collaborators.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let uploads_dir = temp_dir.path().join("uploads");

    let config = test_config(&uploads_dir);

    let storage = Arc::new(
        LocalStorage::new(&config.uploads_dir, "/uploads")
            .await
            .expect("Failed to create local storage"),
    );
    let store = Arc::new(MemoryOrderStore::new());
    let mailer = Arc::new(RecordingMailer::new());
    let notifier = OrderNotifier::new(
        mailer.clone(),
        "owner@example.com".to_string(),
        config.public_base_url.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        orders: store.clone(),
        storage,
        notifier: Some(notifier),
    });

    let router = setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        store,
        mailer,
        uploads_dir,
        _temp_dir: temp_dir,
    }
}

fn test_config(uploads_dir: &std::path::Path) -> Config {
    Config {
        database: DatabaseSettings::managed("postgres://localhost/orderdesk-test".to_string()),
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        db_max_connections: 5,
        db_timeout_seconds: 5,
        uploads_dir: uploads_dir.display().to_string(),
        public_base_url: "http://localhost:3001".to_string(),
        max_image_size_bytes: 8 * 1024 * 1024,
        smtp_host: None,
        smtp_port: None,
        smtp_user: None,
        smtp_password: None,
        smtp_from: None,
        smtp_tls: true,
        order_notify_email: Some("owner@example.com".to_string()),
        order_reply_to: None,
    }
}
