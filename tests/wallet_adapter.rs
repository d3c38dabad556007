use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use unicoin_bridge::models::status::{CONNECT_HINT, CONNECT_PROMPT, FILL_FORM};
use unicoin_bridge::{BridgeError, JsonRpcProvider, WalletAdapter, WalletProvider, WalletState};

/// Provider whose answers and notifications are driven by the test.
struct ScriptedProvider {
    accounts: Mutex<Result<Vec<String>, BridgeError>>,
    changes: broadcast::Sender<Vec<String>>,
}

impl ScriptedProvider {
    fn new(accounts: Result<Vec<String>, BridgeError>) -> Arc<Self> {
        let (changes, _) = broadcast::channel(8);
        Arc::new(Self {
            accounts: Mutex::new(accounts),
            changes,
        })
    }

    fn with_accounts(accounts: &[&str]) -> Arc<Self> {
        Self::new(Ok(accounts.iter().map(|a| a.to_string()).collect()))
    }

    fn notify(&self, accounts: &[&str]) {
        self.changes
            .send(accounts.iter().map(|a| a.to_string()).collect())
            .unwrap();
    }
}

#[async_trait]
impl WalletProvider for ScriptedProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.accounts.lock().unwrap().clone()
    }

    async fn accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.accounts.lock().unwrap().clone()
    }

    fn account_changes(&self) -> broadcast::Receiver<Vec<String>> {
        self.changes.subscribe()
    }
}

#[tokio::test]
async fn connect_returns_first_account() {
    let adapter = WalletAdapter::with_provider(ScriptedProvider::with_accounts(&["0x1", "0x2"]));

    let state = adapter.connect().await;

    assert_eq!(state.address, "0x1");
    assert_eq!(state.status.text(), CONNECT_PROMPT);
}

#[tokio::test]
async fn rejected_connect_embeds_error_message() {
    let provider = ScriptedProvider::new(Err(BridgeError::Provider(
        "User rejected the request.".into(),
    )));
    let adapter = WalletAdapter::with_provider(provider);

    for state in [adapter.connect().await, adapter.current_account().await] {
        assert_eq!(state.address, "");
        assert_eq!(state.status.text(), "😥 User rejected the request.");
    }
}

#[tokio::test]
async fn current_account_asks_to_fill_form() {
    let adapter = WalletAdapter::with_provider(ScriptedProvider::with_accounts(&["0xabc"]));

    let state = adapter.current_account().await;

    assert_eq!(state.address, "0xabc");
    assert_eq!(state.status.text(), FILL_FORM);
}

#[tokio::test]
async fn current_account_without_authorisation_asks_to_connect() {
    let adapter = WalletAdapter::with_provider(ScriptedProvider::with_accounts(&[]));

    let state = adapter.current_account().await;

    assert_eq!(state, WalletState::disconnected(CONNECT_HINT.into()));
}

#[tokio::test]
async fn subscription_follows_account_changes() {
    let provider = ScriptedProvider::with_accounts(&["0x1"]);
    let adapter = WalletAdapter::with_provider(provider.clone());
    let initial = adapter.current_account().await;

    let mut subscription = adapter.watch_accounts(initial);
    assert_eq!(subscription.state().address, "0x1");

    provider.notify(&["0x2", "0x3"]);
    let state = subscription.changed().await.unwrap();
    assert_eq!(state.address, "0x2");
    assert_eq!(state.status.text(), CONNECT_PROMPT);

    provider.notify(&[]);
    let state = subscription.changed().await.unwrap();
    assert!(!state.is_connected());
    assert_eq!(state.status.text(), CONNECT_HINT);
}

#[tokio::test]
async fn unsubscribe_stops_listening() {
    let provider = ScriptedProvider::with_accounts(&["0x1"]);
    let adapter = WalletAdapter::with_provider(provider.clone());

    let subscription = adapter.watch_accounts(WalletState::default());
    assert!(subscription.is_active());
    assert_eq!(provider.changes.receiver_count(), 1);

    subscription.unsubscribe().await;
    assert_eq!(provider.changes.receiver_count(), 0);
}

#[tokio::test]
async fn dropping_subscription_stops_listening() {
    let provider = ScriptedProvider::with_accounts(&["0x1"]);
    let adapter = WalletAdapter::with_provider(provider.clone());

    let subscription = adapter.watch_accounts(WalletState::default());
    assert_eq!(provider.changes.receiver_count(), 1);

    drop(subscription);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(provider.changes.receiver_count(), 0);
    assert!(provider.changes.send(vec!["0x2".to_string()]).is_err());
}

/// Minimal JSON-RPC wallet: answers `eth_accounts` from shared state and
/// rejects `eth_requestAccounts` when `reject` is set.
#[derive(Default)]
struct RpcWallet {
    accounts: Mutex<Vec<String>>,
    reject: Mutex<bool>,
}

async fn rpc(wallet: web::Data<RpcWallet>, request: web::Json<Value>) -> HttpResponse {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    if method == "eth_requestAccounts" && *wallet.reject.lock().unwrap() {
        return HttpResponse::Ok().json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": 4001, "message": "User rejected the request."}
        }));
    }
    let accounts = wallet.accounts.lock().unwrap().clone();
    HttpResponse::Ok().json(json!({"jsonrpc": "2.0", "id": id, "result": accounts}))
}

fn serve_wallet(wallet: web::Data<RpcWallet>) -> String {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(wallet.clone())
            .route("/", web::post().to(rpc))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/", addr)
}

#[actix_web::test]
async fn json_rpc_provider_reads_accounts() {
    let wallet = web::Data::new(RpcWallet::default());
    *wallet.accounts.lock().unwrap() = vec!["0xfeed".to_string()];
    let provider = Arc::new(JsonRpcProvider::new(serve_wallet(wallet.clone())));
    let adapter = WalletAdapter::with_provider(provider);

    assert_eq!(adapter.connect().await.address, "0xfeed");
    assert_eq!(adapter.current_account().await.status.text(), FILL_FORM);

    *wallet.reject.lock().unwrap() = true;
    let state = adapter.connect().await;
    assert_eq!(state.address, "");
    assert_eq!(state.status.text(), "😥 User rejected the request.");
}

#[actix_web::test]
async fn unreachable_rpc_is_provider_error() {
    let provider = JsonRpcProvider::new("http://127.0.0.1:1/");
    let err = provider.accounts().await.unwrap_err();
    assert!(matches!(err, BridgeError::Provider(_)));
}

#[actix_web::test]
async fn poller_broadcasts_changed_accounts() {
    let wallet = web::Data::new(RpcWallet::default());
    *wallet.accounts.lock().unwrap() = vec!["0x1".to_string()];
    let provider = Arc::new(JsonRpcProvider::new(serve_wallet(wallet.clone())));
    let adapter = WalletAdapter::with_provider(provider.clone());

    let mut subscription = adapter.watch_accounts(adapter.current_account().await);
    let poller = provider.spawn_account_poller(Duration::from_millis(20));

    // let the poller take its baseline before switching accounts
    tokio::time::sleep(Duration::from_millis(100)).await;
    *wallet.accounts.lock().unwrap() = vec!["0x2".to_string()];

    let state = tokio::time::timeout(Duration::from_secs(5), subscription.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.address, "0x2");

    poller.abort();
}
