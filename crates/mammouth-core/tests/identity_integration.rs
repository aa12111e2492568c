//! Identity flows driven through the controller with scripted providers.

use std::sync::Arc;

use mammouth_core::identity::provider::SignInScript;
use mammouth_core::identity::{ClientInfo, WalletInfo};
use mammouth_core::{
    Config, EnvHint, HostContext, MemoryStore, MiniApp, StaticPlatformSdk, StaticWallet,
    UserOutcome, UserProfile, WalletOutcome,
};

fn host_user() -> UserProfile {
    UserProfile {
        fid: Some(3621),
        username: Some("mammouth".into()),
        display_name: Some("Mammouth".into()),
    }
}

#[tokio::test]
async fn host_wallet_preferred_over_browser() {
    let sdk = StaticPlatformSdk::with_context(HostContext {
        wallet: Some(WalletInfo {
            address: Some("0xHOST000000000000000000000000000000000001".into()),
        }),
        ..HostContext::default()
    });
    let mut app = MiniApp::open(MemoryStore::new(), &Config::default())
        .with_platform_sdk(Arc::new(sdk))
        .with_browser_wallet(Arc::new(StaticWallet::with_accounts(["0xBROWSER"])));

    let outcome = app.connect_wallet().await.unwrap();
    assert!(matches!(outcome, WalletOutcome::Connected { ref source, .. } if source == "host-context-wallet"));
    assert_eq!(app.wallet_view().text, "Connected: 0xHOST...0001");
}

#[tokio::test]
async fn second_connection_overwrites_wallet() {
    let mut app = MiniApp::open(MemoryStore::new(), &Config::default())
        .with_browser_wallet(Arc::new(StaticWallet::with_accounts(["0xfirst"])));
    app.connect_wallet().await.unwrap();

    let mut app = MiniApp::open(app.store().kv().clone(), &Config::default())
        .with_browser_wallet(Arc::new(StaticWallet::with_accounts(["0xsecond"])));
    assert_eq!(app.state().wallet_address.as_deref(), Some("0xfirst"));
    app.connect_wallet().await.unwrap();
    assert_eq!(app.state().wallet_address.as_deref(), Some("0xsecond"));
}

#[tokio::test]
async fn browser_disabled_by_config() {
    let mut config = Config::default();
    config.set_value("identity.browser_wallet_enabled", "false").unwrap();
    let mut app = MiniApp::open(MemoryStore::new(), &config)
        .with_browser_wallet(Arc::new(StaticWallet::with_accounts(["0xa"])));

    assert_eq!(app.connect_wallet().await.unwrap(), WalletOutcome::NoWalletAvailable);
    assert!(app.state().wallet_address.is_none());
}

#[tokio::test]
async fn sign_in_flow_adopts_user() {
    let sdk = Arc::new(
        StaticPlatformSdk::with_context(HostContext {
            client: Some(ClientInfo {
                name: Some("Warpcast".into()),
                safe_area_insets: Some(serde_json::json!({"top": 0, "bottom": 34})),
            }),
            ..HostContext::default()
        })
        .with_sign_in(SignInScript {
            user: Some(host_user()),
            ..SignInScript::default()
        }),
    );
    let mut app = MiniApp::open(MemoryStore::new(), &Config::default()).with_platform_sdk(sdk.clone());

    let outcome = app.connect_user().await;
    assert_eq!(outcome.profile(), Some(&host_user()));
    assert_eq!(sdk.nonces().len(), 1);

    let view = app.user_view().unwrap();
    assert_eq!(view.name, "Mammouth");
    assert_eq!(view.id_text, "fid: 3621");
    assert!(app
        .log()
        .messages()
        .iter()
        .any(|m| m.starts_with("Sign-in raw result:")));

    let hint = app.env_hint().await;
    assert!(matches!(hint, EnvHint::Client { ref name, .. } if name == "Warpcast"));
}

#[tokio::test]
async fn failed_context_read_reports_failure() {
    let mut app = MiniApp::open(MemoryStore::new(), &Config::default())
        .with_platform_sdk(Arc::new(StaticPlatformSdk::failing("bridge timeout")));

    let outcome = app.connect_user().await;
    assert!(matches!(outcome, UserOutcome::Failed { .. }));
    assert!(app.user().is_none());
    assert_eq!(app.env_hint().await, EnvHint::ContextFailed);
}
