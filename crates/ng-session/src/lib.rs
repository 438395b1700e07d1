//! Wallet session synchronizer.
//!
//! The external wallet-selector owns the real session and reports
//! changes through async events that are not fully trusted to cover
//! every transition. This crate mirrors that state into a synchronous
//! view the UI can read at any time, and offers `refresh` to re-derive
//! the view from the library directly.

use anyhow::Result;
use async_trait::async_trait;
use ng_api_types::SignInEvent;
use ng_chain_client::NearWallet;
use std::cell::RefCell;
use tracing::{debug, warn};

/// The locally-trusted view of wallet connection state.
///
/// `Connected` always carries an account id, so "account id present iff
/// connected" holds by construction — the UI cannot render one without
/// the other.
#[derive(Debug, Clone)]
pub enum WalletSession<W> {
    Disconnected,
    Connected { account_id: String, wallet: W },
}

impl<W> WalletSession<W> {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletSession::Connected { .. })
    }

    pub fn account_id(&self) -> Option<&str> {
        match self {
            WalletSession::Connected { account_id, .. } => Some(account_id),
            WalletSession::Disconnected => None,
        }
    }
}

/// Outcome of an explicit disconnect request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disconnect {
    /// Sign-out completed; local state is disconnected.
    SignedOut,
    /// Sign-out failed. Local state was forced to disconnected anyway,
    /// and the caller must perform a full page reload — the external
    /// library's internal state is assumed unrecoverable in-process.
    ForceReload,
}

/// The external selector and its connect modal, behind one typed seam.
#[async_trait(?Send)]
pub trait WalletConnector {
    type Wallet: NearWallet + Clone;

    /// The library's current wallet, if any.
    async fn live_wallet(&self) -> Result<Option<Self::Wallet>>;

    /// Open the interactive connect UI. Session state changes arrive
    /// later through the sign-in event, never from this call.
    fn open_connect_ui(&self);
}

/// Mirrors the selector's event-driven state into a synchronous view.
///
/// Handlers run non-preemptively between await points on a
/// single-threaded event loop; the latest committed state is
/// authoritative (last write wins, no ordering token).
pub struct SessionSync<C: WalletConnector> {
    connector: C,
    session: RefCell<WalletSession<C::Wallet>>,
}

impl<C: WalletConnector> SessionSync<C> {
    pub fn new(connector: C) -> SessionSync<C> {
        SessionSync {
            connector,
            session: RefCell::new(WalletSession::Disconnected),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> WalletSession<C::Wallet> {
        self.session.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.borrow().is_connected()
    }

    pub fn account_id(&self) -> Option<String> {
        self.session.borrow().account_id().map(str::to_owned)
    }

    pub fn wallet(&self) -> Option<C::Wallet> {
        match &*self.session.borrow() {
            WalletSession::Connected { wallet, .. } => Some(wallet.clone()),
            WalletSession::Disconnected => None,
        }
    }

    /// One-shot probe after construction: adopt a session the library
    /// restored on its own. Probe failure means "not connected", never
    /// an error — the sign-in event may still arrive later.
    pub async fn adopt_existing(&self) {
        match self.connector.live_wallet().await {
            Ok(Some(wallet)) => {
                if let Some(account_id) = wallet.account_id().filter(|id| !id.is_empty()) {
                    debug!("restored wallet session for {account_id}");
                    self.commit_connected(account_id, wallet);
                }
            }
            Ok(None) => debug!("no existing wallet session"),
            Err(error) => debug!("no existing wallet session: {error:#}"),
        }
    }

    /// `wallet:signIn` handler. The payload names the signed-in account;
    /// the live handle is re-queried from the library. Tolerates firing
    /// after, or instead of, the initialization probe.
    pub async fn on_sign_in(&self, event: &SignInEvent) {
        let wallet = match self.connector.live_wallet().await {
            Ok(Some(wallet)) => wallet,
            Ok(None) => {
                warn!("sign-in event but the selector reports no wallet");
                self.commit_disconnected();
                return;
            }
            Err(error) => {
                warn!("sign-in event but wallet lookup failed: {error:#}");
                self.commit_disconnected();
                return;
            }
        };

        // A payload without accounts falls back to the handle's own id.
        let account_id = event
            .primary_account_id()
            .map(str::to_owned)
            .or_else(|| wallet.account_id())
            .filter(|id| !id.is_empty());

        match account_id {
            Some(account_id) => {
                debug!("wallet signed in as {account_id}");
                self.commit_connected(account_id, wallet);
            }
            None => {
                warn!("sign-in event carried no account id");
                self.commit_disconnected();
            }
        }
    }

    /// `wallet:signOut` handler.
    pub fn on_sign_out(&self) {
        debug!("wallet signed out");
        self.commit_disconnected();
    }

    /// Open the connect modal. Mutates nothing; the sign-in event is the
    /// only path to connected state.
    pub fn request_connect(&self) {
        self.connector.open_connect_ui();
    }

    /// Explicit sign-out. Local state ends up disconnected on every
    /// path — the sign-out event alone is not relied on.
    pub async fn request_disconnect(&self) -> Disconnect {
        let Some(wallet) = self.wallet() else {
            return Disconnect::SignedOut;
        };

        let result = wallet.sign_out().await;
        self.commit_disconnected();

        match result {
            Ok(()) => Disconnect::SignedOut,
            Err(error) => {
                warn!("sign-out failed, forcing local disconnect: {error:#}");
                Disconnect::ForceReload
            }
        }
    }

    /// Re-derive the session from the library regardless of cached
    /// state. A handle with a non-empty account id commits connected;
    /// anything else — including lookup failure — commits disconnected.
    /// Never raises.
    pub async fn refresh(&self) -> WalletSession<C::Wallet> {
        match self.connector.live_wallet().await {
            Ok(Some(wallet)) => match wallet.account_id().filter(|id| !id.is_empty()) {
                Some(account_id) => self.commit_connected(account_id, wallet),
                None => self.commit_disconnected(),
            },
            Ok(None) => self.commit_disconnected(),
            Err(error) => {
                debug!("refresh found no connected wallet: {error:#}");
                self.commit_disconnected();
            }
        }

        self.session()
    }

    fn commit_connected(&self, account_id: String, wallet: C::Wallet) {
        *self.session.borrow_mut() = WalletSession::Connected { account_id, wallet };
    }

    fn commit_disconnected(&self) {
        *self.session.borrow_mut() = WalletSession::Disconnected;
    }
}
