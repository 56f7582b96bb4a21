//! In-memory stand-ins for the injected wallet objects and the Solana RPC.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use coinflip_core::{
    Coin, Eip1193, ProviderError, SessionController, SolanaRpc, SolanaWallet, WalletEnvironment,
};
use serde_json::{json, Value};

/// Memo program id; any valid 32-byte base58 key works.
pub const SOL_ADDRESS: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";
pub const EVM_ADDRESS_LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
pub const EVM_ADDRESS_CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
/// 1.5 ETH in wei, hex encoded as an EIP-1193 quantity.
pub const ONE_AND_A_HALF_ETH: &str = "0x14d1120d7b160000";

pub struct MockPhantom {
    address: String,
    phantom: bool,
    reject: Option<ProviderError>,
    calls: Rc<Cell<usize>>,
}

impl MockPhantom {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            phantom: true,
            reject: None,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Some other extension that injects a Solana object.
    pub fn not_phantom(mut self) -> Self {
        self.phantom = false;
        self
    }

    pub fn rejecting(mut self, err: ProviderError) -> Self {
        self.reject = Some(err);
        self
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

#[async_trait(?Send)]
impl SolanaWallet for MockPhantom {
    fn is_phantom(&self) -> bool {
        self.phantom
    }

    async fn connect(&self) -> Result<String, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        match &self.reject {
            Some(err) => Err(err.clone()),
            None => Ok(self.address.clone()),
        }
    }
}

pub struct MockSolanaRpc {
    lamports: u64,
    fail: Option<ProviderError>,
}

impl MockSolanaRpc {
    pub fn with_balance(lamports: u64) -> Self {
        Self {
            lamports,
            fail: None,
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            lamports: 0,
            fail: Some(err),
        }
    }
}

#[async_trait(?Send)]
impl SolanaRpc for MockSolanaRpc {
    async fn get_balance(&self, _address: &str) -> Result<u64, ProviderError> {
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(self.lamports),
        }
    }
}

pub struct MockEthereum {
    accounts: Vec<String>,
    balance: String,
    chain_id: String,
    reject_accounts: Option<ProviderError>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl MockEthereum {
    pub fn new(account: &str, balance: &str) -> Self {
        Self {
            accounts: vec![account.to_string()],
            balance: balance.to_string(),
            chain_id: "0x1".to_string(),
            reject_accounts: None,
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn without_accounts(mut self) -> Self {
        self.accounts.clear();
        self
    }

    pub fn on_chain(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn rejecting(mut self, err: ProviderError) -> Self {
        self.reject_accounts = Some(err);
        self
    }

    pub fn requests(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.requests)
    }
}

#[async_trait(?Send)]
impl Eip1193 for MockEthereum {
    async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
        self.requests.borrow_mut().push(method.to_string());
        match method {
            "eth_requestAccounts" => match &self.reject_accounts {
                Some(err) => Err(err.clone()),
                None => Ok(json!(self.accounts)),
            },
            "eth_getBalance" => Ok(json!(self.balance)),
            "eth_chainId" => Ok(json!(self.chain_id)),
            other => Err(ProviderError::with_code(
                4200,
                format!("unsupported method {other}"),
            )),
        }
    }
}

/// Replays fixed draws, then keeps returning the last one.
pub struct ScriptedCoin {
    draws: VecDeque<f64>,
    last: f64,
}

impl ScriptedCoin {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            last: 0.0,
        }
    }
}

impl Coin for ScriptedCoin {
    fn draw(&mut self) -> f64 {
        if let Some(next) = self.draws.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// A controller on Solana with Phantom present and `sol` SOL in the account.
pub fn solana_controller(sol: u64, draws: &[f64]) -> SessionController<ScriptedCoin> {
    let env = WalletEnvironment::new(MockSolanaRpc::with_balance(sol * LAMPORTS_PER_SOL))
        .with_solana_wallet(MockPhantom::new(SOL_ADDRESS));
    SessionController::with_coin(env, ScriptedCoin::new(draws))
}
