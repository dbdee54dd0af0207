/// End-to-end claim flow against a scripted in-memory backend.
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use alloy_primitives::{address, Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use subclaim_core::config::{DEFAULT_REGISTRAR, DEFAULT_TOKEN_CONTRACT};
use subclaim_core::contract::{IEnsRegistry, IEnsResolver, IERC721, CLAIM_METHOD};
use subclaim_core::network::ens::{namehash, reverse_name, ENS_REGISTRY};
use subclaim_core::notify::REGISTERED_MESSAGE;
use subclaim_core::{
    AnalyticsEvent, ChainBackend, ClaimConfig, ClaimError, ClaimService, ClaimSession, Command,
    ContractCall, Error, Notification, Phase, Receipt, Result, SubmitOutcome, TxHash,
    WriteFailure,
};

const ALICE: Address = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
const RESOLVER: Address = address!("231b0ee14048e9dccd1d247744d114a4eb5e8e63");

#[derive(Default)]
struct Script {
    account: Option<Address>,
    chain_id: u64,
    /// `None` accepts the switch; `Some(code)` fails it with that RPC code.
    switch_error: Option<i64>,
    sends: VecDeque<std::result::Result<TxHash, WriteFailure>>,
    receipts: VecDeque<Result<Option<Receipt>>>,
    calls: HashMap<(Address, Bytes), Bytes>,
    sent: Vec<ContractCall>,
    switched_to: Vec<u64>,
    receipt_polls: u32,
    disconnected: bool,
}

struct MockBackend {
    script: Mutex<Script>,
}

impl MockBackend {
    fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    fn connected() -> Script {
        Script {
            account: Some(ALICE),
            chain_id: 1,
            ..Script::default()
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut Script) -> T) -> T {
        f(&mut self.script.lock().unwrap())
    }
}

impl ChainBackend for MockBackend {
    async fn account(&self) -> Result<Address> {
        self.with(|s| s.account.ok_or(Error::Rpc {
            code: 4100,
            message: "not authorized".into(),
            data: None,
        }))
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.with(|s| s.chain_id))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        self.with(|s| {
            s.switched_to.push(chain_id);
            match s.switch_error {
                Some(code) => Err(Error::Rpc {
                    code,
                    message: "switch failed".into(),
                    data: None,
                }),
                None => {
                    s.chain_id = chain_id;
                    Ok(())
                }
            }
        })
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(19_000_000)
    }

    async fn send_transaction(
        &self,
        _from: Address,
        call: &ContractCall,
    ) -> std::result::Result<TxHash, WriteFailure> {
        self.with(|s| {
            s.sent.push(call.clone());
            s.sends
                .pop_front()
                .unwrap_or_else(|| Err(WriteFailure::Transport("no scripted send".into())))
        })
    }

    async fn transaction_receipt(&self, _tx_hash: TxHash) -> Result<Option<Receipt>> {
        self.with(|s| {
            s.receipt_polls += 1;
            s.receipts.pop_front().unwrap_or(Ok(None))
        })
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.with(|s| {
            s.calls
                .get(&(to, data))
                .cloned()
                .ok_or_else(|| Error::Network("unscripted eth_call".into()))
        })
    }

    async fn disconnect(&self) -> Result<()> {
        self.with(|s| {
            s.disconnected = true;
            s.account = None;
        });
        Ok(())
    }
}

fn hash(n: u8) -> TxHash {
    B256::repeat_byte(n)
}

fn receipt(tx_hash: TxHash, status: u64) -> Receipt {
    Receipt {
        tx_hash,
        status,
        block_number: Some(19_000_001),
    }
}

fn returns<T: SolValue>(value: T) -> Bytes {
    (value,).abi_encode_params().into()
}

fn script_balance(script: &mut Script, owner: Address, balance: u64) {
    script.calls.insert(
        (
            DEFAULT_TOKEN_CONTRACT,
            IERC721::balanceOfCall { owner }.abi_encode().into(),
        ),
        returns(U256::from(balance)),
    );
}

/// Reverse record `name` for ALICE, forward record pointing at `forward`.
fn script_ens(script: &mut Script, name: &str, forward: Address, avatar: Option<&str>) {
    let reverse = namehash(&reverse_name(&ALICE));
    let node = namehash(name);
    for n in [reverse, node] {
        script.calls.insert(
            (
                ENS_REGISTRY,
                IEnsRegistry::resolverCall { node: n }.abi_encode().into(),
            ),
            returns(RESOLVER),
        );
    }
    script.calls.insert(
        (
            RESOLVER,
            IEnsResolver::nameCall { node: reverse }.abi_encode().into(),
        ),
        returns(name.to_string()),
    );
    script.calls.insert(
        (RESOLVER, IEnsResolver::addrCall { node }.abi_encode().into()),
        returns(forward),
    );
    if let Some(avatar) = avatar {
        script.calls.insert(
            (
                RESOLVER,
                IEnsResolver::textCall {
                    node,
                    key: "avatar".to_string(),
                }
                .abi_encode()
                .into(),
            ),
            returns(avatar.to_string()),
        );
    }
}

fn service(script: Script) -> ClaimService<MockBackend> {
    ClaimService::new(MockBackend::new(script), ClaimConfig::default())
}

/// Validate and submit `label`, returning the call the session produced.
async fn submit(
    service: &ClaimService<MockBackend>,
    session: &mut ClaimSession,
    label: &str,
) -> ContractCall {
    assert!(session.set_input(label));
    let SubmitOutcome::Proceed(call) = session.submit() else {
        panic!("{label:?} should pass validation");
    };
    let result = service.submit(&call, label).await;
    session.submission_finished(result);
    call
}

#[tokio::test(start_paused = true)]
async fn claim_registers_after_successful_receipt() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Ok(hash(1)));
    script.receipts.extend([Ok(None), Ok(None), Ok(Some(receipt(hash(1), 1)))]);
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    let call = submit(&service, &mut session, "alice").await;
    assert_eq!(call.to, DEFAULT_REGISTRAR);
    assert_eq!(call.method, CLAIM_METHOD);
    assert_eq!(call.chain_id, 1);
    assert_eq!(
        session.phase(),
        Phase::AwaitingConfirmation { tx_hash: hash(1) }
    );

    let receipt = service.wait_for_receipt(hash(1)).await;
    assert_eq!(
        session.receipt_received(&receipt),
        Some(AnalyticsEvent::ClaimSuccess)
    );
    assert!(session.is_registered());
    assert!(!session.input_enabled());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::success(REGISTERED_MESSAGE)]
    );
    service.backend().with(|s| {
        assert_eq!(s.sent.len(), 1);
        assert_eq!(s.receipt_polls, 3);
    });
}

#[tokio::test(start_paused = true)]
async fn reverted_receipt_returns_to_idle() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Ok(hash(2)));
    script.receipts.push_back(Ok(Some(receipt(hash(2), 0))));
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    submit(&service, &mut session, "alice").await;
    let receipt = service.wait_for_receipt(hash(2)).await;
    assert_eq!(
        session.receipt_received(&receipt),
        Some(AnalyticsEvent::ClaimFail)
    );
    assert_eq!(session.phase(), Phase::Idle);
    let notes = session.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Registration failed");
}

#[tokio::test(start_paused = true)]
async fn watcher_survives_transient_errors() {
    let mut script = MockBackend::connected();
    script.receipts.extend([
        Err(Error::Network("connection reset".into())),
        Ok(None),
        Err(Error::Network("timeout".into())),
        Ok(Some(receipt(hash(3), 1))),
    ]);
    let service = service(script);

    let receipt = service.wait_for_receipt(hash(3)).await;
    assert!(receipt.succeeded());
    service.backend().with(|s| assert_eq!(s.receipt_polls, 4));
}

#[tokio::test]
async fn wallet_rejection_is_reported() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Err(WriteFailure::Rejected));
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    submit(&service, &mut session, "alice").await;
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.input_enabled());
    assert_eq!(
        session.drain_notifications(),
        vec![Notification::error("Transaction rejected")]
    );
    assert!(session.analytics_events().is_empty());
}

#[tokio::test]
async fn revert_reasons_are_classified() {
    let cases = [
        (
            WriteFailure::Reverted {
                reason: "Not authorised".into(),
            },
            "You don't own a Lil Noun",
        ),
        (
            WriteFailure::Rpc {
                code: 3,
                message: "execution reverted: sub-domain already exists".into(),
                data: None,
            },
            "alice.test.eth already exists",
        ),
        (
            WriteFailure::Rpc {
                code: -32000,
                message: "cannot estimate gas (reason=\"Paused\", method=\"estimateGas\")".into(),
                data: None,
            },
            "Paused",
        ),
    ];

    for (failure, expected) in cases {
        let mut script = MockBackend::connected();
        script.sends.push_back(Err(failure));
        let service = service(script);
        let call = subclaim_core::contract::claim_call(service.config(), "alice");
        let err = service.submit(&call, "alice").await.unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

#[tokio::test]
async fn token_already_used_wording_follows_holdings() {
    for (balance, expected) in [
        (1, "A name has already been claimed with your Lil Noun"),
        (2, "A name has already been claimed with this token"),
    ] {
        let mut script = MockBackend::connected();
        script.sends.push_back(Err(WriteFailure::Reverted {
            reason: "Token has already been set".into(),
        }));
        script_balance(&mut script, ALICE, balance);
        let service = service(script);
        let mut session = ClaimSession::new(service.config().clone());

        submit(&service, &mut session, "alice").await;
        let notes = session.drain_notifications();
        assert_eq!(notes[0].message, expected);
        assert!(notes[0].wide);
    }
}

#[tokio::test]
async fn holdings_lookup_failure_falls_back_to_single_token() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Err(WriteFailure::Reverted {
        reason: "Token has already been set".into(),
    }));
    let service = service(script);
    let call = subclaim_core::contract::claim_call(service.config(), "alice");

    let err = service.submit(&call, "alice").await.unwrap_err();
    assert_eq!(
        err,
        ClaimError::TokenAlreadyUsed {
            token_label: "Lil Noun".into(),
            multiple_tokens: false,
        }
    );
}

#[tokio::test]
async fn wrong_chain_is_switched_before_sending() {
    let mut script = MockBackend::connected();
    script.chain_id = 5;
    script.sends.push_back(Ok(hash(4)));
    let service = service(script);
    let call = subclaim_core::contract::claim_call(service.config(), "alice");

    assert_eq!(service.submit(&call, "alice").await, Ok(hash(4)));
    service.backend().with(|s| {
        assert_eq!(s.switched_to, vec![1]);
        assert_eq!(s.sent.len(), 1);
    });
}

#[tokio::test]
async fn declined_chain_switch_is_a_rejection() {
    let mut script = MockBackend::connected();
    script.chain_id = 5;
    script.switch_error = Some(4001);
    let service = service(script);
    let call = subclaim_core::contract::claim_call(service.config(), "alice");

    assert_eq!(
        service.submit(&call, "alice").await,
        Err(ClaimError::UserRejected)
    );
    service.backend().with(|s| assert!(s.sent.is_empty()));
}

#[tokio::test]
async fn unsupported_chain_switch_reports_wrong_chain() {
    let mut script = MockBackend::connected();
    script.chain_id = 5;
    script.switch_error = Some(4902);
    let service = service(script);
    let call = subclaim_core::contract::claim_call(service.config(), "alice");

    assert_eq!(
        service.submit(&call, "alice").await,
        Err(ClaimError::WrongChain {
            expected: 1,
            actual: 5
        })
    );
}

#[tokio::test]
async fn no_account_means_not_connected() {
    let service = service(Script {
        chain_id: 1,
        ..Script::default()
    });
    let call = subclaim_core::contract::claim_call(service.config(), "alice");
    assert_eq!(
        service.submit(&call, "alice").await,
        Err(ClaimError::NotConnected)
    );
}

#[tokio::test]
async fn connect_resolves_verified_ens_identity() {
    let mut script = MockBackend::connected();
    script_ens(&mut script, "alice.eth", ALICE, Some("ipfs://QmAvatar"));
    let service = service(script);

    let identity = service.connect().await.unwrap();
    assert_eq!(identity.address, ALICE);
    assert_eq!(identity.ens_name.as_deref(), Some("alice.eth"));
    assert_eq!(
        identity.avatar_url.as_deref(),
        Some("https://ipfs.io/ipfs/QmAvatar")
    );
}

#[tokio::test]
async fn unverified_reverse_record_is_dropped() {
    let mut script = MockBackend::connected();
    script_ens(&mut script, "vitalik.eth", Address::repeat_byte(0x11), None);
    let service = service(script);

    let identity = service.connect().await.unwrap();
    assert_eq!(identity.ens_name, None);
    assert_eq!(identity.avatar_url, None);
}

#[tokio::test]
async fn ens_failures_leave_plain_address() {
    // No scripted calls: every eth_call errors.
    let service = service(MockBackend::connected());
    let identity = service.connect().await.unwrap();
    assert_eq!(identity.address, ALICE);
    assert_eq!(identity.ens_name, None);
}

#[tokio::test]
async fn status_reports_chain_and_endpoints() {
    let service = service(MockBackend::connected());
    let status = service.status().await.unwrap();
    assert_eq!(status.chain_id, 1);
    assert_eq!(status.block_number, 19_000_000);
    assert_eq!(status.wallet_url, "http://127.0.0.1:1248");
    assert_eq!(status.read_url, status.wallet_url);
}

// -- Command layer --

async fn run(
    service: &ClaimService<MockBackend>,
    session: &mut ClaimSession,
    line: &str,
    json: bool,
) -> anyhow::Result<String> {
    let mut progress = Vec::new();
    let out = Command::parse(line)?
        .execute(service, session, json, &mut |line: &str| {
            progress.push(line.to_string())
        })
        .await;
    if json {
        assert!(progress.is_empty());
    }
    out
}

#[tokio::test(start_paused = true)]
async fn claim_command_runs_to_registration() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Ok(hash(5)));
    script.receipts.push_back(Ok(Some(receipt(hash(5), 1))));
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    let out = run(&service, &mut session, "claim alice", false).await.unwrap();
    assert_eq!(out, "✔ Your name has been registered!");
    assert!(session.is_registered());

    let err = run(&service, &mut session, "claim bob", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("alice.test.eth is already registered"));
    service.backend().with(|s| assert_eq!(s.sent.len(), 1));
}

#[tokio::test]
async fn invalid_claim_never_reaches_wallet() {
    let service = service(MockBackend::connected());
    let mut session = ClaimSession::new(service.config().clone());

    let out = run(&service, &mut session, "claim Alice", false).await.unwrap();
    assert_eq!(out, "✘ Capital letters and spaces are not supported");
    let out = run(&service, &mut session, "claim", false).await.unwrap();
    assert_eq!(out, "✘ Please enter a name");
    let out = run(&service, &mut session, "claim al ice", false).await.unwrap();
    assert_eq!(out, "✘ Capital letters and spaces are not supported");

    service.backend().with(|s| assert!(s.sent.is_empty()));
}

#[tokio::test]
async fn overlong_claim_is_refused() {
    let service = service(MockBackend::connected());
    let mut session = ClaimSession::new(service.config().clone());
    let line = format!("claim {}", "a".repeat(43));
    let err = run(&service, &mut session, &line, false).await.unwrap_err();
    assert!(err.to_string().contains("too long"));
}

#[tokio::test]
async fn claim_command_json_output() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Err(WriteFailure::Rejected));
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    let out = run(&service, &mut session, "claim alice", true).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["name"], "alice.test.eth");
    assert_eq!(json["registered"], false);
    assert_eq!(json["notifications"][0]["message"], "Transaction rejected");
}

#[tokio::test]
async fn disconnect_command_drops_account() {
    let service = service(MockBackend::connected());
    let mut session = ClaimSession::new(service.config().clone());

    let out = run(&service, &mut session, "disconnect", false).await.unwrap();
    assert_eq!(out, "Disconnected.");
    service.backend().with(|s| assert!(s.disconnected));
    assert!(run(&service, &mut session, "whoami", false).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn disconnect_starts_a_fresh_session() {
    let mut script = MockBackend::connected();
    script.sends.push_back(Ok(hash(6)));
    script.receipts.push_back(Ok(Some(receipt(hash(6), 1))));
    let service = service(script);
    let mut session = ClaimSession::new(service.config().clone());

    run(&service, &mut session, "claim alice", false).await.unwrap();
    assert!(session.is_registered());

    run(&service, &mut session, "disconnect", false).await.unwrap();
    assert!(!session.is_registered());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.attempt().is_none());
}
