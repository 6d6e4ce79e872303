//! # Integration Test Flows
//!
//! End-to-end: `RpcManager` builds and signs, `LoopbackTransport` delivers
//! to `PaiChaincode`, results come back as the CLI would see them.
//!
//! ## Flows Tested
//!
//! 1. Register a key, fund another user, query both users
//! 2. Privilege denial is audited once and surfaces as an RPC error
//! 3. A missing deployment record fails every call and writes nothing
//! 4. Replayed fund messages are rejected
//! 5. Unknown chaincode ids never reach the chaincode

#[cfg(test)]
mod tests {
    use crate::integration::loopback::{
        LoopbackLedger, LoopbackTransport, CHAINCODE_ERROR, UNKNOWN_CHAINCODE,
    };
    use pc_01_chaincode::prelude::*;
    use pc_02_client::prelude::*;
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::RpcArguments;

    const CHAINCODE_ID: &str = "pai-test";

    type Manager = RpcManager<HexAddressValidator, LocalKeySigner, LoopbackTransport>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn deployed_ledger() -> LoopbackLedger {
        let ledger = LoopbackLedger::new(CHAINCODE_ID);
        ledger.deploy(1_000_000, &["root"]);
        ledger
    }

    /// A client whose key derives the principal the ledger authenticates.
    fn user_client(ledger: &LoopbackLedger) -> (Manager, String) {
        let keypair = Secp256k1KeyPair::generate();
        let address = keypair.address();
        let manager = RpcManager::new(
            TransactionBuilder::new(HexAddressValidator, LocalKeySigner::new(keypair)),
            RpcFireClient::new(ledger.connect(address.clone()), CHAINCODE_ID),
        );
        (manager, address)
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn rpc_message(err: ClientError) -> (i64, String) {
        match err {
            ClientError::Transport(TransportError::Rpc { code, message }) => (code, message),
            other => panic!("expected an RPC error, got {other:?}"),
        }
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_register_fund_and_query() {
        let ledger = deployed_ledger();
        let (alice, alice_addr) = user_client(&ledger);
        let (_, bob_addr) = user_client(&ledger);

        let tx_id = alice.register(&[]).await.unwrap();
        assert!(!tx_id.is_empty());

        ledger.set_balance(&alice_addr, 500);
        alice
            .fund(&args(&[&bob_addr, "120", "first payment"]))
            .await
            .unwrap();

        let bob = alice.query_user(&bob_addr).await.unwrap();
        assert_eq!(bob["balance"], 120);
        assert_eq!(bob["region"], "global");

        let me = alice.query_user(&alice_addr).await.unwrap();
        assert_eq!(me["balance"], 380);
        assert!(me["public_key"].is_string());

        let status = alice.query_global().await.unwrap();
        assert_eq!(status["total_supply"], 1_000_000);
        assert_eq!(status["unassigned_supply"], 1_000_000);
    }

    #[tokio::test]
    async fn test_fund_before_registration_is_rejected() {
        let ledger = deployed_ledger();
        let (alice, alice_addr) = user_client(&ledger);
        let (_, bob_addr) = user_client(&ledger);
        ledger.set_balance(&alice_addr, 10);

        let err = alice.fund(&args(&[&bob_addr, "5"])).await.unwrap_err();
        let (code, message) = rpc_message(err);
        assert_eq!(code, CHAINCODE_ERROR);
        assert!(message.contains("no registered public key"), "{message}");
    }

    #[tokio::test]
    async fn test_privilege_denial_is_audited() {
        let ledger = deployed_ledger();
        let (alice, alice_addr) = user_client(&ledger);

        let err = alice
            .client()
            .fire("ADMN_MINT", RpcArguments::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Rpc { code: CHAINCODE_ERROR, .. }));

        let records = ledger.chaincode().audit().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].principal, alice_addr);
        assert_eq!(records[0].function, "ADMN_MINT");
    }

    #[tokio::test]
    async fn test_admin_groups_are_explicit_stubs() {
        let ledger = deployed_ledger();
        let admin = RpcFireClient::new(ledger.connect("root"), CHAINCODE_ID);

        admin.fire("ADMN_MINT", RpcArguments::default()).await.unwrap();
        admin.fire("MANG_ASSIGN", RpcArguments::default()).await.unwrap();

        assert!(ledger.chaincode().audit().is_empty());
        assert_eq!(ledger.chaincode().stats().dispatched, 2);
    }

    #[tokio::test]
    async fn test_missing_deployment_record() {
        let ledger = LoopbackLedger::new(CHAINCODE_ID);
        let (alice, _) = user_client(&ledger);

        let (_, message) = rpc_message(alice.register(&[]).await.unwrap_err());
        assert!(message.starts_with("FATAL"), "{message}");

        let (_, message) = rpc_message(alice.query_global().await.unwrap_err());
        assert!(message.starts_with("FATAL"), "{message}");

        assert_eq!(ledger.store().writes(), 0);
        assert!(!ledger.chaincode().cache().is_loaded());
    }

    #[tokio::test]
    async fn test_identical_fund_is_replay() {
        let ledger = deployed_ledger();
        let (alice, alice_addr) = user_client(&ledger);
        let (_, bob_addr) = user_client(&ledger);
        alice.register(&[]).await.unwrap();
        ledger.set_balance(&alice_addr, 100);

        alice.fund(&args(&[&bob_addr, "10"])).await.unwrap();
        let (_, message) = rpc_message(alice.fund(&args(&[&bob_addr, "10"])).await.unwrap_err());
        assert!(message.contains("replayed"), "{message}");

        // A different note makes the same transfer distinct.
        alice.fund(&args(&[&bob_addr, "10", "again"])).await.unwrap();
        let bob = alice.query_user(&bob_addr).await.unwrap();
        assert_eq!(bob["balance"], 20);
    }

    #[tokio::test]
    async fn test_unknown_chaincode_id() {
        let ledger = deployed_ledger();
        let (mut alice, _) = user_client(&ledger);
        alice.client_mut().set_chaincode_name("someone-else");

        let (code, _) = rpc_message(alice.register(&[]).await.unwrap_err());
        assert_eq!(code, UNKNOWN_CHAINCODE);
        assert_eq!(ledger.chaincode().stats().invocations, 0);
    }

    #[tokio::test]
    async fn test_invalid_arguments_stay_client_side() {
        let ledger = deployed_ledger();
        let (alice, _) = user_client(&ledger);

        let err = alice.fund(&args(&["not-an-address", "1"])).await.unwrap_err();
        assert!(matches!(err, ClientError::Build(TxBuildError::InvalidAddress(_))));
        assert_eq!(ledger.chaincode().stats().invocations, 0);
    }
}
