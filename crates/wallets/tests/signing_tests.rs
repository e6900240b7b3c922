//! Signing both encodings and recovering the signer from the wire bytes.

use donut_core::{Address, TransactionRequest};
use donut_cryptography::{recover_address, RecoverableSignature};
use rlp::Rlp;
use donut_wallets::{Account, Error, LocalWallet, SigningStrategy};

const FUNDED_KEY: &str = "0x5b278a5547041600410532c3bb4d4bcb7ed42b030763b55789918d56e7910d1b";

fn fields(raw: &[u8]) -> Vec<Vec<u8>> {
    let list = Rlp::new(raw);
    assert!(list.is_list());
    list.iter().map(|item| item.data().unwrap().to_vec()).collect()
}

fn bytes(item: &[u8]) -> Vec<u8> {
    item.to_vec()
}

fn uint(item: &[u8]) -> u64 {
    item.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64)
}

fn word(item: &[u8]) -> [u8; 32] {
    let value = bytes(item);
    let mut out = [0u8; 32];
    out[32 - value.len()..].copy_from_slice(&value);
    out
}

fn native_request(from: Address) -> TransactionRequest {
    TransactionRequest {
        from,
        nonce: 3,
        gas: 1_000_000,
        gas_price: 5_000_000_000,
        chain_id: 44787,
        to: Some("0x8c36775E95A5f7FEf6894Ba658628352Ac58605B".parse().unwrap()),
        value: Some(5),
        fee_currency: Some("0x000000000000000000000000000000000000d008".parse().unwrap()),
        gateway_fee: Some(0x25),
        gateway_fee_recipient: Some("0xc77538d1e30C0e4ec44B0DcaD97FD3dc63fcaCC4".parse().unwrap()),
        ..Default::default()
    }
}

#[test]
fn eth_compatible_known_vector() {
    let account = Account::from_private_key_hex(&"01".repeat(32)).unwrap();
    let tx = TransactionRequest {
        nonce: 0,
        gas_price: 20_000_000_000,
        gas: 21_000,
        to: Some("0x1111111111111111111111111111111111111111".parse().unwrap()),
        value: Some(1_000_000_000_000_000),
        chain_id: 1,
        ..Default::default()
    };

    let signed = account.sign_transaction(&tx).unwrap();
    assert_eq!(
        signed.raw_hex(),
        concat!(
            "0xf86b808504a817c80082520894111111111111111111111111111111111111111187038d7ea4c6800080",
            "25a0bf102036c4c1d09b980801dd71748a55c56b9df26e9c0d4c95cdf3e33a27147fa075907e1ef77b1e1bfb8b708b671729fb41c5b4031ef1baca3a9ff70931d2880c"
        )
    );
}

#[test]
fn native_encoding_carries_all_fields() {
    let mut wallet = LocalWallet::new();
    let from = wallet.add_account(FUNDED_KEY).unwrap();
    let tx = native_request(from);

    let signed = wallet.sign_transaction(&tx).unwrap();
    let items = fields(&signed.raw);

    assert_eq!(items.len(), 12);
    assert_eq!(uint(&items[0]), 3);
    assert_eq!(bytes(&items[3]), tx.fee_currency.unwrap().to_vec());
    assert_eq!(bytes(&items[4]), tx.gateway_fee_recipient.unwrap().to_vec());
    assert_eq!(bytes(&items[5]), vec![0x25]);
    assert_eq!(bytes(&items[6]), tx.to.unwrap().to_vec());
    assert_eq!(uint(&items[7]), 5);
    assert!(bytes(&items[8]).is_empty());

    let v = uint(&items[9]);
    let recovery_id = v - 35 - 2 * 44787;
    assert!(recovery_id <= 1);
    let signature = RecoverableSignature {
        recovery_id: recovery_id as u8,
        r: word(&items[10]),
        s: word(&items[11]),
    };
    assert_eq!(
        recover_address(&LocalWallet::signing_hash(&tx), &signature).unwrap(),
        from
    );
}

#[test]
fn native_encoding_keeps_empty_slots_for_absent_fields() {
    let mut wallet = LocalWallet::new();
    let from = wallet.add_account(FUNDED_KEY).unwrap();
    let mut tx = native_request(from);
    tx.fee_currency = None;
    tx.gateway_fee = None;
    tx.gateway_fee_recipient = None;

    let items = fields(&wallet.sign_transaction(&tx).unwrap().raw);
    assert_eq!(items.len(), 12);
    for slot in 3..=5 {
        assert!(bytes(&items[slot]).is_empty(), "slot {slot} should be empty");
    }
}

#[test]
fn contract_creation_has_empty_destination() {
    let mut wallet = LocalWallet::new();
    let from = wallet.add_account(FUNDED_KEY).unwrap();
    let tx = TransactionRequest {
        from,
        gas: 1_000_000,
        gas_price: 1,
        chain_id: 1101,
        data: Some(vec![0x60, 0x80, 0x60, 0x40]),
        ..Default::default()
    };

    let compat = SigningStrategy::StandardAccount.sign(&wallet, &tx).unwrap();
    let items = fields(&compat.raw);
    assert_eq!(items.len(), 9);
    assert!(bytes(&items[3]).is_empty());
    assert_eq!(bytes(&items[5]), vec![0x60, 0x80, 0x60, 0x40]);
}

#[test]
fn strategy_follows_compat_mode() {
    assert_eq!(
        SigningStrategy::for_compat_mode(true),
        SigningStrategy::StandardAccount
    );
    assert_eq!(
        SigningStrategy::for_compat_mode(false),
        SigningStrategy::LocalWallet
    );

    let mut wallet = LocalWallet::new();
    let from = wallet.add_account(FUNDED_KEY).unwrap();
    let mut tx = native_request(from);
    tx.fee_currency = None;
    tx.gateway_fee = None;
    tx.gateway_fee_recipient = None;

    let compat = SigningStrategy::for_compat_mode(true).sign(&wallet, &tx).unwrap();
    let native = SigningStrategy::for_compat_mode(false).sign(&wallet, &tx).unwrap();
    assert_eq!(fields(&compat.raw).len(), 9);
    assert_eq!(fields(&native.raw).len(), 12);
    assert_ne!(compat.hash, native.hash);
}

#[test]
fn unknown_sender_is_rejected() {
    let wallet = LocalWallet::new();
    let from: Address = "0xd927E9e733a46f46e18528148D8b98E496545f66".parse().unwrap();
    let tx = native_request(from);
    assert_eq!(
        wallet.sign_transaction(&tx).unwrap_err(),
        Error::AccountNotFound(from)
    );
    assert!(SigningStrategy::StandardAccount.sign(&wallet, &tx).is_err());
}

#[test]
fn seeded_account_matches_configured_address() {
    let mut wallet = LocalWallet::new();
    let address = wallet.add_account(FUNDED_KEY).unwrap();
    assert_eq!(
        address,
        "0xd927E9e733a46f46e18528148D8b98E496545f66".parse().unwrap()
    );
    assert_eq!(wallet.account(&address).unwrap().address(), address);
}
