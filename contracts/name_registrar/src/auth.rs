//! Signature-based off-chain authorization: a manager signs a claim that an
//! account may register a label before a deadline. Claims are verified per
//! call and never persisted.

use crate::hash::str_bytes;
use crate::storage as st;
use crate::types::Error;
use soroban_sdk::{Address, Bytes, BytesN, Env, String};

/// Digest of a claim: keccak256(be64(deadline) || label || strkey(account)).
pub fn claim_digest(e: &Env, deadline: u64, label: &String, account: &Address) -> BytesN<32> {
    let mut data = Bytes::from_slice(e, &deadline.to_be_bytes());
    data.append(&str_bytes(e, label));
    data.append(&str_bytes(e, &account.to_string()));
    e.crypto().keccak256(&data).to_bytes()
}

/// Check a manager claim: the deadline must not have passed (`NotInTime`),
/// the signing key must belong to a manager (`InvalidSignature`), and the
/// ed25519 signature over the digest must verify (host-checked).
pub fn verify_claim(
    e: &Env,
    deadline: u64,
    label: &String,
    account: &Address,
    pubkey: &BytesN<32>,
    sig: &BytesN<64>,
) -> Result<(), Error> {
    if e.ledger().timestamp() > deadline {
        return Err(Error::NotInTime);
    }
    if !st::get_manager_keys(e).get(pubkey.clone()).unwrap_or(false) {
        return Err(Error::InvalidSignature);
    }
    let digest = claim_digest(e, deadline, label, account);
    e.crypto()
        .ed25519_verify(pubkey, &Bytes::from_array(e, &digest.to_array()), sig);
    Ok(())
}
