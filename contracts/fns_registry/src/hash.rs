use crate::types::Error;
use soroban_sdk::{Bytes, BytesN, Env, String};

/// Longest label a node may carry.
pub const MAX_LABEL_LEN: u32 = 255;

pub fn zero_hash(e: &Env) -> BytesN<32> {
    BytesN::from_array(e, &[0u8; 32])
}

/// keccak256 of the label's utf8 bytes.
pub fn label_hash(e: &Env, label: &String) -> Result<BytesN<32>, Error> {
    let mut buf = [0u8; 256];
    let len = label.len() as usize;
    if label.len() > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }
    label.copy_into_slice(&mut buf[..len]);
    Ok(e.crypto()
        .keccak256(&Bytes::from_slice(e, &buf[..len]))
        .to_bytes())
}

/// Namespace hash of a child: keccak256(parent || labelhash).
pub fn sub_node(e: &Env, parent: &BytesN<32>, label_hash: &BytesN<32>) -> BytesN<32> {
    let mut data = Bytes::from_array(e, &parent.to_array());
    data.append(&Bytes::from_array(e, &label_hash.to_array()));
    e.crypto().keccak256(&data).to_bytes()
}
