use crate::types::Error;
use soroban_sdk::{Bytes, BytesN, Env, String};

/// Longest label accepted by any registration path.
pub const MAX_LABEL_LEN: u32 = 255;

pub fn zero_hash(e: &Env) -> BytesN<32> {
    BytesN::from_array(e, &[0u8; 32])
}

pub fn label_hash(e: &Env, label: &String) -> Result<BytesN<32>, Error> {
    if label.len() > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }
    Ok(e.crypto().keccak256(&str_bytes(e, label)).to_bytes())
}

pub fn sub_node(e: &Env, parent: &BytesN<32>, label_hash: &BytesN<32>) -> BytesN<32> {
    let mut data = Bytes::from_array(e, &parent.to_array());
    data.append(&Bytes::from_array(e, &label_hash.to_array()));
    e.crypto().keccak256(&data).to_bytes()
}

/// Copy a host string into linear bytes. Callers bound labels with
/// `MAX_LABEL_LEN` first; strkeys are always 56 characters.
pub fn str_bytes(e: &Env, s: &String) -> Bytes {
    let mut buf = [0u8; 256];
    let len = s.len() as usize;
    s.copy_into_slice(&mut buf[..len]);
    Bytes::from_slice(e, &buf[..len])
}
