//! Interfaces of the collaborating contracts, consumed through generated
//! clients so the registrar stays decoupled from their implementations.

use soroban_sdk::{contractclient, Address, BytesN, Env, String};

#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn set_node(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        label: String,
        owner: Address,
        expiry: u64,
        depth: u32,
    );
    fn reclaim_node(e: Env, caller: Address, node: BytesN<32>, new_owner: Address);
    fn set_expiry(e: Env, caller: Address, node: BytesN<32>, expiry: u64);
    fn set_text(e: Env, caller: Address, node: BytesN<32>, text: String);
    fn current_owner(e: Env, node: BytesN<32>) -> Option<Address>;
}

#[contractclient(name = "ReverseClient")]
pub trait ReverseInterface {
    fn clear_name(e: Env, caller: Address, account: Address);
}
