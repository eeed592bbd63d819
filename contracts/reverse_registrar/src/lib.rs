#![no_std]
//! Reverse registry: maps an account back to its chosen display name.
//!
//! `set_name` materializes a node at `<strkey>.addr.reverse`, owned by this
//! contract and resolved by the text resolver, then stores the display name
//! there. Clearing (empty name, or the registrar's cascade on a merge
//! transfer) makes lookups return the empty string.


use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, symbol_short, Address, Bytes,
    BytesN, Env, Map, String, Symbol,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    AlreadyInitialized = 2,
}

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
    fn set_resolver(e: Env, caller: Address, node: BytesN<32>, resolver: Address);
}

#[contractclient(name = "ResolverClient")]
pub trait ResolverInterface {
    fn set_name(e: Env, caller: Address, node: BytesN<32>, name: String);
}

#[contract]
pub struct ReverseRegistrar;

#[contractimpl]
impl ReverseRegistrar {
    // Storage keys
    fn k_admin() -> Symbol { symbol_short!("admin") }
    fn k_mgrs() -> Symbol { symbol_short!("mgrs") }
    fn k_registry() -> Symbol { symbol_short!("registry") }
    fn k_resolver() -> Symbol { symbol_short!("resolver") }

    pub fn initialize(e: Env, admin: Address, registry: Address, resolver: Address) -> Result<(), Error> {
        if e.storage().instance().has(&Self::k_admin()) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&Self::k_admin(), &admin);
        e.storage().instance().set(&Self::k_registry(), &registry);
        e.storage().instance().set(&Self::k_resolver(), &resolver);
        Ok(())
    }

    /// Grant manager rights (the registrar, for its merge-transfer cascade).
    pub fn add_manager(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        caller.require_auth();
        let admin: Address = e.storage().instance().get(&Self::k_admin()).unwrap();
        if caller != admin {
            return Err(Error::Unauthorized);
        }
        let mut mgrs = Self::managers(&e);
        mgrs.set(account, true);
        e.storage().instance().set(&Self::k_mgrs(), &mgrs);
        Ok(())
    }

    /// Set the caller's display name. Overwrites any previous choice; an
    /// empty name clears the record.
    pub fn set_name(e: Env, caller: Address, name: String) -> BytesN<32> {
        caller.require_auth();
        let me = e.current_contract_address();
        let registry_addr: Address = e.storage().instance().get(&Self::k_registry()).unwrap();
        let resolver_addr: Address = e.storage().instance().get(&Self::k_resolver()).unwrap();

        let node = Self::node_for(e.clone(), caller.clone());
        let registry = RegistryClient::new(&e, &registry_addr);
        registry.set_node(&me, &node, &caller.to_string(), &me, &0, &3);
        registry.set_resolver(&me, &node, &resolver_addr);
        ResolverClient::new(&e, &resolver_addr).set_name(&me, &node, &name);

        e.events().publish((symbol_short!("rev_name"), node.clone()), caller);
        node
    }

    /// Clear `account`'s display name. Manager only; used by the registrar
    /// when a merge transfer hands the name to a new owner.
    pub fn clear_name(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        caller.require_auth();
        if !Self::managers(&e).get(caller).unwrap_or(false) {
            return Err(Error::Unauthorized);
        }
        let me = e.current_contract_address();
        let resolver: Address = e.storage().instance().get(&Self::k_resolver()).unwrap();
        let node = Self::node_for(e.clone(), account.clone());
        ResolverClient::new(&e, &resolver).set_name(&me, &node, &String::from_str(&e, ""));

        e.events().publish((symbol_short!("rev_clear"), node), account);
        Ok(())
    }

    /// Namespace hash of `<strkey(account)>.addr.reverse`.
    pub fn node_for(e: Env, account: Address) -> BytesN<32> {
        let reverse = Self::child(&e, &Self::zero(&e), b"reverse");
        let addr = Self::child(&e, &reverse, b"addr");
        let label_hash = e.crypto().keccak256(&Self::addr_bytes(&e, &account)).to_bytes();
        Self::sub_node(&e, &addr, &label_hash)
    }

    // Helpers

    fn zero(e: &Env) -> BytesN<32> {
        BytesN::from_array(e, &[0u8; 32])
    }

    fn child(e: &Env, parent: &BytesN<32>, label: &[u8]) -> BytesN<32> {
        let lh = e.crypto().keccak256(&Bytes::from_slice(e, label)).to_bytes();
        Self::sub_node(e, parent, &lh)
    }

    fn sub_node(e: &Env, parent: &BytesN<32>, label_hash: &BytesN<32>) -> BytesN<32> {
        let mut data = Bytes::from_array(e, &parent.to_array());
        data.append(&Bytes::from_array(e, &label_hash.to_array()));
        e.crypto().keccak256(&data).to_bytes()
    }

    fn addr_bytes(e: &Env, a: &Address) -> Bytes {
        let s = a.to_string();
        let mut buf = [0u8; 72];
        let len = s.len() as usize;
        s.copy_into_slice(&mut buf[..len]);
        Bytes::from_slice(e, &buf[..len])
    }

    fn managers(e: &Env) -> Map<Address, bool> {
        e.storage().instance().get(&Self::k_mgrs()).unwrap_or(Map::new(e))
    }
}
