#![no_std]
//! Text resolver: stores the display-name record per namespace node.
//! Written by its managers (the registrar and the reverse registrar);
//! lookups are open and never fail, a cleared record reads as empty.

#[cfg(test)]
mod test;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, BytesN, Env, Map, String,
    Symbol,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    AlreadyInitialized = 2,
}

#[contract]
pub struct NameResolver;

#[contractimpl]
impl NameResolver {
    // Storage keys
    fn k_admin() -> Symbol { symbol_short!("admin") }
    fn k_mgrs() -> Symbol { symbol_short!("mgrs") }
    fn k_names() -> Symbol { symbol_short!("names") }

    pub fn initialize(e: Env, admin: Address) -> Result<(), Error> {
        if e.storage().instance().has(&Self::k_admin()) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&Self::k_admin(), &admin);
        Ok(())
    }

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

    pub fn is_manager(e: Env, account: Address) -> bool {
        Self::managers(&e).get(account).unwrap_or(false)
    }

    /// Store `name` as the node's record. Manager only.
    pub fn set_name(e: Env, caller: Address, node: BytesN<32>, name: String) -> Result<(), Error> {
        caller.require_auth();
        if !Self::managers(&e).get(caller).unwrap_or(false) {
            return Err(Error::Unauthorized);
        }
        let mut names = Self::names(&e);
        names.set(node.clone(), name);
        e.storage().instance().set(&Self::k_names(), &names);

        e.events().publish((symbol_short!("name"), node), ());
        Ok(())
    }

    /// Pure lookup; unset or cleared nodes read as the empty string.
    pub fn name(e: Env, node: BytesN<32>) -> String {
        Self::names(&e).get(node).unwrap_or(String::from_str(&e, ""))
    }

    fn managers(e: &Env) -> Map<Address, bool> {
        e.storage().instance().get(&Self::k_mgrs()).unwrap_or(Map::new(e))
    }

    fn names(e: &Env) -> Map<BytesN<32>, String> {
        e.storage().instance().get(&Self::k_names()).unwrap_or(Map::new(e))
    }
}
