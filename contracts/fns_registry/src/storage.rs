use crate::types::Node;
use soroban_sdk::{symbol_short, Address, BytesN, Env, Map, String, Symbol, Vec};

pub fn k_admin() -> Symbol { symbol_short!("admin") }
pub fn k_mgrs() -> Symbol { symbol_short!("mgrs") }
pub fn k_nodes() -> Symbol { symbol_short!("nodes") }
pub fn k_kids() -> Symbol { symbol_short!("kids") }
pub fn k_texts() -> Symbol { symbol_short!("texts") }
pub fn k_ops() -> Symbol { symbol_short!("ops") }

pub fn get_admin(e: &Env) -> Address {
    e.storage().instance().get(&k_admin()).unwrap()
}

pub fn get_managers(e: &Env) -> Map<Address, bool> {
    e.storage().instance().get(&k_mgrs()).unwrap_or(Map::new(e))
}

pub fn put_managers(e: &Env, m: &Map<Address, bool>) {
    e.storage().instance().set(&k_mgrs(), m);
}

pub fn get_nodes(e: &Env) -> Map<BytesN<32>, Node> {
    e.storage().instance().get(&k_nodes()).unwrap_or(Map::new(e))
}

pub fn put_nodes(e: &Env, m: &Map<BytesN<32>, Node>) {
    e.storage().instance().set(&k_nodes(), m);
}

pub fn get_kids(e: &Env) -> Map<BytesN<32>, Vec<BytesN<32>>> {
    e.storage().instance().get(&k_kids()).unwrap_or(Map::new(e))
}

pub fn put_kids(e: &Env, m: &Map<BytesN<32>, Vec<BytesN<32>>>) {
    e.storage().instance().set(&k_kids(), m);
}

pub fn get_texts(e: &Env) -> Map<BytesN<32>, String> {
    e.storage().instance().get(&k_texts()).unwrap_or(Map::new(e))
}

pub fn put_texts(e: &Env, m: &Map<BytesN<32>, String>) {
    e.storage().instance().set(&k_texts(), m);
}

pub fn get_ops(e: &Env) -> Map<BytesN<32>, Vec<Address>> {
    e.storage().instance().get(&k_ops()).unwrap_or(Map::new(e))
}

pub fn put_ops(e: &Env, m: &Map<BytesN<32>, Vec<Address>>) {
    e.storage().instance().set(&k_ops(), m);
}
