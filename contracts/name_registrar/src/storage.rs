use crate::types::{
    FeeTier, NameRecord, RebateTier, RecommendDetail, RecommendStatistics, SpecialPhase,
    TimeWindow,
};
use soroban_sdk::{symbol_short, Address, BytesN, Env, Map, String, Symbol, Vec};

pub fn k_admin() -> Symbol { symbol_short!("admin") }
pub fn k_registry() -> Symbol { symbol_short!("registry") }
pub fn k_reverse() -> Symbol { symbol_short!("reverse") }
pub fn k_base() -> Symbol { symbol_short!("base") }
pub fn k_token() -> Symbol { symbol_short!("token") }
pub fn k_mgrs() -> Symbol { symbol_short!("mgrs") }
pub fn k_sigkeys() -> Symbol { symbol_short!("sigkeys") }
pub fn k_white() -> Symbol { symbol_short!("white") }
pub fn k_retains() -> Symbol { symbol_short!("retains") }
pub fn k_fees() -> Symbol { symbol_short!("fees") }
pub fn k_rebates() -> Symbol { symbol_short!("rebates") }
pub fn k_win1() -> Symbol { symbol_short!("win1") }
pub fn k_win2() -> Symbol { symbol_short!("win2") }
pub fn k_winpre() -> Symbol { symbol_short!("winpre") }
pub fn k_pubstart() -> Symbol { symbol_short!("pubstart") }
pub fn k_special() -> Symbol { symbol_short!("special") }
pub fn k_spec_cnt() -> Symbol { symbol_short!("spec_cnt") }
pub fn k_names() -> Symbol { symbol_short!("names") }
pub fn k_approved() -> Symbol { symbol_short!("approved") }
pub fn k_stats() -> Symbol { symbol_short!("stats") }
pub fn k_refs() -> Symbol { symbol_short!("refs") }
pub fn k_pending() -> Symbol { symbol_short!("pending") }

pub fn get_admin(e: &Env) -> Address {
    e.storage().instance().get(&k_admin()).unwrap()
}

pub fn get_registry(e: &Env) -> Address {
    e.storage().instance().get(&k_registry()).unwrap()
}

pub fn get_reverse(e: &Env) -> Address {
    e.storage().instance().get(&k_reverse()).unwrap()
}

pub fn get_base_node(e: &Env) -> BytesN<32> {
    e.storage().instance().get(&k_base()).unwrap()
}

pub fn get_token(e: &Env) -> Address {
    e.storage().instance().get(&k_token()).unwrap()
}

pub fn get_managers(e: &Env) -> Map<Address, bool> {
    e.storage().instance().get(&k_mgrs()).unwrap_or(Map::new(e))
}

pub fn put_managers(e: &Env, m: &Map<Address, bool>) {
    e.storage().instance().set(&k_mgrs(), m);
}

pub fn get_manager_keys(e: &Env) -> Map<BytesN<32>, bool> {
    e.storage().instance().get(&k_sigkeys()).unwrap_or(Map::new(e))
}

pub fn put_manager_keys(e: &Env, m: &Map<BytesN<32>, bool>) {
    e.storage().instance().set(&k_sigkeys(), m);
}

pub fn get_whitelist(e: &Env) -> Map<Address, bool> {
    e.storage().instance().get(&k_white()).unwrap_or(Map::new(e))
}

pub fn put_whitelist(e: &Env, m: &Map<Address, bool>) {
    e.storage().instance().set(&k_white(), m);
}

pub fn get_retains(e: &Env) -> Map<BytesN<32>, bool> {
    e.storage().instance().get(&k_retains()).unwrap_or(Map::new(e))
}

pub fn put_retains(e: &Env, m: &Map<BytesN<32>, bool>) {
    e.storage().instance().set(&k_retains(), m);
}

pub fn get_fees(e: &Env) -> Vec<FeeTier> {
    e.storage().instance().get(&k_fees()).unwrap_or(Vec::new(e))
}

pub fn put_fees(e: &Env, v: &Vec<FeeTier>) {
    e.storage().instance().set(&k_fees(), v);
}

pub fn get_rebates(e: &Env) -> Vec<RebateTier> {
    e.storage().instance().get(&k_rebates()).unwrap_or(Vec::new(e))
}

pub fn put_rebates(e: &Env, v: &Vec<RebateTier>) {
    e.storage().instance().set(&k_rebates(), v);
}

// A window left unset is closed: [0, 0).
pub fn get_window(e: &Env, k: &Symbol) -> TimeWindow {
    e.storage().instance().get(k).unwrap_or(TimeWindow { start: 0, end: 0 })
}

pub fn put_window(e: &Env, k: &Symbol, w: &TimeWindow) {
    e.storage().instance().set(k, w);
}

// 0 means the public phase has not been scheduled.
pub fn get_public_start(e: &Env) -> u64 {
    e.storage().instance().get(&k_pubstart()).unwrap_or(0)
}

pub fn put_public_start(e: &Env, t: u64) {
    e.storage().instance().set(&k_pubstart(), &t);
}

pub fn get_special(e: &Env) -> SpecialPhase {
    e.storage().instance().get(&k_special()).unwrap_or(SpecialPhase {
        start: 0,
        end: 0,
        limit: 0,
        enabled: false,
    })
}

pub fn put_special(e: &Env, s: &SpecialPhase) {
    e.storage().instance().set(&k_special(), s);
}

pub fn get_special_count(e: &Env) -> u32 {
    e.storage().instance().get(&k_spec_cnt()).unwrap_or(0)
}

pub fn put_special_count(e: &Env, n: u32) {
    e.storage().instance().set(&k_spec_cnt(), &n);
}

pub fn get_names(e: &Env) -> Map<BytesN<32>, NameRecord> {
    e.storage().instance().get(&k_names()).unwrap_or(Map::new(e))
}

pub fn put_names(e: &Env, m: &Map<BytesN<32>, NameRecord>) {
    e.storage().instance().set(&k_names(), m);
}

pub fn get_approvals(e: &Env) -> Map<BytesN<32>, Address> {
    e.storage().instance().get(&k_approved()).unwrap_or(Map::new(e))
}

pub fn put_approvals(e: &Env, m: &Map<BytesN<32>, Address>) {
    e.storage().instance().set(&k_approved(), m);
}

pub fn get_stats(e: &Env) -> Map<Address, RecommendStatistics> {
    e.storage().instance().get(&k_stats()).unwrap_or(Map::new(e))
}

pub fn put_stats(e: &Env, m: &Map<Address, RecommendStatistics>) {
    e.storage().instance().set(&k_stats(), m);
}

pub fn get_referrals(e: &Env) -> Map<Address, Vec<RecommendDetail>> {
    e.storage().instance().get(&k_refs()).unwrap_or(Map::new(e))
}

pub fn put_referrals(e: &Env, m: &Map<Address, Vec<RecommendDetail>>) {
    e.storage().instance().set(&k_refs(), m);
}

pub fn get_pending(e: &Env) -> Map<(Address, u32), Vec<String>> {
    e.storage().instance().get(&k_pending()).unwrap_or(Map::new(e))
}

pub fn put_pending(e: &Env, m: &Map<(Address, u32), Vec<String>>) {
    e.storage().instance().set(&k_pending(), m);
}
