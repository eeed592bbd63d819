#![no_std]
//! Name registrar: the admission-control state machine for top-level names.
//!
//! Labels move `Unclaimed -> Owned` through one of five paths (beforehand
//! allocation + claim windows, preempt, public, special), each gated by a
//! time window and its own authorization rule. Successful registrations
//! charge a length-tiered fee, accrue referral rebates, and synchronize the
//! underlying registry node to the new owner. The name table is the source
//! of truth for unique ownership; the registry node owner is a cache that
//! `reclaim` re-establishes after a transfer.

mod auth;
mod clients;
mod fees;
mod hash;
mod storage;
mod types;


pub use crate::auth::claim_digest;
pub use crate::types::{
    Error, FeeTier, NameRecord, RebateTier, RecommendDetail, RecommendStatistics,
    SpecialPhase, TimeWindow, GRACE, YEAR,
};

use crate::clients::{RegistryClient, ReverseClient};
use crate::storage as st;
use soroban_sdk::{
    contract, contractimpl, symbol_short, token, Address, BytesN, Env, String, Symbol, Vec,
};

/// Depth of a top-level name node: root namespace (1) -> name (2).
const NAME_DEPTH: u32 = 2;

#[contract]
pub struct NameRegistrar;

#[contractimpl]
impl NameRegistrar {
    pub fn initialize(
        e: Env,
        admin: Address,
        registry: Address,
        reverse: Address,
        base_node: BytesN<32>,
        token: Address,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&st::k_admin()) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&st::k_admin(), &admin);
        e.storage().instance().set(&st::k_registry(), &registry);
        e.storage().instance().set(&st::k_reverse(), &reverse);
        e.storage().instance().set(&st::k_base(), &base_node);
        e.storage().instance().set(&st::k_token(), &token);
        Ok(())
    }

    // Admin configuration

    pub fn add_manager(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut mgrs = st::get_managers(&e);
        mgrs.set(account, true);
        st::put_managers(&e, &mgrs);
        Ok(())
    }

    pub fn is_manager(e: Env, account: Address) -> bool {
        st::get_managers(&e).get(account).unwrap_or(false)
    }

    /// Register an ed25519 key whose claim signatures are accepted.
    pub fn add_manager_key(e: Env, caller: Address, pubkey: BytesN<32>) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut keys = st::get_manager_keys(&e);
        keys.set(pubkey, true);
        st::put_manager_keys(&e, &keys);
        Ok(())
    }

    pub fn add_preempt_whitelist(
        e: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut white = st::get_whitelist(&e);
        for a in accounts.iter() {
            white.set(a, true);
        }
        st::put_whitelist(&e, &white);
        Ok(())
    }

    /// Block labels (by hash) from every path except beforehand allocation.
    pub fn add_retains(e: Env, caller: Address, hashes: Vec<BytesN<32>>) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let mut retains = st::get_retains(&e);
        for h in hashes.iter() {
            retains.set(h, true);
        }
        st::put_retains(&e, &retains);
        Ok(())
    }

    pub fn set_regist_fees(e: Env, caller: Address, tiers: Vec<FeeTier>) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        if !fees::fees_well_formed(&tiers) {
            return Err(Error::InvalidConfig);
        }
        st::put_fees(&e, &tiers);
        Ok(())
    }

    pub fn set_rebates(e: Env, caller: Address, tiers: Vec<RebateTier>) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        if !fees::rebates_well_formed(&tiers) {
            return Err(Error::InvalidConfig);
        }
        st::put_rebates(&e, &tiers);
        Ok(())
    }

    pub fn set_first_claim_time(e: Env, caller: Address, start: u64, end: u64) -> Result<(), Error> {
        Self::set_window(&e, &caller, &st::k_win1(), start, end)
    }

    pub fn set_second_claim_time(e: Env, caller: Address, start: u64, end: u64) -> Result<(), Error> {
        Self::set_window(&e, &caller, &st::k_win2(), start, end)
    }

    pub fn set_preempt_time(e: Env, caller: Address, start: u64, end: u64) -> Result<(), Error> {
        Self::set_window(&e, &caller, &st::k_winpre(), start, end)
    }

    /// The public phase has only a start; it stays open from then on.
    pub fn set_public_time(e: Env, caller: Address, start: u64) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        st::put_public_start(&e, start);
        Ok(())
    }

    pub fn set_special(
        e: Env,
        caller: Address,
        start: u64,
        end: u64,
        limit: u32,
        enabled: bool,
    ) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        if start >= end {
            return Err(Error::InvalidConfig);
        }
        st::put_special(&e, &SpecialPhase { start, end, limit, enabled });
        Ok(())
    }

    // Admission paths

    /// Manager-only direct allocation, the single path open to retained
    /// labels. The name is owned immediately but stays pending (expiry 0)
    /// until the beneficiary claims it in round 1 or 2.
    pub fn beforehand_register(
        e: Env,
        caller: Address,
        to: Address,
        label: String,
        round: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !Self::is_manager(e.clone(), caller) {
            return Err(Error::Unauthorized);
        }
        if round != 1 && round != 2 {
            return Err(Error::InvalidConfig);
        }
        let lh = hash::label_hash(&e, &label)?;
        let mut names = st::get_names(&e);
        if Self::in_use(&e, &names, &lh) {
            return Err(Error::Using);
        }
        names.set(
            lh.clone(),
            NameRecord {
                label: label.clone(),
                duration: 1,
                recommender: hash::zero_hash(&e),
                expiry: 0,
                nft_owner: to.clone(),
            },
        );
        st::put_names(&e, &names);

        let mut pending = st::get_pending(&e);
        let mut queue = pending.get((to.clone(), round)).unwrap_or(Vec::new(&e));
        queue.push_back(label);
        pending.set((to.clone(), round), queue);
        st::put_pending(&e, &pending);

        e.events().publish((symbol_short!("advance"), lh), to);
        Ok(())
    }

    pub fn first_claim(e: Env, caller: Address) -> Result<(), Error> {
        Self::claim_round(&e, &caller, 1, &st::k_win1())
    }

    pub fn second_claim(e: Env, caller: Address) -> Result<(), Error> {
        Self::claim_round(&e, &caller, 2, &st::k_win2())
    }

    /// Allow-listed registration ahead of the public phase.
    pub fn preempt_register(
        e: Env,
        caller: Address,
        label: String,
        duration: u32,
        recommender: BytesN<32>,
        pubkey: BytesN<32>,
        sig: BytesN<64>,
        deadline: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        let now = e.ledger().timestamp();
        let win = st::get_window(&e, &st::k_winpre());
        if now < win.start || now >= win.end {
            return Err(Error::NotInTime);
        }
        if !st::get_whitelist(&e).get(caller.clone()).unwrap_or(false) {
            return Err(Error::NoPermission);
        }
        Self::paid_register(&e, &caller, label, duration, recommender, &pubkey, &sig, deadline)
    }

    /// Open registration once the public phase has started.
    pub fn register(
        e: Env,
        caller: Address,
        label: String,
        duration: u32,
        recommender: BytesN<32>,
        pubkey: BytesN<32>,
        sig: BytesN<64>,
        deadline: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        let start = st::get_public_start(&e);
        if start == 0 || e.ledger().timestamp() < start {
            return Err(Error::NotOpen);
        }
        Self::paid_register(&e, &caller, label, duration, recommender, &pubkey, &sig, deadline)
    }

    /// Fee-free registration during the special window, capped by the
    /// configured limit.
    pub fn special_register(
        e: Env,
        caller: Address,
        label: String,
        duration: u32,
        pubkey: BytesN<32>,
        sig: BytesN<64>,
        deadline: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        let now = e.ledger().timestamp();
        let phase = st::get_special(&e);
        if !phase.enabled || now < phase.start || now >= phase.end {
            return Err(Error::NotInTime);
        }
        let count = st::get_special_count(&e);
        if count >= phase.limit {
            return Err(Error::RegistrationFull);
        }
        let lh = hash::label_hash(&e, &label)?;
        if st::get_retains(&e).get(lh.clone()).unwrap_or(false) {
            return Err(Error::NotOpen);
        }
        if duration == 0 {
            return Err(Error::InvalidConfig);
        }
        let names = st::get_names(&e);
        if Self::in_use(&e, &names, &lh) {
            return Err(Error::Using);
        }
        auth::verify_claim(&e, deadline, &label, &caller, &pubkey, &sig)?;

        st::put_special_count(&e, count + 1);
        Self::finalize(&e, label, &lh, &caller, duration, hash::zero_hash(&e), now);
        Ok(())
    }

    // Post-registration operations

    /// Extend a name by `extra` years from its stored expiry (not from
    /// now). The new validity window cascades to the node's direct
    /// children. Open to any caller.
    pub fn renew(e: Env, caller: Address, label: String, extra: u32) -> Result<(), Error> {
        caller.require_auth();
        if extra == 0 {
            return Err(Error::InvalidConfig);
        }
        let lh = hash::label_hash(&e, &label)?;
        let mut names = st::get_names(&e);
        let mut rec = names.get(lh.clone()).ok_or(Error::NotFound)?;
        // a pending beforehand allocation has no registry node to extend
        if rec.expiry == 0 {
            return Err(Error::NotOpen);
        }
        rec.expiry += extra as u64 * YEAR;
        rec.duration += extra;
        let expiry = rec.expiry;
        names.set(lh.clone(), rec);
        st::put_names(&e, &names);

        let me = e.current_contract_address();
        let node = hash::sub_node(&e, &st::get_base_node(&e), &lh);
        RegistryClient::new(&e, &st::get_registry(&e)).set_expiry(&me, &node, &(expiry + GRACE));

        e.events().publish((symbol_short!("renew"), lh), expiry);
        Ok(())
    }

    /// Pay out the caller's accrued, unclaimed rebates.
    pub fn claim_rewards(e: Env, caller: Address) -> i128 {
        caller.require_auth();
        let mut stats = st::get_stats(&e);
        let mut s = stats.get(caller.clone()).unwrap_or(Self::zero_stats());
        let amount = s.total_rebate_earned - s.total_rebate_claimed;
        if amount > 0 {
            let me = e.current_contract_address();
            token::Client::new(&e, &st::get_token(&e)).transfer(&me, &caller, &amount);
        }
        s.total_rebate_claimed = s.total_rebate_earned;
        stats.set(caller.clone(), s);
        st::put_stats(&e, &stats);

        e.events().publish((symbol_short!("rewards"), caller), amount);
        amount
    }

    /// Move accumulated fees out of the registrar. Admin only.
    pub fn withdraw_fee(e: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_admin(&e, &caller)?;
        let me = e.current_contract_address();
        token::Client::new(&e, &st::get_token(&e)).transfer(&me, &to, &amount);

        e.events().publish((symbol_short!("withdraw"), to), amount);
        Ok(())
    }

    /// Approve one account to transfer the name on the owner's behalf.
    pub fn approve(
        e: Env,
        caller: Address,
        label_hash: BytesN<32>,
        operator: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let names = st::get_names(&e);
        let rec = names.get(label_hash.clone()).ok_or(Error::NotFound)?;
        if caller != rec.nft_owner {
            return Err(Error::Unauthorized);
        }
        let mut approvals = st::get_approvals(&e);
        approvals.set(label_hash, operator);
        st::put_approvals(&e, &approvals);
        Ok(())
    }

    /// Reassign unique ownership. The registry node's owner is left alone;
    /// the new owner re-synchronizes it with `reclaim`.
    pub fn transfer(
        e: Env,
        caller: Address,
        to: Address,
        label_hash: BytesN<32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let mut names = st::get_names(&e);
        let mut rec = names.get(label_hash.clone()).ok_or(Error::NotFound)?;
        let mut approvals = st::get_approvals(&e);
        let approved = approvals.get(label_hash.clone());
        if caller != rec.nft_owner && approved != Some(caller) {
            return Err(Error::Unauthorized);
        }
        rec.nft_owner = to.clone();
        names.set(label_hash.clone(), rec);
        st::put_names(&e, &names);
        approvals.remove(label_hash.clone());
        st::put_approvals(&e, &approvals);

        e.events().publish((symbol_short!("transfer"), label_hash), to);
        Ok(())
    }

    /// Re-point the registry node at the current unique owner. Tears down
    /// the node's direct sub-tree: delegation does not survive a transfer.
    pub fn reclaim(e: Env, caller: Address, label: String) -> Result<(), Error> {
        caller.require_auth();
        let lh = hash::label_hash(&e, &label)?;
        let rec = st::get_names(&e).get(lh.clone()).ok_or(Error::NotFound)?;
        if caller != rec.nft_owner {
            return Err(Error::Unauthorized);
        }
        let me = e.current_contract_address();
        let node = hash::sub_node(&e, &st::get_base_node(&e), &lh);
        RegistryClient::new(&e, &st::get_registry(&e)).reclaim_node(&me, &node, &caller);

        e.events().publish((symbol_short!("reclaim"), lh), caller);
        Ok(())
    }

    /// Atomic transfer + reclaim, additionally clearing the previous
    /// owner's reverse display name.
    pub fn merge_transfer(e: Env, caller: Address, label: String, to: Address) -> Result<(), Error> {
        caller.require_auth();
        let lh = hash::label_hash(&e, &label)?;
        let mut names = st::get_names(&e);
        let mut rec = names.get(lh.clone()).ok_or(Error::NotFound)?;
        if caller != rec.nft_owner {
            return Err(Error::Unauthorized);
        }
        let prev = rec.nft_owner.clone();
        rec.nft_owner = to.clone();
        names.set(lh.clone(), rec);
        st::put_names(&e, &names);
        let mut approvals = st::get_approvals(&e);
        approvals.remove(lh.clone());
        st::put_approvals(&e, &approvals);

        let me = e.current_contract_address();
        let node = hash::sub_node(&e, &st::get_base_node(&e), &lh);
        RegistryClient::new(&e, &st::get_registry(&e)).reclaim_node(&me, &node, &to);
        ReverseClient::new(&e, &st::get_reverse(&e)).clear_name(&me, &prev);

        e.events().publish((symbol_short!("merge"), lh), to);
        Ok(())
    }

    // Queries

    pub fn owner_of(e: Env, label_hash: BytesN<32>) -> Result<Address, Error> {
        st::get_names(&e)
            .get(label_hash)
            .map(|r| r.nft_owner)
            .ok_or(Error::NotFound)
    }

    pub fn regist_details(e: Env, label_hash: BytesN<32>) -> Option<NameRecord> {
        st::get_names(&e).get(label_hash)
    }

    pub fn expiries(e: Env, label_hash: BytesN<32>) -> u64 {
        st::get_names(&e).get(label_hash).map(|r| r.expiry).unwrap_or(0)
    }

    pub fn recommend_statistics(e: Env, account: Address) -> RecommendStatistics {
        st::get_stats(&e).get(account).unwrap_or(Self::zero_stats())
    }

    pub fn get_recommend_details(e: Env, account: Address) -> Vec<RecommendDetail> {
        st::get_referrals(&e).get(account).unwrap_or(Vec::new(&e))
    }

    pub fn special_registered(e: Env) -> u32 {
        st::get_special_count(&e)
    }

    // Internals

    fn require_admin(e: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != st::get_admin(e) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn set_window(e: &Env, caller: &Address, k: &Symbol, start: u64, end: u64) -> Result<(), Error> {
        Self::require_admin(e, caller)?;
        if start >= end {
            return Err(Error::InvalidConfig);
        }
        st::put_window(e, k, &TimeWindow { start, end });
        Ok(())
    }

    /// A label is in use while its name record exists and the grace period
    /// after expiry has not elapsed. Pending beforehand allocations
    /// (expiry 0) are always in use.
    fn in_use(e: &Env, names: &soroban_sdk::Map<BytesN<32>, NameRecord>, lh: &BytesN<32>) -> bool {
        match names.get(lh.clone()) {
            None => false,
            Some(rec) => rec.expiry == 0 || e.ledger().timestamp() < rec.expiry + GRACE,
        }
    }

    /// Shared tail of the fee-charging paths: retained/availability checks,
    /// claim verification, payment, rebate accrual, finalization.
    fn paid_register(
        e: &Env,
        caller: &Address,
        label: String,
        duration: u32,
        recommender: BytesN<32>,
        pubkey: &BytesN<32>,
        sig: &BytesN<64>,
        deadline: u64,
    ) -> Result<(), Error> {
        let lh = hash::label_hash(e, &label)?;
        if st::get_retains(e).get(lh.clone()).unwrap_or(false) {
            return Err(Error::NotOpen);
        }
        if duration == 0 {
            return Err(Error::InvalidConfig);
        }
        let tiers = st::get_fees(e);
        // no price list, no sale
        if tiers.is_empty() {
            return Err(Error::NotOpen);
        }
        let names = st::get_names(e);
        if Self::in_use(e, &names, &lh) {
            return Err(Error::Using);
        }
        auth::verify_claim(e, deadline, &label, caller, pubkey, sig)?;

        let fee = fees::base_fee(&tiers, label.len()) * duration as i128;
        let me = e.current_contract_address();
        if fee > 0 {
            token::Client::new(e, &st::get_token(e)).transfer_from(&me, caller, &me, &fee);
        }
        Self::accrue_rebate(e, &label, &lh, &recommender, fee);
        Self::finalize(e, label, &lh, caller, duration, recommender, e.ledger().timestamp());
        Ok(())
    }

    /// Credit the recommender's statistics. The rate reflects the referral
    /// about to be counted; the payer still pays the full fee, the rebate
    /// is an internal accrual against the registrar balance.
    fn accrue_rebate(e: &Env, label: &String, lh: &BytesN<32>, recommender: &BytesN<32>, fee: i128) {
        if *recommender == hash::zero_hash(e) || fee <= 0 {
            return;
        }
        let registry = RegistryClient::new(e, &st::get_registry(e));
        let owner = match registry.current_owner(recommender) {
            Some(owner) => owner,
            None => return,
        };
        let mut stats = st::get_stats(e);
        let mut s = stats.get(owner.clone()).unwrap_or(Self::zero_stats());
        let rate = fees::rebate_rate(&st::get_rebates(e), s.referral_count + 1);
        s.referral_count += 1;
        s.total_rebate_earned += fee * rate as i128 / 100;
        stats.set(owner.clone(), s);
        st::put_stats(e, &stats);

        let mut referrals = st::get_referrals(e);
        let mut details = referrals.get(owner.clone()).unwrap_or(Vec::new(e));
        details.push_back(RecommendDetail { label: label.clone(), label_hash: lh.clone() });
        referrals.set(owner, details);
        st::put_referrals(e, &referrals);
    }

    /// Write the name record and synchronize the registry: node owner, node
    /// expiry (with grace) and the default `{"ETH":"<address>"}` record.
    fn finalize(
        e: &Env,
        label: String,
        lh: &BytesN<32>,
        owner: &Address,
        duration: u32,
        recommender: BytesN<32>,
        now: u64,
    ) {
        let expiry = now + duration as u64 * YEAR;
        let mut names = st::get_names(e);
        names.set(
            lh.clone(),
            NameRecord {
                label: label.clone(),
                duration,
                recommender,
                expiry,
                nft_owner: owner.clone(),
            },
        );
        st::put_names(e, &names);
        Self::sync_registry(e, &label, lh, owner, expiry);

        e.events().publish((symbol_short!("register"), lh.clone()), (owner.clone(), expiry));
    }

    fn sync_registry(e: &Env, label: &String, lh: &BytesN<32>, owner: &Address, expiry: u64) {
        let me = e.current_contract_address();
        let registry = RegistryClient::new(e, &st::get_registry(e));
        let node = hash::sub_node(e, &st::get_base_node(e), lh);
        registry.set_node(&me, &node, label, owner, &(expiry + GRACE), &NAME_DEPTH);
        registry.set_text(&me, &node, &Self::eth_text(e, owner));
    }

    /// Activate every label queued for the caller in `round`. The registry
    /// node is synchronized to the record's current owner, which may differ
    /// from the caller when a pending allocation was transferred.
    fn claim_round(e: &Env, caller: &Address, round: u32, win_key: &Symbol) -> Result<(), Error> {
        caller.require_auth();
        let now = e.ledger().timestamp();
        let win = st::get_window(e, win_key);
        if now < win.start || now >= win.end {
            return Err(Error::NotInTime);
        }
        let mut pending = st::get_pending(e);
        let queue = pending.get((caller.clone(), round)).unwrap_or(Vec::new(e));
        if queue.is_empty() {
            return Err(Error::NoPermission);
        }
        let mut names = st::get_names(e);
        for label in queue.iter() {
            let lh = match hash::label_hash(e, &label) {
                Ok(lh) => lh,
                Err(_) => continue,
            };
            let mut rec = match names.get(lh.clone()) {
                Some(rec) => rec,
                None => continue,
            };
            rec.expiry = now + rec.duration as u64 * YEAR;
            let expiry = rec.expiry;
            let owner = rec.nft_owner.clone();
            names.set(lh.clone(), rec);
            Self::sync_registry(e, &label, &lh, &owner, expiry);

            e.events().publish((symbol_short!("claim"), lh), (owner, round));
        }
        st::put_names(e, &names);
        pending.remove((caller.clone(), round));
        st::put_pending(e, &pending);
        Ok(())
    }

    /// Default text record exposing the owner's address.
    fn eth_text(e: &Env, owner: &Address) -> String {
        let s = owner.to_string();
        let len = s.len() as usize;
        let mut buf = [0u8; 96];
        let prefix = b"{\"ETH\":\"";
        buf[..prefix.len()].copy_from_slice(prefix);
        s.copy_into_slice(&mut buf[prefix.len()..prefix.len() + len]);
        buf[prefix.len() + len] = b'"';
        buf[prefix.len() + len + 1] = b'}';
        String::from_bytes(e, &buf[..prefix.len() + len + 2])
    }

    fn zero_stats() -> RecommendStatistics {
        RecommendStatistics {
            referral_count: 0,
            total_rebate_earned: 0,
            total_rebate_claimed: 0,
        }
    }
}
