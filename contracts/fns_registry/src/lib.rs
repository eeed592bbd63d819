#![no_std]
//! FNS registry: the hierarchical, ownership-tracked namespace tree.
//!
//! Nodes are keyed by namespace hash (keccak over the dotted path). Owners
//! manage their own subtrees; the registrar and reverse registrar are added
//! as managers and use the privileged entry points (`set_node`,
//! `reclaim_node`, `set_expiry`) to keep top-level names and reverse
//! records in sync.

mod hash;
mod storage;
mod types;


pub use crate::hash::{label_hash, sub_node, zero_hash};
pub use crate::types::{Error, Node, MAX_DEPTH, MAX_SUBNODES};

use crate::storage as st;
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, BytesN, Env, Map, String, Vec,
};

#[contract]
pub struct FnsRegistry;

#[contractimpl]
impl FnsRegistry {
    pub fn initialize(e: Env, admin: Address) -> Result<(), Error> {
        if e.storage().instance().has(&st::k_admin()) {
            return Err(Error::AlreadyInitialized);
        }
        e.storage().instance().set(&st::k_admin(), &admin);
        Ok(())
    }

    /// Grant manager rights (registrar / reverse registrar). Admin only.
    pub fn add_manager(e: Env, caller: Address, account: Address) -> Result<(), Error> {
        caller.require_auth();
        if caller != st::get_admin(&e) {
            return Err(Error::Unauthorized);
        }
        let mut mgrs = st::get_managers(&e);
        mgrs.set(account, true);
        st::put_managers(&e, &mgrs);
        Ok(())
    }

    pub fn is_manager(e: Env, account: Address) -> bool {
        st::get_managers(&e).get(account).unwrap_or(false)
    }

    /// Create (or overwrite) a child of `parent` and hand it to `new_owner`.
    ///
    /// Caller must be the parent's owner, an approved operator of the
    /// parent, or a manager; creating directly under the zero root takes
    /// admin/manager rights. Enforces the depth and fan-out caps.
    pub fn create_subnode(
        e: Env,
        caller: Address,
        parent: BytesN<32>,
        label: String,
        label_hash: BytesN<32>,
        new_owner: Address,
    ) -> Result<BytesN<32>, Error> {
        caller.require_auth();
        if label.len() > hash::MAX_LABEL_LEN {
            return Err(Error::LabelTooLong);
        }
        let zero = hash::zero_hash(&e);
        let mut nodes = st::get_nodes(&e);
        let (depth, inherited_expiry) = if parent == zero {
            if !Self::is_admin_or_manager(&e, &caller) {
                return Err(Error::Unauthorized);
            }
            (1u32, 0u64)
        } else {
            let pnode = nodes.get(parent.clone()).ok_or(Error::NotFound)?;
            if !Self::may_act(&e, &caller, &parent, &pnode.owner) {
                return Err(Error::Unauthorized);
            }
            if pnode.depth >= MAX_DEPTH {
                return Err(Error::DepthExceeded);
            }
            (pnode.depth + 1, pnode.expiry)
        };

        let node = hash::sub_node(&e, &parent, &label_hash);
        let mut kids = st::get_kids(&e);
        let mut sibs = kids.get(parent.clone()).unwrap_or(Vec::new(&e));
        if sibs.first_index_of(&node).is_none() {
            if sibs.len() >= MAX_SUBNODES {
                return Err(Error::FanoutExceeded);
            }
            sibs.push_back(node.clone());
        }

        nodes.set(
            node.clone(),
            Node {
                owner: new_owner.clone(),
                resolver: None,
                ttl: 0,
                parent: parent.clone(),
                label,
                depth,
                expiry: inherited_expiry,
            },
        );
        st::put_nodes(&e, &nodes);
        kids.set(parent, sibs);
        st::put_kids(&e, &kids);

        e.events().publish((symbol_short!("sub_new"), node.clone()), new_owner);
        Ok(node)
    }

    /// Delete a node: unlink it from the parent's children and clear its
    /// label, records and operator grants. Direct children entries are
    /// swept as well; the depth cap bounds the cascade.
    pub fn del_subnode(e: Env, caller: Address, node: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();
        let mut nodes = st::get_nodes(&e);
        let rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        if caller != rec.owner {
            return Err(Error::Unauthorized);
        }
        let mut kids = st::get_kids(&e);
        if let Some(mut sibs) = kids.get(rec.parent.clone()) {
            if let Some(i) = sibs.first_index_of(&node) {
                sibs.remove(i);
            }
            kids.set(rec.parent.clone(), sibs);
        }
        Self::drop_subtree(&e, &mut nodes, &mut kids, &node);
        nodes.remove(node.clone());
        st::put_nodes(&e, &nodes);
        st::put_kids(&e, &kids);

        e.events().publish((symbol_short!("sub_del"), node), ());
        Ok(())
    }

    /// Privileged upsert for nodes outside the public fan-out discipline:
    /// top-level names written by the registrar, reverse records written by
    /// the reverse registrar. The node is parentless (zero sentinel) and
    /// any stale subtree under it is swept.
    pub fn set_node(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        label: String,
        owner: Address,
        expiry: u64,
        depth: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !Self::is_manager_acct(&e, &caller) {
            return Err(Error::Unauthorized);
        }
        if label.len() > hash::MAX_LABEL_LEN {
            return Err(Error::LabelTooLong);
        }
        let mut nodes = st::get_nodes(&e);
        let mut kids = st::get_kids(&e);
        Self::drop_subtree(&e, &mut nodes, &mut kids, &node);
        nodes.set(
            node.clone(),
            Node {
                owner: owner.clone(),
                resolver: None,
                ttl: 0,
                parent: hash::zero_hash(&e),
                label,
                depth,
                expiry,
            },
        );
        st::put_nodes(&e, &nodes);
        st::put_kids(&e, &kids);

        e.events().publish((symbol_short!("node_set"), node), owner);
        Ok(())
    }

    /// Re-point a node's owner after an NFT transfer. Tears down the direct
    /// sub-tree: sub-delegation trust does not carry over to the new owner.
    pub fn reclaim_node(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        new_owner: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !Self::is_manager_acct(&e, &caller) {
            return Err(Error::Unauthorized);
        }
        let mut nodes = st::get_nodes(&e);
        let mut rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        let mut kids = st::get_kids(&e);
        Self::drop_subtree(&e, &mut nodes, &mut kids, &node);
        let mut ops = st::get_ops(&e);
        ops.remove(node.clone());
        st::put_ops(&e, &ops);
        rec.owner = new_owner.clone();
        nodes.set(node.clone(), rec);
        st::put_nodes(&e, &nodes);
        st::put_kids(&e, &kids);

        e.events().publish((symbol_short!("reclaim"), node), new_owner);
        Ok(())
    }

    /// Set a node's expiry and propagate it to every direct child.
    pub fn set_expiry(e: Env, caller: Address, node: BytesN<32>, expiry: u64) -> Result<(), Error> {
        caller.require_auth();
        if !Self::is_manager_acct(&e, &caller) {
            return Err(Error::Unauthorized);
        }
        let mut nodes = st::get_nodes(&e);
        let mut rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        rec.expiry = expiry;
        nodes.set(node.clone(), rec);
        if let Some(children) = st::get_kids(&e).get(node.clone()) {
            for c in children.iter() {
                if let Some(mut child) = nodes.get(c.clone()) {
                    child.expiry = expiry;
                    nodes.set(c, child);
                }
            }
        }
        st::put_nodes(&e, &nodes);

        e.events().publish((symbol_short!("expiry"), node), expiry);
        Ok(())
    }

    pub fn set_resolver(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        resolver: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let mut nodes = st::get_nodes(&e);
        let mut rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        if !Self::may_act(&e, &caller, &node, &rec.owner) {
            return Err(Error::Unauthorized);
        }
        rec.resolver = Some(resolver);
        nodes.set(node, rec);
        st::put_nodes(&e, &nodes);
        Ok(())
    }

    pub fn set_ttl(e: Env, caller: Address, node: BytesN<32>, ttl: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut nodes = st::get_nodes(&e);
        let mut rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        if !Self::may_act(&e, &caller, &node, &rec.owner) {
            return Err(Error::Unauthorized);
        }
        rec.ttl = ttl;
        nodes.set(node, rec);
        st::put_nodes(&e, &nodes);
        Ok(())
    }

    /// Write the node's text record (owner, operator or manager).
    pub fn set_text(e: Env, caller: Address, node: BytesN<32>, text: String) -> Result<(), Error> {
        caller.require_auth();
        let nodes = st::get_nodes(&e);
        let rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        if !Self::may_act(&e, &caller, &node, &rec.owner) {
            return Err(Error::Unauthorized);
        }
        let mut texts = st::get_texts(&e);
        texts.set(node.clone(), text);
        st::put_texts(&e, &texts);

        e.events().publish((symbol_short!("text"), node), ());
        Ok(())
    }

    /// Grant or revoke an operator for the node. Owner only; a node may
    /// hold several operators.
    pub fn set_approval_for_all(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        let nodes = st::get_nodes(&e);
        let rec = nodes.get(node.clone()).ok_or(Error::NotFound)?;
        if caller != rec.owner {
            return Err(Error::Unauthorized);
        }
        let mut ops = st::get_ops(&e);
        let mut grants = ops.get(node.clone()).unwrap_or(Vec::new(&e));
        match grants.first_index_of(&operator) {
            None if approved => grants.push_back(operator),
            Some(i) if !approved => {
                grants.remove(i);
            }
            _ => {}
        }
        ops.set(node, grants);
        st::put_ops(&e, &ops);
        Ok(())
    }

    pub fn is_approved_for_all(e: Env, node: BytesN<32>, operator: Address) -> bool {
        st::get_ops(&e)
            .get(node)
            .map(|grants| grants.first_index_of(&operator).is_some())
            .unwrap_or(false)
    }

    // Queries

    pub fn current_owner(e: Env, node: BytesN<32>) -> Option<Address> {
        st::get_nodes(&e).get(node).map(|n| n.owner)
    }

    pub fn current_resolver(e: Env, node: BytesN<32>) -> Option<Address> {
        st::get_nodes(&e).get(node).and_then(|n| n.resolver)
    }

    pub fn current_text(e: Env, node: BytesN<32>) -> String {
        st::get_texts(&e).get(node).unwrap_or(String::from_str(&e, ""))
    }

    /// Parent namespace hash, or the zero sentinel.
    pub fn parent_relations(e: Env, node: BytesN<32>) -> BytesN<32> {
        st::get_nodes(&e)
            .get(node)
            .map(|n| n.parent)
            .unwrap_or(hash::zero_hash(&e))
    }

    /// Ordered child hashes.
    pub fn get_sub_relations(e: Env, node: BytesN<32>) -> Vec<BytesN<32>> {
        st::get_kids(&e).get(node).unwrap_or(Vec::new(&e))
    }

    pub fn sub_details(e: Env, node: BytesN<32>) -> Option<Node> {
        st::get_nodes(&e).get(node)
    }

    // Helpers

    fn is_admin_or_manager(e: &Env, caller: &Address) -> bool {
        *caller == st::get_admin(e) || Self::is_manager_acct(e, caller)
    }

    fn is_manager_acct(e: &Env, caller: &Address) -> bool {
        st::get_managers(e).get(caller.clone()).unwrap_or(false)
    }

    fn may_act(e: &Env, caller: &Address, node: &BytesN<32>, owner: &Address) -> bool {
        if caller == owner || Self::is_manager_acct(e, caller) {
            return true;
        }
        st::get_ops(e)
            .get(node.clone())
            .map(|grants| grants.first_index_of(caller).is_some())
            .unwrap_or(false)
    }

    /// Remove every direct child's entry, text record, operator list and
    /// children set, then clear the node's own children set.
    fn drop_subtree(
        e: &Env,
        nodes: &mut Map<BytesN<32>, Node>,
        kids: &mut Map<BytesN<32>, Vec<BytesN<32>>>,
        node: &BytesN<32>,
    ) {
        let mut texts = st::get_texts(e);
        let mut ops = st::get_ops(e);
        if let Some(children) = kids.get(node.clone()) {
            for c in children.iter() {
                nodes.remove(c.clone());
                texts.remove(c.clone());
                ops.remove(c.clone());
                kids.remove(c);
            }
        }
        kids.remove(node.clone());
        texts.remove(node.clone());
        st::put_texts(e, &texts);
        st::put_ops(e, &ops);
    }
}
