#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, String};

#[test]
fn set_and_clear_name() {
    let e = Env::default();
    e.mock_all_auths();
    let id = e.register(NameResolver, ());
    let client = NameResolverClient::new(&e, &id);
    let admin = Address::generate(&e);
    let registrar = Address::generate(&e);
    client.initialize(&admin);
    client.add_manager(&admin, &registrar);

    let node = BytesN::from_array(&e, &[7u8; 32]);
    assert_eq!(client.name(&node), String::from_str(&e, ""));

    client.set_name(&registrar, &node, &String::from_str(&e, "test"));
    assert_eq!(client.name(&node), String::from_str(&e, "test"));

    client.set_name(&registrar, &node, &String::from_str(&e, ""));
    assert_eq!(client.name(&node), String::from_str(&e, ""));
}

#[test]
fn only_managers_write() {
    let e = Env::default();
    e.mock_all_auths();
    let id = e.register(NameResolver, ());
    let client = NameResolverClient::new(&e, &id);
    let admin = Address::generate(&e);
    let stranger = Address::generate(&e);
    client.initialize(&admin);

    let node = BytesN::from_array(&e, &[7u8; 32]);
    let res = client.try_set_name(&stranger, &node, &String::from_str(&e, "test"));
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
    let res = client.try_add_manager(&stranger, &stranger);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
}
