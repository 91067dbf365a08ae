use std::num::NonZeroU32;

use vitrina_core::Product;

use super::*;

fn product(id: &str) -> Product {
    Product {
        id: id.to_owned(),
        name: format!("Figure {id}"),
        description: None,
        category: Some("anime".to_owned()),
        collection: Some("figures".to_owned()),
        in_stock: true,
        image: None,
        price: None,
    }
}

#[test]
fn missing_session_loads_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let sessions = CartSessions::new(dir.path());

    let cart = sessions.load("never-saved").unwrap();
    assert!(cart.is_empty());
}

#[test]
fn saved_cart_loads_back_with_quantities_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let sessions = CartSessions::new(dir.path().join("carts"));

    let mut cart = CartStore::new();
    cart.add(&product("b"));
    cart.add(&product("a"));
    cart.set_quantity("a", NonZeroU32::new(3).unwrap());
    sessions.save("s1", &cart).unwrap();

    let loaded = sessions.load("s1").unwrap();
    let ids: Vec<&str> = loaded.list().iter().map(|i| i.product_id()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(loaded.list()[1].quantity.get(), 3);
    assert!(!sessions.path_for("s1").with_extension("json.tmp").exists());
}

#[test]
fn corrupt_cart_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let sessions = CartSessions::new(dir.path());
    std::fs::write(sessions.path_for("bad"), b"{not json").unwrap();

    let err = sessions.load("bad").unwrap_err();
    assert!(err.to_string().contains("failed to parse cart file"));
}

#[test]
fn resolve_id_mints_uuid_when_absent() {
    let id = CartSessions::resolve_id(None).unwrap();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

#[test]
fn resolve_id_rejects_path_like_ids() {
    for bad in ["", "../etc", "a/b", "a b", "x.json"] {
        assert!(
            CartSessions::resolve_id(Some(bad)).is_err(),
            "expected '{bad}' to be rejected"
        );
    }
    assert_eq!(CartSessions::resolve_id(Some("shop_1-A")).unwrap(), "shop_1-A");
}
