use super::*;

fn product(id: &str, in_stock: bool) -> Product {
    Product {
        id: id.to_owned(),
        name: format!("Product {id}"),
        description: None,
        category: None,
        collection: None,
        in_stock,
        image: None,
        price: None,
    }
}

fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

#[test]
fn add_inserts_in_stock_product_with_quantity_one() {
    let mut cart = CartStore::new();
    assert!(cart.add(&product("a", true)));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.list()[0].quantity.get(), 1);
    assert!(cart.contains("a"));
}

#[test]
fn adding_same_product_twice_is_idempotent() {
    let mut cart = CartStore::new();
    assert!(cart.add(&product("a", true)));
    assert!(!cart.add(&product("a", true)));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.list()[0].quantity.get(), 1, "re-add must not accumulate");
}

#[test]
fn out_of_stock_product_is_not_added() {
    let mut cart = CartStore::new();
    assert!(!cart.add(&product("a", false)));
    assert!(cart.is_empty());
}

#[test]
fn remove_absent_id_is_noop() {
    let mut cart = CartStore::new();
    cart.add(&product("a", true));
    assert!(!cart.remove("zzz"));
    assert_eq!(cart.len(), 1);
}

#[test]
fn remove_present_id_deletes_entry() {
    let mut cart = CartStore::new();
    cart.add(&product("a", true));
    cart.add(&product("b", true));
    assert!(cart.remove("a"));
    assert!(!cart.contains("a"));
    assert_eq!(cart.list()[0].product_id(), "b");
}

#[test]
fn clear_always_yields_empty_list() {
    let mut cart = CartStore::new();
    cart.clear();
    assert!(cart.list().is_empty());

    cart.add(&product("a", true));
    cart.add(&product("b", true));
    cart.clear();
    assert!(cart.list().is_empty());
}

#[test]
fn list_preserves_insertion_order() {
    let mut cart = CartStore::new();
    for id in ["c", "a", "b"] {
        cart.add(&product(id, true));
    }
    let ids: Vec<&str> = cart.list().iter().map(CartItem::product_id).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn set_quantity_updates_present_item_only() {
    let mut cart = CartStore::new();
    cart.add(&product("a", true));
    assert!(cart.set_quantity("a", qty(3)));
    assert_eq!(cart.list()[0].quantity.get(), 3);
    assert!(!cart.set_quantity("missing", qty(2)));
    assert_eq!(cart.len(), 1);
}

#[test]
fn subscriber_sees_effective_changes_only() {
    let mut cart = CartStore::new();
    let mut rx = cart.subscribe();
    assert!(!rx.has_changed().unwrap());

    cart.add(&product("a", true));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().items.len(), 1);

    cart.add(&product("a", true));
    cart.remove("missing");
    cart.add(&product("b", false));
    assert!(!rx.has_changed().unwrap(), "no-op mutations must not notify");

    cart.clear();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().items.is_empty());

    cart.clear();
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn snapshot_round_trip_restores_contents() {
    let mut cart = CartStore::new();
    cart.add(&product("a", true));
    cart.add(&product("b", true));
    cart.set_quantity("b", qty(2));

    let restored = CartStore::from_snapshot(cart.snapshot());
    assert_eq!(restored.list(), cart.list());
}

#[test]
fn from_snapshot_drops_duplicate_ids() {
    let item = CartItem {
        product: product("a", true),
        quantity: qty(1),
    };
    let mut dup = item.clone();
    dup.quantity = qty(5);
    let cart = CartStore::from_snapshot(CartSnapshot {
        items: vec![item, dup],
    });
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.list()[0].quantity.get(), 1);
}

#[test]
fn snapshot_deserializes_quantity_zero_as_error() {
    let json = serde_json::json!({
        "items": [{ "product": { "id": "a", "name": "A", "inStock": true }, "quantity": 0 }]
    });
    assert!(serde_json::from_value::<CartSnapshot>(json).is_err());
}
