//! Cart behavior across whole user sessions.

use foodcart_commerce::cart::price_line;
use foodcart_commerce::prelude::*;
use proptest::prelude::*;

fn add(cart: &mut Cart, item: &str, price: u64, quantity: i64, add_ons: Vec<AddOn>) -> LineId {
    cart.add_line(ItemId::new(item), item, Money::new(price), quantity, add_ons, "")
        .unwrap()
        .id()
        .clone()
}

fn assert_line_totals(cart: &Cart) {
    for line in cart.lines() {
        let expected = price_line(line.base_unit_price(), line.add_ons(), line.quantity()).unwrap();
        assert_eq!(line.line_total(), expected);
    }
}

#[test]
fn session_add_change_remove_clear() {
    let mut cart = Cart::new();

    let x = add(&mut cart, "x", 300, 1, Vec::new());
    assert_eq!(cart.grand_total(), Money::new(300));

    cart.change_quantity(&x, QuantityDelta::Increment).unwrap();
    assert_eq!(cart.grand_total(), Money::new(600));

    let y = add(
        &mut cart,
        "y",
        200,
        1,
        vec![AddOn::new("Sauce", "garlic", Money::new(50))],
    );
    assert_eq!(cart.get_line(&y).unwrap().line_total(), Money::new(250));
    assert_eq!(cart.grand_total(), Money::new(850));

    cart.remove_line(&x).unwrap();
    assert_eq!(cart.grand_total(), Money::new(250));
    assert_eq!(cart.item_count(), 1);

    cart.clear();
    assert_eq!(cart.grand_total(), Money::ZERO);
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn rapid_adds_of_same_item_get_distinct_ids() {
    let mut cart = Cart::new();
    let ids: Vec<LineId> = (0..100).map(|_| add(&mut cart, "pizza", 300, 1, Vec::new())).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn removing_unknown_line_leaves_cart_unchanged() {
    let mut cart = Cart::new();
    add(&mut cart, "a", 100, 2, Vec::new());
    let before = cart.snapshot_for_display();

    let err = cart.remove_line(&LineId::new("nope")).unwrap_err();
    assert_eq!(err, CommerceError::LineNotFound("nope".to_string()));
    assert_eq!(cart.snapshot_for_display(), before);
}

#[test]
fn menu_selection_into_cart() {
    let item = MenuItem::new("roll", "Roll", Money::new(250))
        .with_image("roll.jpg")
        .with_add_on(AddOn::new("Sauce", "spicy mayo", Money::new(30)))
        .with_add_on(AddOn::new("Ginger", "pickled", Money::new(20)));

    let mut selection = ItemSelection::new(&item);
    selection.increment();
    selection.toggle_add_on(1).unwrap();
    let preview = selection.preview_total().unwrap();

    let mut cart = Cart::new();
    let line = cart.add_selection(&selection).unwrap();
    assert_eq!(line.line_total(), preview);
    assert_eq!(line.line_total(), Money::new(540));
    assert_eq!(line.image(), "roll.jpg");
    assert_eq!(line.item_id(), &ItemId::new("roll"));

    let snapshot = cart.snapshot_for_display();
    assert_eq!(snapshot[0].add_ons_text, "Ginger (pickled)");
}

fn arb_add_on() -> impl Strategy<Value = AddOn> {
    (0u64..500).prop_map(|price| AddOn::new("extra", "stuff", Money::new(price)))
}

fn arb_line() -> impl Strategy<Value = (u64, i64, Vec<AddOn>)> {
    (0u64..5_000, 1i64..20, prop::collection::vec(arb_add_on(), 0..4))
}

proptest! {
    #[test]
    fn prop_counts_and_totals_match_adds(lines in prop::collection::vec(arb_line(), 0..12)) {
        let mut cart = Cart::new();
        let mut expected_count = 0;
        let mut expected_total = 0u64;

        for (i, (price, quantity, add_ons)) in lines.into_iter().enumerate() {
            let line_total = price_line(Money::new(price), &add_ons, quantity).unwrap();
            expected_count += quantity;
            expected_total += line_total.amount();
            add(&mut cart, &format!("item{i}"), price, quantity, add_ons);
        }

        prop_assert_eq!(cart.item_count(), expected_count);
        prop_assert_eq!(cart.grand_total(), Money::new(expected_total));
    }

    #[test]
    fn prop_line_totals_hold_after_quantity_changes(
        lines in prop::collection::vec(arb_line(), 1..6),
        steps in prop::collection::vec((0usize..6, any::<bool>()), 0..30),
    ) {
        let mut cart = Cart::new();
        let ids: Vec<LineId> = lines
            .into_iter()
            .enumerate()
            .map(|(i, (price, quantity, add_ons))| add(&mut cart, &format!("item{i}"), price, quantity, add_ons))
            .collect();

        for (pick, up) in steps {
            let id = &ids[pick % ids.len()];
            let before = cart.get_line(id).unwrap().quantity();
            let delta = if up { QuantityDelta::Increment } else { QuantityDelta::Decrement };
            let after = cart.change_quantity(id, delta).unwrap().quantity();

            prop_assert!(after >= 1);
            if up {
                prop_assert_eq!(after, before + 1);
            } else {
                prop_assert_eq!(after, (before - 1).max(1));
            }
            assert_line_totals(&cart);
        }
    }

    #[test]
    fn prop_removal_order_does_not_matter(
        count in 2usize..8,
        a in 0usize..8,
        b in 0usize..8,
    ) {
        let a = a % count;
        let b = b % count;
        prop_assume!(a != b);

        let mut first = Cart::new();
        let ids: Vec<LineId> = (0..count)
            .map(|i| add(&mut first, &format!("item{i}"), 100 + i as u64, 1, Vec::new()))
            .collect();
        let mut second = first.clone();

        first.remove_line(&ids[a]).unwrap();
        first.remove_line(&ids[b]).unwrap();
        second.remove_line(&ids[b]).unwrap();
        second.remove_line(&ids[a]).unwrap();

        prop_assert_eq!(first.lines(), second.lines());
    }
}

#[test]
fn overflowing_adds_are_rejected_whole() {
    let mut cart = Cart::new();
    let priced = add(&mut cart, "caviar", u64::MAX, 1, Vec::new());
    let free = add(&mut cart, "water", 0, i64::MAX - 1, Vec::new());
    let before = cart.lines().to_vec();

    assert_eq!(
        cart.add_line(ItemId::new("tea"), "tea", Money::new(1), 1, Vec::new(), "")
            .unwrap_err(),
        CommerceError::Overflow
    );
    assert_eq!(
        cart.change_quantity(&free, QuantityDelta::Increment).unwrap_err(),
        CommerceError::Overflow
    );
    assert_eq!(
        cart.change_quantity(&priced, QuantityDelta::Increment).unwrap_err(),
        CommerceError::Overflow
    );

    assert_eq!(cart.lines(), before.as_slice());
    assert_eq!(cart.item_count(), i64::MAX);
    assert_eq!(cart.grand_total(), Money::new(u64::MAX));
}

fn price_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..1_000, any::<u64>()]
}

fn quantity_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..10, 1i64..=i64::MAX]
}

proptest! {
    #[test]
    fn prop_totals_stay_exact_near_limits(
        adds in prop::collection::vec((price_strategy(), quantity_strategy()), 1..8),
        bumps in prop::collection::vec(0usize..8, 0..8),
    ) {
        let mut cart = Cart::new();

        for (i, (price, quantity)) in adds.into_iter().enumerate() {
            let before = cart.lines().to_vec();
            let result = cart.add_line(
                ItemId::new(format!("item{i}")),
                "item",
                Money::new(price),
                quantity,
                Vec::new(),
                "",
            );
            if let Err(err) = result {
                prop_assert_eq!(err, CommerceError::Overflow);
                prop_assert_eq!(cart.lines(), before.as_slice());
            }
        }

        let ids: Vec<LineId> = cart.lines().iter().map(|l| l.id().clone()).collect();
        for pick in bumps {
            if ids.is_empty() {
                break;
            }
            let before = cart.lines().to_vec();
            if let Err(err) = cart.change_quantity(&ids[pick % ids.len()], QuantityDelta::Increment) {
                prop_assert_eq!(err, CommerceError::Overflow);
                prop_assert_eq!(cart.lines(), before.as_slice());
            }
        }

        let exact_count: i128 = cart.lines().iter().map(|l| i128::from(l.quantity())).sum();
        let exact_total: u128 = cart.lines().iter().map(|l| u128::from(l.line_total().amount())).sum();
        prop_assert_eq!(i128::from(cart.item_count()), exact_count);
        prop_assert_eq!(u128::from(cart.grand_total().amount()), exact_total);
        assert_line_totals(&cart);
    }
}
