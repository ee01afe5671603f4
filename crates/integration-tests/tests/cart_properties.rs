//! Cart invariants under random edit sequences.
//!
//! Sequences come from a seeded RNG so failures are reproducible; the failing
//! seed is included in every assertion message.

use std::collections::HashMap;

use greenleaf_core::{CartStore, Price, ProductId};
use greenleaf_integration_tests::{CATALOG, PEA_SHOOTS, Product};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const SEEDS: u64 = 64;
const STEPS: usize = 200;

#[derive(Debug, Clone, Copy)]
enum Edit {
    Add(Product),
    Increase(Product),
    Decrease(Product),
    Remove(Product),
    Clear,
}

fn random_product(rng: &mut StdRng) -> Product {
    *CATALOG.choose(rng).expect("catalog is not empty")
}

fn random_edit(rng: &mut StdRng) -> Edit {
    let product = random_product(rng);
    match rng.random_range(0..20) {
        0..=6 => Edit::Add(product),
        7..=10 => Edit::Increase(product),
        11..=15 => Edit::Decrease(product),
        16..=18 => Edit::Remove(product),
        _ => Edit::Clear,
    }
}

/// Reference quantities per product, updated independently of the cart.
type Model = HashMap<ProductId, u32>;

fn apply(cart: &mut CartStore, edit: Edit) {
    match edit {
        Edit::Add(p) => {
            cart.add(p.product_id(), p.name, p.unit_price())
                .expect("catalog price");
        }
        Edit::Increase(p) => {
            let _ = cart.increase(&p.product_id());
        }
        Edit::Decrease(p) => {
            let _ = cart.decrease(&p.product_id());
        }
        Edit::Remove(p) => {
            cart.remove(&p.product_id());
        }
        Edit::Clear => cart.clear(),
    }
}

fn apply_to_model(model: &mut Model, edit: Edit) {
    match edit {
        Edit::Add(p) => *model.entry(p.product_id()).or_insert(0) += 1,
        Edit::Increase(p) => {
            if let Some(quantity) = model.get_mut(&p.product_id()) {
                *quantity += 1;
            }
        }
        Edit::Decrease(p) => {
            let id = p.product_id();
            match model.get(&id).copied() {
                Some(1) => {
                    model.remove(&id);
                }
                Some(quantity) => {
                    model.insert(id, quantity - 1);
                }
                None => {}
            }
        }
        Edit::Remove(p) => {
            model.remove(&p.product_id());
        }
        Edit::Clear => model.clear(),
    }
}

fn check_against_model(cart: &CartStore, model: &Model, seed: u64, step: usize) {
    assert_eq!(cart.items().len(), model.len(), "seed {seed} step {step}");
    for (product_id, expected) in model {
        let line = cart
            .get(product_id)
            .unwrap_or_else(|| panic!("seed {seed} step {step}: missing line {product_id}"));
        assert_eq!(
            line.quantity, *expected,
            "seed {seed} step {step}: quantity of {product_id}"
        );
    }
}

fn check_invariants(cart: &CartStore, seed: u64, step: usize) {
    let items = cart.items();

    for (i, item) in items.iter().enumerate() {
        assert!(
            item.quantity >= 1,
            "seed {seed} step {step}: zero-quantity line {}",
            item.product_id
        );
        assert!(
            items.iter().skip(i + 1).all(|other| other.product_id != item.product_id),
            "seed {seed} step {step}: duplicate line {}",
            item.product_id
        );
    }

    let expected_subtotal: Price = items.iter().map(|item| item.line_total()).sum();
    assert_eq!(cart.subtotal(), expected_subtotal, "seed {seed} step {step}");

    let expected_fee = if expected_subtotal > Price::ZERO {
        Price::from_units(30)
    } else {
        Price::ZERO
    };
    assert_eq!(cart.delivery_fee(), expected_fee, "seed {seed} step {step}");
    assert_eq!(
        cart.total(),
        cart.subtotal() + cart.delivery_fee(),
        "seed {seed} step {step}"
    );

    let expected_count: u32 = items.iter().map(|item| item.quantity).sum();
    assert_eq!(cart.item_count(), expected_count, "seed {seed} step {step}");
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_random_sequences_preserve_invariants() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        let mut model = Model::new();

        for step in 0..STEPS {
            let edit = random_edit(&mut rng);
            apply(&mut cart, edit);
            apply_to_model(&mut model, edit);
            check_invariants(&cart, seed, step);
            check_against_model(&cart, &model, seed, step);
        }
    }
}

#[test]
fn test_quantity_equals_add_count_per_product() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        let mut model = Model::new();

        for step in 0..STEPS {
            let edit = Edit::Add(random_product(&mut rng));
            apply(&mut cart, edit);
            apply_to_model(&mut model, edit);
            check_against_model(&cart, &model, seed, step);
        }

        let adds: u32 = model.values().sum();
        assert_eq!(cart.item_count(), adds, "seed {seed}");
    }
}

#[test]
fn test_quantity_tracks_net_adds() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        let product = PEA_SHOOTS;
        let mut expected: u32 = 0;

        for _ in 0..STEPS {
            if rng.random_bool(0.6) {
                cart.add(product.product_id(), product.name, product.unit_price())
                    .expect("catalog price");
                expected += 1;
            } else {
                let result = cart.decrease(&product.product_id());
                if expected == 0 {
                    assert!(result.is_err(), "seed {seed}: decrease on absent line");
                } else {
                    expected -= 1;
                    assert_eq!(result, Ok(expected), "seed {seed}");
                }
            }

            assert_eq!(
                cart.is_in_cart(&product.product_id()),
                expected > 0,
                "seed {seed}"
            );
            assert_eq!(cart.item_count(), expected, "seed {seed}");
        }
    }
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_remove_twice_equals_remove_once() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = CartStore::new();
        for _ in 0..20 {
            apply(&mut cart, random_edit(&mut rng));
        }

        let target = random_product(&mut rng).product_id();
        let mut once = cart.clone();
        once.remove(&target);
        let mut twice = once.clone();
        twice.remove(&target);

        assert_eq!(once, twice, "seed {seed}");
        assert!(!twice.is_in_cart(&target), "seed {seed}");
    }
}
