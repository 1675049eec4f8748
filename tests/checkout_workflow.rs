//! Integration test for the cart-to-order workflow.
//!
//! Builds a cart the way the cart endpoints do, then plans checkouts against
//! it and checks the order lines, the shrunk cart and the totals.

use testresult::TestResult;
use uuid::Uuid;

use quire::{
    cart::CartLines,
    checkout::{self, CartLineChange, CheckoutError, RequestedLine},
    lines::LineItem,
};

#[test]
fn partial_checkout_splits_cart_line_between_order_and_cart() -> TestResult {
    let book_a = Uuid::now_v7();

    let mut cart = CartLines::new();

    cart.add(book_a, 10, 3)?;

    assert_eq!(cart.total_amount(), 30);

    let plan = checkout::plan(
        cart.lines(),
        &[RequestedLine {
            book: book_a,
            quantity: 2,
        }],
    )?;

    assert_eq!(
        plan.order_lines,
        vec![LineItem {
            book: book_a,
            quantity: 2,
            price: 20
        }]
    );
    assert_eq!(plan.order_total, 20);
    assert_eq!(
        plan.remaining,
        vec![LineItem {
            book: book_a,
            quantity: 1,
            price: 10
        }]
    );
    assert_eq!(plan.cart_total, 10);

    Ok(())
}

#[test]
fn one_bad_line_rejects_the_whole_order() -> TestResult {
    let book_a = Uuid::now_v7();
    let book_b = Uuid::now_v7();

    let mut cart = CartLines::new();

    cart.add(book_a, 1_299, 1)?;
    cart.add(book_b, 899, 2)?;

    let result = checkout::plan(
        cart.lines(),
        &[
            RequestedLine {
                book: book_a,
                quantity: 1,
            },
            RequestedLine {
                book: book_b,
                quantity: 3,
            },
        ],
    );

    assert_eq!(
        result,
        Err(CheckoutError::ExceedsCart {
            book: book_b,
            requested: 3,
            held: 2
        })
    );

    // The cart itself is untouched by a failed plan.
    assert_eq!(cart.total_amount(), 1_299 + 2 * 899);

    Ok(())
}

#[test]
fn checking_out_everything_empties_the_cart() -> TestResult {
    let book_a = Uuid::now_v7();
    let book_b = Uuid::now_v7();

    let mut cart = CartLines::new();

    cart.add(book_a, 500, 1)?;
    cart.add(book_b, 250, 1)?;
    cart.add(book_b, 250, 1)?;

    let plan = checkout::plan(
        cart.lines(),
        &[
            RequestedLine {
                book: book_b,
                quantity: 2,
            },
            RequestedLine {
                book: book_a,
                quantity: 1,
            },
        ],
    )?;

    assert_eq!(plan.order_total, 1_000);
    assert!(plan.remaining.is_empty());
    assert_eq!(plan.cart_total, 0);
    assert_eq!(
        plan.cart_changes.as_slice(),
        &[
            CartLineChange::Dropped(book_a),
            CartLineChange::Dropped(book_b)
        ]
    );

    let ordered: Vec<Uuid> = plan.order_lines.iter().map(|line| line.book).collect();

    assert_eq!(ordered, vec![book_b, book_a]);

    Ok(())
}

#[test]
fn order_lines_use_the_cart_snapshot_price() -> TestResult {
    let book_a = Uuid::now_v7();

    let mut cart = CartLines::new();

    cart.add(book_a, 1_000, 2)?;

    // The catalog price changed after the book was added; the order keeps the
    // cart's price.
    let plan = checkout::plan(
        cart.lines(),
        &[RequestedLine {
            book: book_a,
            quantity: 1,
        }],
    )?;

    assert_eq!(plan.order_total, 1_000);

    Ok(())
}
