/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

//! End-to-end scenario tests for the matching engine, each pinned to
//! literal order ids/prices/volumes so a regression shows up as a diff on a
//! specific assertion rather than a vague statistical one.

use crate::orderbook::{MatchingEngine, Order, Side};

#[test]
fn cross_at_the_top() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 100, 3, Side::Ask))
        .unwrap();
    let receipts = engine
        .process_order(Order::limit(2, 200, 100, 2, Side::Bid))
        .unwrap();

    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].taker_order_id, 2);
    assert_eq!(receipts[0].maker_order_id, 1);
    assert_eq!(receipts[0].price, 100);
    assert_eq!(receipts[0].volume, 2);
    assert_eq!(engine.best_ask(), Some(100));
    assert_eq!(engine.best_bid(), None);
}

#[test]
fn fifo_within_a_level() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 100, 3, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 101, 100, 3, Side::Ask))
        .unwrap();
    let receipts = engine
        .process_order(Order::limit(3, 200, 100, 4, Side::Bid))
        .unwrap();

    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[0].maker_order_id, 1);
    assert_eq!(receipts[0].volume, 3);
    assert_eq!(receipts[1].maker_order_id, 2);
    assert_eq!(receipts[1].volume, 1);
    assert_eq!(engine.best_ask(), Some(100));
}

#[test]
fn price_priority_beats_time() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 101, 5, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 101, 100, 5, Side::Ask))
        .unwrap();
    let receipts = engine
        .process_order(Order::limit(3, 200, 101, 5, Side::Bid))
        .unwrap();

    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].maker_order_id, 2);
    assert_eq!(receipts[0].price, 100);
    assert_eq!(engine.best_ask(), Some(101));
    assert!(engine.cancel_order(1));
}

#[test]
fn market_order_sweep_and_discard() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 100, 1, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 101, 101, 1, Side::Ask))
        .unwrap();
    let receipts = engine
        .process_order(Order::market(3, 200, 5, Side::Bid))
        .unwrap();

    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[0].price, 100);
    assert_eq!(receipts[0].volume, 1);
    assert_eq!(receipts[1].price, 101);
    assert_eq!(receipts[1].volume, 1);
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.best_ask(), None);
}

#[test]
fn cancel_then_re_add() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 99, 2, Side::Bid))
        .unwrap();
    assert!(engine.cancel_order(1));
    engine
        .process_order(Order::limit(2, 100, 99, 2, Side::Bid))
        .unwrap();

    assert_eq!(engine.best_bid(), Some(99));
    assert_eq!(engine.resting_order_count(), 1);
    assert!(!engine.cancel_order(1));
}

#[test]
fn submission_rejects_zero_volume() {
    let engine = MatchingEngine::new();
    let err = engine
        .process_order(Order::limit(1, 100, 100, 0, Side::Bid))
        .unwrap_err();
    assert_eq!(err, crate::orderbook::OrderBookError::NonPositiveVolume);
    assert_eq!(engine.best_bid(), None);
}

#[test]
fn submission_rejects_price_market_mismatch() {
    let engine = MatchingEngine::new();
    let mut market_with_price = Order::market(1, 100, 5, Side::Bid);
    market_with_price.price = Some(100);
    let err = engine.process_order(market_with_price).unwrap_err();
    assert_eq!(err, crate::orderbook::OrderBookError::PriceMarketMismatch);
}

#[test]
fn empty_book_best_prices_and_mid_are_undefined() {
    let engine = MatchingEngine::new();
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.best_ask(), None);
    assert_eq!(engine.mid(), None);
}

#[test]
fn market_order_on_empty_book_yields_zero_fills() {
    let engine = MatchingEngine::new();
    let receipts = engine
        .process_order(Order::market(1, 100, 5, Side::Bid))
        .unwrap();
    assert!(receipts.is_empty());
}

#[test]
fn buy_limit_at_best_ask_crosses_one_below_rests() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 100, 100, 5, Side::Ask))
        .unwrap();

    let receipts = engine
        .process_order(Order::limit(2, 200, 100, 2, Side::Bid))
        .unwrap();
    assert_eq!(receipts.len(), 1);

    let receipts = engine
        .process_order(Order::limit(3, 200, 99, 2, Side::Bid))
        .unwrap();
    assert!(receipts.is_empty());
    assert_eq!(engine.best_bid(), Some(99));
}

#[test]
fn notification_bus_delivers_to_both_sides() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 10, 100, 3, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 20, 100, 2, Side::Bid))
        .unwrap();

    let taker_receipts = engine.notifications().poll_receipts(20);
    let maker_receipts = engine.notifications().poll_receipts(10);
    assert_eq!(taker_receipts.len(), 1);
    assert_eq!(maker_receipts.len(), 1);
    assert_eq!(taker_receipts[0], maker_receipts[0]);
}

#[test]
fn depth_snapshot_orders_levels_then_fifo_within_a_level() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 1, 101, 2, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 1, 100, 3, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(3, 1, 100, 1, Side::Ask))
        .unwrap();

    let depth = engine.depth_snapshot(Side::Ask);
    assert_eq!(depth.len(), 2);
    assert_eq!(depth[0].0, 100);
    let ids_at_100: Vec<_> = depth[0].1.iter().map(|o| o.id).collect();
    assert_eq!(ids_at_100, vec![2, 3]);
    assert_eq!(depth[1].0, 101);
}

#[test]
fn volume_conservation_across_a_multi_level_sweep() {
    let engine = MatchingEngine::new();
    engine
        .process_order(Order::limit(1, 1, 100, 2, Side::Ask))
        .unwrap();
    engine
        .process_order(Order::limit(2, 1, 101, 3, Side::Ask))
        .unwrap();
    let incoming = Order::limit(3, 2, 101, 4, Side::Bid);
    let receipts = engine.process_order(incoming).unwrap();

    let executed: u64 = receipts.iter().map(|r| r.volume).sum();
    assert_eq!(executed, 4);
    assert_eq!(engine.best_ask(), Some(101));
}
