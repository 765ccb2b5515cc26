// Page-level behaviour checks: each test builds a page from a contract and
// drives it only through `Page::load` and `Page::handle`, the way the
// terminal adapter does.

use chrono::{Duration, TimeZone, Utc};

use aste_core::board::Sequencer;
use aste_core::config::{
    load_config_from, CountdownSection, DettaglioSection, OffertaSection, PageConfig,
    SliderSection, WishlistEntry,
};
use aste_core::live_feed::LiveEvent;
use aste_core::page::{Effect, Page, PageEvent};
use aste_core::protocol::{BidResponse, PriceValue, TransportError, WishlistResponse};
use aste_core::slider::Handle;
use aste_core::wishlist::{FILLED_HEART, OUTLINE_HEART};

// ===========================================================================
// Helpers
// ===========================================================================

fn contract() -> PageConfig {
    PageConfig {
        prezzo_attuale: "Prezzo attuale: € 10.00".into(),
        acquirente_attuale: "Offerta fatta da: -".into(),
        wishlist: vec![WishlistEntry {
            asta_id: "7".into(),
            added: false,
        }],
        offerta: Some(OffertaSection {
            url: "/asta/7/offerta/".into(),
        }),
        countdown: None,
        dettaglio: Some(DettaglioSection {
            asta_id: "7".into(),
        }),
        slider: Some(SliderSection {
            max_price: Some("500".into()),
            prezzo_min: String::new(),
            prezzo_max: String::new(),
        }),
    }
}

fn bid_ok(prezzo: &str, who: &str) -> Result<BidResponse, TransportError> {
    Ok(BidResponse {
        success: true,
        nuovo_prezzo: Some(PriceValue::Text(prezzo.into())),
        acquirente: Some(who.into()),
        error: None,
    })
}

fn type_amount(page: &mut Page, amount: &str) {
    for c in amount.chars() {
        page.handle(PageEvent::ImportoTyped(c));
    }
}

// ===========================================================================
// Wishlist
// ===========================================================================

#[test]
fn wishlist_click_then_response_flips_button() {
    let (mut page, _) = Page::load(&contract());

    let effects = page.handle(PageEvent::WishlistClicked { index: 0 });
    assert_eq!(
        effects,
        vec![Effect::PostWishlist {
            index: 0,
            asta_id: "7".into()
        }]
    );
    // No optimistic change.
    assert_eq!(page.wishlist[0].label(), OUTLINE_HEART);

    page.handle(PageEvent::WishlistResponded {
        index: 0,
        result: Ok(WishlistResponse {
            success: true,
            added: true,
        }),
    });
    assert_eq!(page.wishlist[0].label(), FILLED_HEART);
    assert!(page.wishlist[0].has_class("btn-danger"));
    assert!(!page.wishlist[0].has_class("btn-outline-danger"));

    page.handle(PageEvent::WishlistResponded {
        index: 0,
        result: Ok(WishlistResponse {
            success: true,
            added: false,
        }),
    });
    assert_eq!(page.wishlist[0].label(), OUTLINE_HEART);
    assert!(page.wishlist[0].has_class("btn-outline-danger"));
    assert!(!page.wishlist[0].has_class("btn-danger"));
}

// ===========================================================================
// Bid form
// ===========================================================================

#[test]
fn accepted_bid_repaints_and_clears() {
    let seq = Sequencer::new();
    let (mut page, _) = Page::load(&contract());
    type_amount(&mut page, "25.00");

    let effects = page.handle(PageEvent::BidSubmitted);
    assert!(matches!(&effects[..], [Effect::PostBid { url, request }]
        if url == "/asta/7/offerta/" && request.importo == "25.00"));

    page.handle(PageEvent::BidResponded {
        result: bid_ok("25.00", "elena"),
        stamp: seq.stamp(),
    });
    assert_eq!(page.board.prezzo_attuale, "Prezzo attuale: € 25.00");
    assert_eq!(page.board.acquirente_attuale, "Offerta fatta da: elena");
    let form = page.bid_form.as_ref().unwrap();
    assert_eq!(form.importo, "");
    assert!(!form.error.visible);
}

#[test]
fn rejected_bid_keeps_amount_and_shows_error() {
    let seq = Sequencer::new();
    let (mut page, _) = Page::load(&contract());
    type_amount(&mut page, "5");
    page.handle(PageEvent::BidSubmitted);

    page.handle(PageEvent::BidResponded {
        result: Ok(BidResponse {
            success: false,
            error: Some("L'offerta deve superare il prezzo attuale".into()),
            ..Default::default()
        }),
        stamp: seq.stamp(),
    });
    let form = page.bid_form.as_ref().unwrap();
    assert_eq!(form.importo, "5");
    assert!(form.error.visible);
    assert_eq!(form.error.text, "L'offerta deve superare il prezzo attuale");
    assert_eq!(page.board.prezzo_attuale, "Prezzo attuale: € 10.00");
}

#[test]
fn transport_failure_changes_nothing() {
    let seq = Sequencer::new();
    let (mut page, _) = Page::load(&contract());
    type_amount(&mut page, "30");
    let before = page.clone();

    page.handle(PageEvent::BidResponded {
        result: Err(TransportError::Request("connection refused".into())),
        stamp: seq.stamp(),
    });
    assert_eq!(page, before);
}

// ===========================================================================
// Countdown
// ===========================================================================

#[test]
fn countdown_renders_and_stalls_after_deadline() {
    let deadline = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
    let mut cfg = contract();
    cfg.countdown = Some(CountdownSection {
        fine_asta: deadline.to_rfc3339(),
    });
    let (mut page, effects) = Page::load(&cfg);
    assert!(effects.contains(&Effect::StartCountdown));

    let now = deadline - Duration::milliseconds(90_061_001);
    page.handle(PageEvent::CountdownTick { now });
    assert_eq!(page.countdown.as_ref().unwrap().text, "Scade tra: 1g 1h 1m 1s");

    page.handle(PageEvent::CountdownTick {
        now: deadline + Duration::seconds(5),
    });
    assert_eq!(page.countdown.as_ref().unwrap().text, "Scade tra: 1g 1h 1m 1s");
}

// ===========================================================================
// Live feed
// ===========================================================================

#[test]
fn live_feed_opens_for_detail_page() {
    let (_, effects) = Page::load(&contract());
    assert!(effects.contains(&Effect::OpenLiveFeed {
        asta_id: "7".into()
    }));
}

#[test]
fn malformed_frames_leave_labels_alone() {
    let seq = Sequencer::new();
    let (mut page, _) = Page::load(&contract());
    for text in ["{", "null", "[]", r#"{"nuovo_prezzo":"3"}"#, r#"{"acquirente":"x"}"#] {
        page.handle(PageEvent::Live(LiveEvent::Message {
            text: text.into(),
            stamp: seq.stamp(),
        }));
    }
    assert_eq!(page.board.prezzo_attuale, "Prezzo attuale: € 10.00");
    assert_eq!(page.board.acquirente_attuale, "Offerta fatta da: -");
}

#[test]
fn later_receipt_wins_the_price_race() {
    let seq = Sequencer::new();
    let (mut page, _) = Page::load(&contract());

    // Live frame received first, bid response second but processed first.
    let live_stamp = seq.stamp();
    let bid_stamp = seq.stamp();
    page.handle(PageEvent::BidResponded {
        result: bid_ok("40.00", "me"),
        stamp: bid_stamp,
    });
    page.handle(PageEvent::Live(LiveEvent::Message {
        text: r#"{"nuovo_prezzo":"35.00","acquirente":"rival"}"#.into(),
        stamp: live_stamp,
    }));

    assert_eq!(page.board.prezzo_attuale, "Prezzo attuale: € 40.00");
    assert_eq!(page.board.acquirente_attuale, "Offerta fatta da: me");
}

// ===========================================================================
// Slider
// ===========================================================================

#[test]
fn slider_drag_snaps_and_max_display_stays() {
    let (mut page, _) = Page::load(&contract());
    {
        let slider = page.slider.as_ref().unwrap();
        assert_eq!(slider.value(Handle::Low), 0);
        assert_eq!(slider.value(Handle::High), 500);
    }

    page.handle(PageEvent::SliderDragged {
        handle: Handle::Low,
        value: 347.0,
    });
    page.handle(PageEvent::SliderDragged {
        handle: Handle::High,
        value: 420.0,
    });

    let slider = page.slider.as_ref().unwrap();
    assert_eq!(slider.min_input, "350");
    assert_eq!(slider.min_display, "350");
    assert_eq!(slider.max_input, "420");
    assert_eq!(slider.max_display, "500");
}

// ===========================================================================
// Shipped defaults
// ===========================================================================

#[test]
fn shipped_defaults_load_into_a_working_page() {
    let tmp = std::env::temp_dir().join("aste_core_defaults_page");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("config")).unwrap();
    let defaults = concat!(env!("CARGO_MANIFEST_DIR"), "/../../defaults/client.toml");
    std::fs::copy(defaults, tmp.join("config/client.toml")).unwrap();

    let config = load_config_from(&tmp).unwrap();
    let (page, effects) = Page::load(&config.page);

    assert_eq!(page.wishlist.len(), 1);
    assert!(page.bid_form.is_some());
    assert!(page.countdown.is_some());
    assert!(page.slider.is_some());
    assert_eq!(
        effects,
        vec![
            Effect::StartCountdown,
            Effect::OpenLiveFeed {
                asta_id: "1".into()
            }
        ]
    );
}
