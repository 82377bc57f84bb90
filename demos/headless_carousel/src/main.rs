use std::rc::Rc;

use anyhow::Context;
use vitrine_core::headless::HeadlessTree;
use vitrine_core::{
    Clock, KeyEvent, ManualClock, PointerButton, PointerEvent, PointerEventKind, Size, VisualTree,
};
use vitrine_interact::{CarouselConfig, Direction, EventCoordinator};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn run_frames(events: &EventCoordinator, clock: &ManualClock, frames: u32) {
    for _ in 0..frames {
        clock.advance(FRAME);
        let _ = events.tick();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let tree = Rc::new(HeadlessTree::new());
    let clock = Rc::new(ManualClock::new());
    let events = EventCoordinator::new(tree.clone(), clock.clone());

    // page: [search] [dialog: close, buy] [carousel: 6 cards] [footer]
    let root = tree.root();
    tree.append(root, true).context("search field")?;
    let dialog = tree.append(root, false).context("dialog")?;
    let close = tree.append(dialog, true).context("close button")?;
    tree.append(dialog, true).context("buy button")?;
    let scroller = tree.append(root, false).context("scroller")?;
    let cards = tree.append(scroller, false).context("card strip")?;
    for _ in 0..6 {
        tree.append(cards, true).context("card")?;
    }
    tree.append(root, true).context("footer link")?;
    tree.set_extents(scroller, 320.0, 6.0 * 180.0);

    let carousel = events.mount_carousel(scroller, CarouselConfig::default())?;
    let _watch = carousel.subscribe(|a| log::info!("affordances now {a:?}"));
    log::info!("initial controls: {:?}", carousel.presentation());

    for _ in 0..3 {
        if carousel.advance(Direction::Next) {
            run_frames(&events, &clock, 40);
            log::info!("paged to {}", tree.offset(scroller));
        }
    }

    let card = PointerEvent::mouse;
    let _ = events.pointer(card(PointerEventKind::Down(PointerButton::Primary), cards, 200.0));
    for x in [240.0, 320.0, 480.0, 640.0] {
        let _ = events.pointer(card(PointerEventKind::Move, cards, x));
        run_frames(&events, &clock, 1);
    }
    let _ = events.pointer(card(PointerEventKind::Up(PointerButton::Primary), cards, 640.0));
    run_frames(&events, &clock, 12);
    log::info!("dragged back to {}", tree.offset(scroller));

    tree.set_extents(scroller, 1200.0, 6.0 * 180.0);
    let _ = events.resize(Size {
        width: 1280.0,
        height: 800.0,
    });
    run_frames(&events, &clock, 12);
    log::info!("after widening: {:?}", carousel.presentation());

    let boundary = events.mount_boundary(dialog, true)?;
    for _ in 0..5 {
        let target = tree.focused().context("focus lost")?;
        if !events.key_down(KeyEvent::tab(target)).is_consumed() {
            tree.default_tab(false);
        }
        log::info!("tab -> {:?}", tree.focused());
    }
    tree.focus(close);
    boundary.detach();
    carousel.detach();

    log::info!(
        "unmounted at {:?}: {} listeners left",
        clock.now(),
        events.listener_count()
    );
    Ok(())
}
