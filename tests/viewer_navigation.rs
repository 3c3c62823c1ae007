//! Viewer navigation driven the way a browser host drives it: clicks,
//! keyboard, back/forward, reloads and content changes between visits.

use zengallery::*;

/// Document scroll position with a lock flag.
#[derive(Debug, Default)]
struct Page {
    offset: f64,
    locked: bool,
    locks: usize,
}

impl ScrollSurface for Page {
    fn offset(&self) -> f64 {
        self.offset
    }

    fn lock(&mut self) {
        self.locked = true;
        self.locks += 1;
    }

    fn unlock(&mut self, restore_to: f64) {
        self.locked = false;
        self.offset = restore_to;
    }
}

fn srcs(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("gallery/{i}.jpg")).collect()
}

fn mount_at(query: &str, n: usize, offset: f64) -> ViewerController<MemoryHistory, Page> {
    ViewerController::mount(
        srcs(n),
        MemoryHistory::new(query),
        ScrollLock::new(Page {
            offset,
            ..Page::default()
        }),
        &GalleryConfig::default(),
    )
    .unwrap()
}

#[test]
fn wraparound_on_five_images() {
    let mut viewer = mount_at("", 5, 0.0);
    viewer.open(0);
    viewer.prev();
    assert_eq!(viewer.state(), ViewerState::Open(4));

    viewer.open(4);
    viewer.next();
    assert_eq!(viewer.state(), ViewerState::Open(0));
}

#[test]
fn fresh_mount_resumes_from_link() {
    let shared = query::with_param("utm=mail", "img", "gallery/2.jpg");
    let viewer = mount_at(&shared, 5, 0.0);
    assert_eq!(viewer.state(), ViewerState::Open(2));
    assert_eq!(viewer.current_src(), Some("gallery/2.jpg"));
    assert!(viewer.scroll_lock().is_locked());

    let stale = mount_at("img=gallery%2F9.jpg", 5, 0.0);
    assert_eq!(stale.state(), ViewerState::Closed);
    assert!(!stale.scroll_lock().is_locked());
}

#[test]
fn url_survives_a_reload() {
    let mut viewer = mount_at("lang=fr", 6, 0.0);
    viewer.open(3);
    viewer.next();
    let query = viewer.history().query();
    drop(viewer);

    let reloaded = mount_at(&query, 6, 0.0);
    assert_eq!(reloaded.state(), ViewerState::Open(4));
    assert_eq!(query::get(&query, "lang").as_deref(), Some("fr"));
}

#[test]
fn back_and_forward_replay_opened_images() {
    let mut viewer = mount_at("", 5, 0.0);
    viewer.open(1);
    viewer.handle_key(Key::from_dom("ArrowRight"));
    viewer.handle_key(Key::from_dom("ArrowRight"));
    assert_eq!(viewer.state(), ViewerState::Open(3));

    viewer.history_mut().back();
    assert_eq!(viewer.on_url_changed(), ViewerState::Open(2));
    viewer.history_mut().back();
    assert_eq!(viewer.on_url_changed(), ViewerState::Open(1));
    viewer.history_mut().forward();
    assert_eq!(viewer.on_url_changed(), ViewerState::Open(2));
}

#[test]
fn close_does_not_add_history() {
    let mut viewer = mount_at("", 3, 0.0);
    viewer.open(0);
    let len = viewer.history().len();
    assert!(viewer.handle_key(Key::from_dom("Esc")));
    assert_eq!(viewer.history().len(), len);
    assert_eq!(viewer.state(), ViewerState::Closed);
    assert!(!viewer.handle_key(Key::from_dom("Escape")));
}

#[test]
fn external_edit_overrides_cached_index() {
    let mut viewer = mount_at("", 4, 0.0);
    viewer.open(0);
    // The address bar moves elsewhere before the host reports it.
    viewer.history_mut().replace("img=gallery%2F2.jpg");
    viewer.next();
    assert_eq!(viewer.state(), ViewerState::Open(3));
}

#[test]
fn scroll_restored_exactly_after_rapid_navigation() {
    let mut viewer = mount_at("", 8, 1234.5);
    viewer.open(5);
    viewer.scroll_lock().with_surface(|p| p.offset = 0.0);
    for i in 0..50 {
        if i % 3 == 0 {
            viewer.prev();
        } else {
            viewer.next();
        }
        assert_eq!(viewer.scroll_lock().holders(), 1);
    }
    viewer.close();
    viewer.scroll_lock().with_surface(|p| {
        assert!(!p.locked);
        assert_eq!(p.offset, 1234.5);
        assert_eq!(p.locks, 1);
    });
}

#[test]
fn back_to_closed_unlocks_scroll() {
    let mut viewer = mount_at("", 3, 80.0);
    viewer.open(2);
    viewer.history_mut().back();
    viewer.on_url_changed();
    assert_eq!(viewer.state(), ViewerState::Closed);
    viewer.scroll_lock().with_surface(|p| {
        assert!(!p.locked);
        assert_eq!(p.offset, 80.0);
    });
}

#[test]
fn two_viewers_share_one_document_lock() {
    let lock = ScrollLock::new(Page::default());
    let config = GalleryConfig::default();
    let mount = || {
        ViewerController::mount(srcs(3), MemoryHistory::default(), lock.clone(), &config).unwrap()
    };
    let mut top = mount();
    let mut bottom = mount();

    top.open(0);
    bottom.open(1);
    assert_eq!(lock.holders(), 2);
    top.close();
    assert!(lock.with_surface(|p| p.locked));
    drop(bottom);
    assert!(!lock.is_locked());
}

#[test]
fn content_change_between_visits() {
    let mut viewer = mount_at("img=gallery%2F4.jpg", 5, 0.0);
    assert_eq!(viewer.state(), ViewerState::Open(4));
    viewer.set_images(srcs(3));
    assert_eq!(viewer.state(), ViewerState::Closed);
    assert!(!viewer.scroll_lock().is_locked());
    viewer.open(7);
    assert_eq!(viewer.state(), ViewerState::Closed);
}

#[test]
fn viewer_follows_layout_sources() {
    let images: Vec<_> = srcs(4).into_iter().map(GalleryImage::new).collect();
    let layout = LayoutEngine::new(GalleryConfig::default())
        .unwrap()
        .compute(&images, ViewportClass::Mobile);
    let mut viewer = ViewerController::mount(
        layout.items.iter().map(|p| p.src.clone()),
        MemoryHistory::default(),
        ScrollLock::new(Page::default()),
        &GalleryConfig::default(),
    )
    .unwrap();
    viewer.open(layout.items[2].index);
    assert_eq!(viewer.current_src(), Some(layout.items[2].src.as_str()));
}
