//! Open/close/prev/next state machine synchronized with the URL.
//!
//! The query parameter is the single source of truth: every operation first
//! re-derives [`ViewerState`] from [`History::query`], acts, then re-derives
//! again. The in-memory index is only a cache of what the URL says, so
//! user input, back/forward navigation and remounts all converge on the
//! same state.
//!
//! ```
//! use zengallery::{
//!     GalleryConfig, MemoryHistory, ScrollLock, ScrollSurface, ViewerController, ViewerState,
//! };
//!
//! struct Page(f64);
//! impl ScrollSurface for Page {
//!     fn offset(&self) -> f64 { self.0 }
//!     fn lock(&mut self) {}
//!     fn unlock(&mut self, restore_to: f64) { self.0 = restore_to; }
//! }
//!
//! let mut viewer = ViewerController::mount(
//!     ["a.jpg", "b.jpg", "c.jpg"],
//!     MemoryHistory::new("?lang=en"),
//!     ScrollLock::new(Page(0.0)),
//!     &GalleryConfig::default(),
//! )
//! .unwrap();
//!
//! viewer.open(0);
//! viewer.prev();
//! assert_eq!(viewer.state(), ViewerState::Open(2));
//! assert_eq!(viewer.current_src(), Some("c.jpg"));
//! ```

mod history;
mod key;
mod scroll;

pub use history::{History, MemoryHistory};
pub use key::Key;
pub use scroll::{ScrollLock, ScrollLockGuard, ScrollSurface};

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{ConfigError, GalleryConfig};
use crate::query;

/// Whether an image is shown, and which.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewerState {
    #[default]
    Closed,
    /// Index into the current image list.
    Open(usize),
}

impl ViewerState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Open(i) => Some(i),
            Self::Closed => None,
        }
    }
}

/// Full-screen viewer over an ordered list of image `src`s.
///
/// Holds a [`ScrollLockGuard`] exactly while [`ViewerState::Open`]. Dropping
/// the controller releases it; the URL is left as it was so a reload
/// reopens the same image.
#[derive(Debug)]
pub struct ViewerController<H: History, S: ScrollSurface> {
    srcs: Vec<String>,
    history: H,
    scroll: ScrollLock<S>,
    guard: Option<ScrollLockGuard<S>>,
    state: ViewerState,
    param: String,
}

impl<H: History, S: ScrollSurface> ViewerController<H, S> {
    /// Mount over `srcs`, deriving the initial state from the URL.
    ///
    /// Fails only if `config` does not validate.
    pub fn mount<I>(
        srcs: I,
        history: H,
        scroll: ScrollLock<S>,
        config: &GalleryConfig,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        config.validate()?;
        let mut viewer = Self {
            srcs: srcs.into_iter().map(Into::into).collect(),
            history,
            scroll,
            guard: None,
            state: ViewerState::Closed,
            param: config.viewer_param.clone(),
        };
        viewer.on_url_changed();
        Ok(viewer)
    }

    /// Show image `index`, pushing a history entry. Out-of-range indices are
    /// ignored; reopening the image already in the URL pushes nothing.
    pub fn open(&mut self, index: usize) {
        self.on_url_changed();
        let Some(src) = self.srcs.get(index) else {
            tracing::debug!(index, len = self.srcs.len(), "viewer: open out of range");
            return;
        };
        let current = self.history.query();
        if query::get(&current, &self.param).as_deref() != Some(src.as_str()) {
            let next = query::with_param(&current, &self.param, src);
            self.history.push(&next);
        }
        self.on_url_changed();
    }

    /// Hide the viewer, replacing the current history entry.
    pub fn close(&mut self) {
        if !self.on_url_changed().is_open() {
            return;
        }
        let next = query::without_param(&self.history.query(), &self.param);
        self.history.replace(&next);
        self.on_url_changed();
    }

    /// Previous image, wrapping to the last.
    pub fn prev(&mut self) {
        self.step(|i, len| (i + len - 1) % len);
    }

    /// Next image, wrapping to the first.
    pub fn next(&mut self) {
        self.step(|i, len| (i + 1) % len);
    }

    fn step(&mut self, to: impl FnOnce(usize, usize) -> usize) {
        if let ViewerState::Open(i) = self.on_url_changed() {
            self.open(to(i, self.srcs.len()));
        }
    }

    /// Re-derive the state from the URL. Call on every external navigation
    /// (`popstate`, address bar edits). Returns the new state.
    pub fn on_url_changed(&mut self) -> ViewerState {
        let next = self.derive();
        self.transition(next);
        next
    }

    /// Replace the image list. An open image stays open if its `src`
    /// survives, at its new index.
    pub fn set_images<I>(&mut self, srcs: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.srcs = srcs.into_iter().map(Into::into).collect();
        self.on_url_changed();
    }

    /// React to a key press. Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.on_url_changed().is_open() {
            return false;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => return false,
        }
        true
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.index()
    }

    /// `src` of the open image.
    pub fn current_src(&self) -> Option<&str> {
        self.current_index()
            .and_then(|i| self.srcs.get(i))
            .map(String::as_str)
    }

    pub fn images(&self) -> &[String] {
        &self.srcs
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for hosts that drive navigation through the history
    /// object. Follow up with [`on_url_changed`](Self::on_url_changed).
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn scroll_lock(&self) -> &ScrollLock<S> {
        &self.scroll
    }

    fn derive(&self) -> ViewerState {
        let Some(src) = query::get(&self.history.query(), &self.param) else {
            return ViewerState::Closed;
        };
        match self.srcs.iter().position(|s| *s == src) {
            Some(i) => ViewerState::Open(i),
            None => {
                tracing::debug!(src = %src, "viewer: parameter matches no image");
                ViewerState::Closed
            }
        }
    }

    fn transition(&mut self, next: ViewerState) {
        if next == self.state {
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "viewer transition");
        match next {
            ViewerState::Open(_) => {
                if self.guard.is_none() {
                    self.guard = Some(self.scroll.acquire());
                }
            }
            ViewerState::Closed => self.guard = None,
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::scroll::tests::RecordingSurface;
    use super::*;

    type Viewer = ViewerController<MemoryHistory, RecordingSurface>;

    fn mount(query: &str, count: usize) -> Viewer {
        let srcs = (0..count).map(|i| alloc::format!("{i}.jpg"));
        let scroll = ScrollLock::new(RecordingSurface {
            offset: 300.0,
            ..RecordingSurface::default()
        });
        ViewerController::mount(
            srcs,
            MemoryHistory::new(query),
            scroll,
            &GalleryConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn wraps_both_ways() {
        let mut v = mount("", 5);
        v.open(0);
        v.prev();
        assert_eq!(v.state(), ViewerState::Open(4));
        v.next();
        assert_eq!(v.state(), ViewerState::Open(0));
    }

    #[test]
    fn open_pushes_close_replaces() {
        let mut v = mount("lang=fr", 3);
        v.open(1);
        assert_eq!(v.history().len(), 2);
        assert_eq!(v.history().query(), "lang=fr&img=1.jpg");
        v.close();
        assert_eq!(v.history().len(), 2);
        assert_eq!(v.history().query(), "lang=fr");
        assert_eq!(v.state(), ViewerState::Closed);
    }

    #[test]
    fn reopen_does_not_duplicate_entry() {
        let mut v = mount("", 3);
        v.open(2);
        v.open(2);
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut v = mount("", 3);
        v.open(1);
        v.open(3);
        assert_eq!(v.state(), ViewerState::Open(1));
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn resumes_from_url() {
        assert_eq!(mount("img=2.jpg", 5).state(), ViewerState::Open(2));
        assert_eq!(mount("img=nope.jpg", 5).state(), ViewerState::Closed);
        assert_eq!(mount("", 5).state(), ViewerState::Closed);
    }

    #[test]
    fn back_steps_through_opened_images() {
        let mut v = mount("", 4);
        v.open(0);
        v.next();
        v.next();
        assert!(v.history_mut().back());
        assert_eq!(v.on_url_changed(), ViewerState::Open(1));
        assert!(v.history_mut().back());
        assert!(v.history_mut().back());
        assert_eq!(v.on_url_changed(), ViewerState::Closed);
        assert!(!v.scroll_lock().is_locked());
    }

    #[test]
    fn keys_only_consumed_while_open() {
        let mut v = mount("", 3);
        assert!(!v.handle_key(Key::Escape));
        v.open(0);
        assert!(v.handle_key(Key::ArrowLeft));
        assert_eq!(v.current_src(), Some("2.jpg"));
        assert!(v.handle_key(Key::ArrowRight));
        assert_eq!(v.current_index(), Some(0));
        assert!(!v.handle_key(Key::Other));
        assert!(v.handle_key(Key::Escape));
        assert_eq!(v.state(), ViewerState::Closed);
    }

    #[test]
    fn scroll_locked_only_while_open() {
        let mut v = mount("", 3);
        assert!(!v.scroll_lock().is_locked());
        v.open(1);
        v.scroll_lock().with_surface(|s| s.offset = 0.0);
        for _ in 0..10 {
            v.next();
            v.prev();
        }
        assert_eq!(v.scroll_lock().holders(), 1);
        v.close();
        assert!(!v.scroll_lock().is_locked());
        v.scroll_lock().with_surface(|s| {
            assert_eq!(s.offset, 300.0);
            assert_eq!(s.unlocks.len(), 1);
        });
    }

    #[test]
    fn drop_releases_lock_keeps_url() {
        let mut v = mount("", 3);
        let lock = v.scroll_lock().clone();
        v.open(2);
        assert!(lock.is_locked());
        let query = v.history().query();
        drop(v);
        assert!(!lock.is_locked());
        assert_eq!(query, "img=2.jpg");
    }

    #[test]
    fn shrinking_list_closes_or_reindexes() {
        let mut v = mount("", 4);
        v.open(3);
        v.set_images(["3.jpg", "0.jpg"]);
        assert_eq!(v.state(), ViewerState::Open(0));
        v.set_images(["0.jpg"]);
        assert_eq!(v.state(), ViewerState::Closed);
        assert!(!v.scroll_lock().is_locked());
    }

    #[test]
    fn empty_gallery_never_opens() {
        let mut v = mount("img=0.jpg", 0);
        assert_eq!(v.state(), ViewerState::Closed);
        v.open(0);
        v.next();
        v.prev();
        assert_eq!(v.state(), ViewerState::Closed);
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn custom_param_name() {
        let config = GalleryConfig::default().viewer_param("photo");
        let mut v = ViewerController::mount(
            ["x", "y"],
            MemoryHistory::new("img=x"),
            ScrollLock::new(RecordingSurface::default()),
            &config,
        )
        .unwrap();
        assert_eq!(v.state(), ViewerState::Closed);
        v.open(1);
        assert_eq!(v.history().query(), "img=x&photo=y");
    }

    #[test]
    fn rejects_invalid_config() {
        let err = ViewerController::mount(
            ["x"],
            MemoryHistory::default(),
            ScrollLock::new(RecordingSurface::default()),
            &GalleryConfig::default().viewer_param(""),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidViewerParam);
    }
}
