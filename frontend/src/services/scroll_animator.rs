//! Scroll-triggered entrance animations.
//!
//! [`ScrollAnimator`] holds the bookkeeping (which elements are observed and
//! which have already animated) and is generic over the element type and the
//! intersection watcher. [`WebScrollAnimator`] drives it from a browser
//! `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::ScrollAnimatorConfig;
use crate::services::animation_presets::DEFAULT_ENTRANCE;

/// Animation to play on an element, resolved from its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnimation {
    pub name: String,
    pub delay_ms: u32,
    pub duration_ms: u32,
}

/// Per-element animation metadata; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationMetadata {
    pub name: Option<String>,
    pub delay_ms: Option<u32>,
    pub duration_ms: Option<u32>,
}

impl AnimationMetadata {
    pub fn resolve(&self) -> ResolvedAnimation {
        match self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => ResolvedAnimation {
                name: name.to_string(),
                delay_ms: self.delay_ms.unwrap_or(0),
                duration_ms: self.duration_ms.unwrap_or(DEFAULT_ENTRANCE.duration_ms),
            },
            None => ResolvedAnimation {
                name: DEFAULT_ENTRANCE.animation.to_string(),
                delay_ms: 0,
                duration_ms: self.duration_ms.unwrap_or(DEFAULT_ENTRANCE.duration_ms),
            },
        }
    }
}

/// Something that can carry animation metadata and play an animation
pub trait Animatable: Clone + PartialEq {
    fn animation_metadata(&self) -> AnimationMetadata;
    fn play(&self, animation: &ResolvedAnimation);
}

/// Viewport-visibility watcher
pub trait IntersectionWatcher<E> {
    fn watch(&mut self, element: &E);
    fn unwatch(&mut self, element: &E);
    fn disconnect(&mut self);
}

pub struct ScrollAnimator<E, W> {
    watcher: W,
    observed: Vec<E>,
    animated: Vec<E>,
}

impl<E: Animatable, W: IntersectionWatcher<E>> ScrollAnimator<E, W> {
    pub fn new(watcher: W) -> Self {
        Self {
            watcher,
            observed: Vec::new(),
            animated: Vec::new(),
        }
    }

    /// Start watching an element. Observing twice is a no-op.
    pub fn observe(&mut self, element: &E) {
        if self.observed.contains(element) {
            return;
        }
        self.watcher.watch(element);
        self.observed.push(element.clone());
    }

    /// Stop watching an element and forget that it already animated
    pub fn unobserve(&mut self, element: &E) {
        if let Some(pos) = self.observed.iter().position(|e| e == element) {
            self.observed.remove(pos);
            self.watcher.unwatch(element);
        }
        self.animated.retain(|e| e != element);
    }

    pub fn disconnect(&mut self) {
        self.watcher.disconnect();
        self.observed.clear();
        self.animated.clear();
    }

    /// Feed an intersection change. Returns the animation that was played, if any.
    pub fn handle_intersection(&mut self, element: &E, is_intersecting: bool) -> Option<ResolvedAnimation> {
        if !is_intersecting || !self.observed.contains(element) || self.animated.contains(element) {
            return None;
        }
        let animation = element.animation_metadata().resolve();
        element.play(&animation);
        self.animated.push(element.clone());
        Some(animation)
    }

    pub fn is_observed(&self, element: &E) -> bool {
        self.observed.contains(element)
    }

    pub fn has_animated(&self, element: &E) -> bool {
        self.animated.contains(element)
    }
}

const DATA_ANIMATION: &str = "data-animation";
const DATA_DELAY: &str = "data-animation-delay";
const DATA_DURATION: &str = "data-animation-duration";
const VISIBLE_CLASS: &str = "is-visible";

impl Animatable for HtmlElement {
    fn animation_metadata(&self) -> AnimationMetadata {
        let number = |attr: &str| self.get_attribute(attr).and_then(|v| v.trim().parse::<u32>().ok());
        AnimationMetadata {
            name: self.get_attribute(DATA_ANIMATION),
            delay_ms: number(DATA_DELAY),
            duration_ms: number(DATA_DURATION),
        }
    }

    fn play(&self, animation: &ResolvedAnimation) {
        let style = self.style();
        let _ = style.set_property("animation-delay", &format!("{}ms", animation.delay_ms));
        let _ = style.set_property("animation-duration", &format!("{}ms", animation.duration_ms));
        let classes = self.class_list();
        let _ = classes.add_2(&format!("animate-{}", animation.name), VISIBLE_CLASS);
    }
}

/// Watcher backed by a browser `IntersectionObserver`
pub struct DomIntersectionWatcher {
    observer: IntersectionObserver,
}

impl IntersectionWatcher<HtmlElement> for DomIntersectionWatcher {
    fn watch(&mut self, element: &HtmlElement) {
        self.observer.observe(element);
    }

    fn unwatch(&mut self, element: &HtmlElement) {
        self.observer.unobserve(element);
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

type DomScrollAnimator = ScrollAnimator<HtmlElement, DomIntersectionWatcher>;

struct WebScrollAnimatorInner {
    animator: RefCell<DomScrollAnimator>,
    // Keeps the JS callback alive for as long as the observer exists
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// Browser scroll animator. Inert when `IntersectionObserver` is unavailable.
#[derive(Clone, Default)]
pub struct WebScrollAnimator {
    inner: Option<Rc<WebScrollAnimatorInner>>,
}

impl WebScrollAnimator {
    pub fn new(config: &ScrollAnimatorConfig) -> Self {
        let supported = web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
            .unwrap_or(false);
        if !supported {
            return Self::default();
        }

        let slot: Rc<RefCell<Weak<WebScrollAnimatorInner>>> = Rc::new(RefCell::new(Weak::new()));
        let callback = {
            let slot = slot.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let Some(inner) = slot.borrow().upgrade() else { return };
                    let mut animator = inner.animator.borrow_mut();
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                        let Ok(element) = entry.target().dyn_into::<HtmlElement>() else { continue };
                        animator.handle_intersection(&element, entry.is_intersecting());
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin);

        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(_) => return Self::default(),
        };

        let inner = Rc::new(WebScrollAnimatorInner {
            animator: RefCell::new(ScrollAnimator::new(DomIntersectionWatcher { observer })),
            _callback: callback,
        });
        *slot.borrow_mut() = Rc::downgrade(&inner);

        Self { inner: Some(inner) }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    pub fn observe(&self, element: &HtmlElement) {
        if let Some(inner) = &self.inner {
            inner.animator.borrow_mut().observe(element);
        }
    }

    pub fn unobserve(&self, element: &HtmlElement) {
        if let Some(inner) = &self.inner {
            inner.animator.borrow_mut().unobserve(element);
        }
    }

    pub fn disconnect(&self) {
        if let Some(inner) = &self.inner {
            inner.animator.borrow_mut().disconnect();
        }
    }
}

impl PartialEq for WebScrollAnimator {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone)]
    struct FakeElement {
        id: u32,
        metadata: AnimationMetadata,
        plays: Rc<RefCell<Vec<ResolvedAnimation>>>,
    }

    impl FakeElement {
        fn new(id: u32) -> Self {
            Self {
                id,
                metadata: AnimationMetadata::default(),
                plays: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn play_count(&self) -> usize {
            self.plays.borrow().len()
        }
    }

    impl PartialEq for FakeElement {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Animatable for FakeElement {
        fn animation_metadata(&self) -> AnimationMetadata {
            self.metadata.clone()
        }

        fn play(&self, animation: &ResolvedAnimation) {
            self.plays.borrow_mut().push(animation.clone());
        }
    }

    #[derive(Default)]
    struct FakeWatcher {
        watched: Rc<RefCell<Vec<u32>>>,
        disconnects: Rc<Cell<u32>>,
    }

    impl IntersectionWatcher<FakeElement> for FakeWatcher {
        fn watch(&mut self, element: &FakeElement) {
            self.watched.borrow_mut().push(element.id);
        }

        fn unwatch(&mut self, element: &FakeElement) {
            self.watched.borrow_mut().retain(|id| *id != element.id);
        }

        fn disconnect(&mut self) {
            self.watched.borrow_mut().clear();
            self.disconnects.set(self.disconnects.get() + 1);
        }
    }

    #[test]
    fn test_animates_once_per_observation() {
        let mut animator = ScrollAnimator::new(FakeWatcher::default());
        let element = FakeElement::new(1);

        animator.observe(&element);
        animator.observe(&element);
        assert!(animator.handle_intersection(&element, true).is_some());
        assert!(animator.handle_intersection(&element, false).is_none());
        assert!(animator.handle_intersection(&element, true).is_none());

        assert_eq!(element.play_count(), 1);
    }

    #[test]
    fn test_reobserve_after_unobserve_animates_again() {
        let watcher = FakeWatcher::default();
        let watched = watcher.watched.clone();
        let mut animator = ScrollAnimator::new(watcher);
        let element = FakeElement::new(7);

        animator.observe(&element);
        animator.handle_intersection(&element, true);
        animator.unobserve(&element);
        assert!(watched.borrow().is_empty());
        assert!(!animator.has_animated(&element));

        animator.observe(&element);
        animator.handle_intersection(&element, true);
        assert_eq!(element.play_count(), 2);
    }

    #[test]
    fn test_unobserved_element_is_ignored() {
        let mut animator = ScrollAnimator::new(FakeWatcher::default());
        let element = FakeElement::new(3);
        assert!(animator.handle_intersection(&element, true).is_none());
        assert_eq!(element.play_count(), 0);
    }

    #[test]
    fn test_metadata_drives_animation() {
        let mut animator = ScrollAnimator::new(FakeWatcher::default());
        let mut element = FakeElement::new(2);
        element.metadata = AnimationMetadata {
            name: Some("slide-in-left".to_string()),
            delay_ms: Some(150),
            duration_ms: Some(900),
        };

        animator.observe(&element);
        let played = animator.handle_intersection(&element, true).unwrap();
        assert_eq!(
            played,
            ResolvedAnimation { name: "slide-in-left".to_string(), delay_ms: 150, duration_ms: 900 }
        );
    }

    #[test]
    fn test_missing_metadata_uses_default_entrance() {
        let resolved = AnimationMetadata { name: None, delay_ms: Some(400), duration_ms: None }.resolve();
        assert_eq!(resolved.name, DEFAULT_ENTRANCE.animation);
        assert_eq!(resolved.delay_ms, 0);
        assert_eq!(resolved.duration_ms, DEFAULT_ENTRANCE.duration_ms);
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let watcher = FakeWatcher::default();
        let disconnects = watcher.disconnects.clone();
        let mut animator = ScrollAnimator::new(watcher);
        let element = FakeElement::new(4);

        animator.observe(&element);
        animator.handle_intersection(&element, true);
        animator.disconnect();
        animator.disconnect();

        assert_eq!(disconnects.get(), 2);
        assert!(!animator.is_observed(&element));
        assert!(!animator.has_animated(&element));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element_with(attrs: &[(&str, &str)]) -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        for (name, value) in attrs {
            element.set_attribute(name, value).unwrap();
        }
        element
    }

    #[wasm_bindgen_test]
    fn test_reads_data_attributes() {
        let element = element_with(&[(DATA_ANIMATION, "scale-in"), (DATA_DELAY, "120")]);
        let metadata = element.animation_metadata();
        assert_eq!(metadata.name.as_deref(), Some("scale-in"));
        assert_eq!(metadata.delay_ms, Some(120));
        assert_eq!(metadata.duration_ms, None);
    }

    #[wasm_bindgen_test]
    fn test_play_adds_classes() {
        let element = element_with(&[]);
        element.play(&AnimationMetadata::default().resolve());
        assert!(element.class_list().contains("animate-fade-in-up"));
        assert!(element.class_list().contains(VISIBLE_CLASS));
    }

    #[wasm_bindgen_test]
    fn test_web_animator_observe_and_disconnect() {
        let animator = WebScrollAnimator::new(&ScrollAnimatorConfig::default());
        assert!(animator.is_active());
        let element = element_with(&[]);
        animator.observe(&element);
        animator.unobserve(&element);
        animator.disconnect();
        animator.disconnect();
    }
}
