//! Celebratory sparkle, heart and confetti effects.
//!
//! Every effect lives in an [`EffectRegistry`] with an explicit expiry time.
//! The browser driver arms one timer per spawned batch at the batch's expiry.
//! When it fires it sweeps everything expired and then detaches the batch's
//! own effects, so removal depends neither on animation events nor on the
//! wall clock moving forward.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::services::logging::Logger;

/// Delay before the hearts of a milestone celebration
pub const MILESTONE_HEARTS_DELAY_MS: u32 = 300;
/// Delay before the confetti of a milestone celebration
pub const MILESTONE_CONFETTI_DELAY_MS: u32 = 600;

const SWEEP_SLACK_MS: u32 = 50;

const CONFETTI_COLORS: [&str; 6] = ["#F472B6", "#FBBF24", "#34D399", "#60A5FA", "#A78BFA", "#FB7185"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Sparkle,
    Heart,
    Confetti,
}

impl EffectKind {
    pub fn default_count(&self) -> usize {
        match self {
            EffectKind::Sparkle => 12,
            EffectKind::Heart => 5,
            EffectKind::Confetti => 30,
        }
    }

    /// Upper bound after which an instance is removed, whatever its animation did
    pub fn removal_bound_ms(&self) -> u32 {
        match self {
            EffectKind::Sparkle => 1500,
            EffectKind::Heart => 4000,
            EffectKind::Confetti => 2500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Sparkle => "sparkle",
            EffectKind::Heart => "heart",
            EffectKind::Confetti => "confetti",
        }
    }
}

/// Randomized placement and timing of one effect.
///
/// For sparkles and confetti `x`/`y` are pixel offsets from the container
/// centre. For hearts `x` is the horizontal start in percent of the container
/// width and `y` the rise distance in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInstance {
    pub id: u64,
    pub kind: EffectKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: f64,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub color: Option<&'static str>,
}

/// Uniform random numbers in [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// `Math.random()`
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

impl EffectInstance {
    pub fn generate(id: u64, kind: EffectKind, rng: &mut impl RandomSource) -> Self {
        match kind {
            EffectKind::Sparkle => {
                let angle = rng.range(0.0, 360.0).to_radians();
                let distance = rng.range(30.0, 80.0);
                Self {
                    id,
                    kind,
                    x: angle.cos() * distance,
                    y: angle.sin() * distance,
                    size: rng.range(4.0, 10.0),
                    rotation: 0.0,
                    delay_ms: rng.range(0.0, 200.0) as u32,
                    duration_ms: rng.range(600.0, 1000.0) as u32,
                    color: None,
                }
            }
            EffectKind::Heart => Self {
                id,
                kind,
                x: rng.range(10.0, 90.0),
                y: rng.range(120.0, 220.0),
                size: rng.range(16.0, 28.0),
                rotation: 0.0,
                delay_ms: rng.range(0.0, 500.0) as u32,
                duration_ms: rng.range(2000.0, 3000.0) as u32,
                color: None,
            },
            EffectKind::Confetti => {
                let angle = rng.range(0.0, 360.0).to_radians();
                let distance = rng.range(80.0, 200.0);
                let color_index = (rng.next_f64() * CONFETTI_COLORS.len() as f64) as usize;
                Self {
                    id,
                    kind,
                    x: angle.cos() * distance,
                    y: angle.sin() * distance,
                    size: rng.range(6.0, 12.0),
                    rotation: rng.range(0.0, 720.0),
                    delay_ms: rng.range(0.0, 300.0) as u32,
                    duration_ms: rng.range(1000.0, 2000.0) as u32,
                    color: Some(CONFETTI_COLORS[color_index.min(CONFETTI_COLORS.len() - 1)]),
                }
            }
        }
    }
}

/// Where effect nodes get attached and detached
pub trait EffectHost {
    type Container: Clone;
    type Node;

    fn attach(&self, container: &Self::Container, effect: &EffectInstance) -> Option<Self::Node>;
    /// Must tolerate a node that is already gone
    fn detach(&self, node: &Self::Node);
}

struct LiveEffect<N> {
    id: u64,
    kind: EffectKind,
    node: N,
    expires_at: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedBatch {
    pub kind: EffectKind,
    pub ids: Vec<u64>,
    /// Time by which every instance of the batch is due for removal
    pub expires_at: f64,
}

pub struct EffectRegistry<H: EffectHost> {
    host: H,
    live: Vec<LiveEffect<H::Node>>,
    next_id: u64,
}

impl<H: EffectHost> EffectRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            live: Vec::new(),
            next_id: 1,
        }
    }

    /// Create and attach `count` instances. `now` is wall-clock milliseconds.
    pub fn spawn(
        &mut self,
        kind: EffectKind,
        count: usize,
        container: &H::Container,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> SpawnedBatch {
        let expires_at = now + f64::from(kind.removal_bound_ms());
        let mut ids = Vec::with_capacity(count);

        for _ in 0..count {
            let id = self.next_id;
            self.next_id += 1;

            let effect = EffectInstance::generate(id, kind, rng);
            if let Some(node) = self.host.attach(container, &effect) {
                self.live.push(LiveEffect { id, kind, node, expires_at });
                ids.push(id);
            }
        }

        SpawnedBatch { kind, ids, expires_at }
    }

    /// Detach every effect whose expiry has passed. Returns how many were removed.
    pub fn sweep(&mut self, now: f64) -> usize {
        let before = self.live.len();
        let host = &self.host;
        self.live.retain(|effect| {
            if effect.expires_at <= now {
                host.detach(&effect.node);
                false
            } else {
                true
            }
        });
        before - self.live.len()
    }

    /// Detach the given effects whatever their expiry. Ids no longer live are skipped.
    pub fn remove_batch(&mut self, ids: &[u64]) -> usize {
        let before = self.live.len();
        let host = &self.host;
        self.live.retain(|effect| {
            if ids.contains(&effect.id) {
                host.detach(&effect.node);
                false
            } else {
                true
            }
        });
        before - self.live.len()
    }

    /// Detach everything immediately
    pub fn clear(&mut self) {
        for effect in self.live.drain(..) {
            self.host.detach(&effect.node);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_count_of(&self, kind: EffectKind) -> usize {
        self.live.iter().filter(|e| e.kind == kind).count()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.live.iter().any(|e| e.id == id)
    }
}

/// Attaches effects as absolutely positioned `<span>`s
pub struct DomEffectHost;

impl DomEffectHost {
    fn glyph(kind: EffectKind) -> &'static str {
        match kind {
            EffectKind::Sparkle => "✨",
            EffectKind::Heart => "💖",
            EffectKind::Confetti => "",
        }
    }

    fn style_for(effect: &EffectInstance) -> String {
        let mut style = match effect.kind {
            EffectKind::Heart => format!(
                "position:absolute;left:{:.1}%;bottom:0;font-size:{:.1}px;--rise:{:.1}px;",
                effect.x, effect.size, effect.y
            ),
            EffectKind::Sparkle | EffectKind::Confetti => format!(
                "position:absolute;left:50%;top:50%;width:{size:.1}px;height:{size:.1}px;font-size:{size:.1}px;\
                 --dx:{:.1}px;--dy:{:.1}px;--rotation:{:.1}deg;",
                effect.x,
                effect.y,
                effect.rotation,
                size = effect.size
            ),
        };
        style.push_str(&format!(
            "pointer-events:none;animation-delay:{}ms;animation-duration:{}ms;",
            effect.delay_ms, effect.duration_ms
        ));
        if let Some(color) = effect.color {
            style.push_str(&format!("background:{};", color));
        }
        style
    }
}

impl EffectHost for DomEffectHost {
    type Container = Element;
    type Node = Element;

    fn attach(&self, container: &Element, effect: &EffectInstance) -> Option<Element> {
        let document = container.owner_document()?;
        let node = document.create_element("span").ok()?;
        node.set_class_name(&format!("celebration-effect celebration-{}", effect.kind.as_str()));
        node.set_attribute("style", &Self::style_for(effect)).ok()?;
        node.set_attribute("aria-hidden", "true").ok()?;
        node.set_text_content(Some(Self::glyph(effect.kind)));
        container.append_child(&node).ok()?;
        Some(node)
    }

    fn detach(&self, node: &Element) {
        // no-op when the node was already removed
        node.remove();
    }
}

/// Browser celebration effects with a replaceable default container
#[derive(Clone)]
pub struct CelebrationEffects {
    registry: Rc<RefCell<EffectRegistry<DomEffectHost>>>,
    default_container: Rc<RefCell<Option<Element>>>,
    logger: Logger,
}

impl CelebrationEffects {
    pub fn new(logger: Logger) -> Self {
        Self {
            registry: Rc::new(RefCell::new(EffectRegistry::new(DomEffectHost))),
            default_container: Rc::new(RefCell::new(None)),
            logger,
        }
    }

    pub fn set_default_container(&self, container: Option<Element>) {
        *self.default_container.borrow_mut() = container;
    }

    fn resolve_container(&self, container: Option<&Element>) -> Option<Element> {
        if let Some(container) = container {
            return Some(container.clone());
        }
        if let Some(container) = self.default_container.borrow().as_ref() {
            return Some(container.clone());
        }
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .map(Element::from)
    }

    pub fn sparkles(&self, count: usize, container: Option<&Element>) {
        self.spawn(EffectKind::Sparkle, count, container);
    }

    pub fn hearts(&self, count: usize, container: Option<&Element>) {
        self.spawn(EffectKind::Heart, count, container);
    }

    pub fn confetti(&self, count: usize, container: Option<&Element>) {
        self.spawn(EffectKind::Confetti, count, container);
    }

    /// Sparkles now, hearts shortly after, confetti last
    pub fn celebrate_milestone(&self, container: Option<Element>) {
        self.sparkles(EffectKind::Sparkle.default_count(), container.as_ref());

        let effects = self.clone();
        let hearts_container = container.clone();
        spawn_local(async move {
            TimeoutFuture::new(MILESTONE_HEARTS_DELAY_MS).await;
            effects.hearts(EffectKind::Heart.default_count(), hearts_container.as_ref());
        });

        let effects = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(MILESTONE_CONFETTI_DELAY_MS).await;
            effects.confetti(EffectKind::Confetti.default_count(), container.as_ref());
        });
    }

    pub fn live_count(&self) -> usize {
        self.registry.borrow().live_count()
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().clear();
    }

    fn spawn(&self, kind: EffectKind, count: usize, container: Option<&Element>) {
        let Some(container) = self.resolve_container(container) else {
            self.logger.debug("No container available, skipping effect");
            return;
        };

        let batch = self
            .registry
            .borrow_mut()
            .spawn(kind, count, &container, js_sys::Date::now(), &mut JsRandom);
        self.logger.debug(&format!("Spawned {} {} effect(s)", batch.ids.len(), kind.as_str()));

        let registry = self.registry.clone();
        spawn_local(async move {
            TimeoutFuture::new(kind.removal_bound_ms() + SWEEP_SLACK_MS).await;
            let mut registry = registry.borrow_mut();
            registry.sweep(js_sys::Date::now());
            // the batch's bound has elapsed even if the wall clock stepped back
            registry.remove_batch(&batch.ids);
        });
    }
}

impl PartialEq for CelebrationEffects {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::services::logging::{LogLevel, MemorySink};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_sparkles_removed_after_bound() {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&container).unwrap();

        let logger = Logger::with_sinks("celebration-test", LogLevel::Debug, vec![Box::new(MemorySink::new())]);
        let effects = CelebrationEffects::new(logger);
        effects.sparkles(5, Some(&container));
        assert_eq!(container.child_element_count(), 5);

        container.set_inner_html("");
        TimeoutFuture::new(EffectKind::Sparkle.removal_bound_ms() + 200).await;
        assert_eq!(effects.live_count(), 0);
    }
}
