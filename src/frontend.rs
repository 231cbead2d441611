use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::{Interval, Timeout};
use js_sys::{Array, Math};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::config::InteractionConfig;
use crate::logging::{log_event, LogLevel};
use crate::motion::{
    active_section_index, adjacent_section, follower_offset, lazy_source, nav_link_matches,
    navbar_scrolled, resolve_anchor, reveal_schedule, revealed_indices, timeline_hidden_transform,
    CardRect, FrameGate, NavKey, ParticleSpec, PointerTransition, SectionBox, Tilt, ACTIVE_CLASS, FLOAT_UP_KEYFRAMES, HOVER_CLASS,
    INTEREST_HIDDEN_TRANSFORM, INTEREST_SHOWN_TRANSFORM, NAV_SECTION_IDS, REVEAL_TRANSITION,
    SCROLLED_CLASS, TILT_NEUTRAL, TIMELINE_SHOWN_TRANSFORM, VISIBLE_CLASS,
};

const HOVER_TARGETS: &str = "a, button, .project-card, .interest";
const SAME_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
const LAZY_IMAGES: &str = "img[data-src]";
const LAZY_SOURCE_ATTRIBUTE: &str = "data-src";

fn current_document() -> Option<Document> {
    window()?.document()
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

fn set_class(element: &Element, class: &str, present: bool) {
    let _ = element.class_list().toggle_with_force(class, present);
}

fn smooth_scroll_to(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn read_config(document: &Document) -> InteractionConfig {
    let Some(root) = document.document_element() else {
        return InteractionConfig::default();
    };

    InteractionConfig::from_attributes(|name| root.get_attribute(name))
}

fn inject_float_keyframes(document: &Document) {
    let Some(head) = document.head() else {
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };

    style.set_text_content(Some(FLOAT_UP_KEYFRAMES));
    let _ = head.append_child(&style);
}

fn install_cursor_follower(document: &Document) -> bool {
    let Some(cursor) = query_one(document, ".cursor") else {
        return false;
    };

    EventListener::new(document, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let (left, top) = follower_offset(event.client_x(), event.client_y());
        set_style(&cursor, "left", &left);
        set_style(&cursor, "top", &top);
    })
    .forget();

    true
}

fn install_hover_toggle(document: &Document) -> usize {
    let Some(cursor) = query_one(document, ".cursor") else {
        return 0;
    };
    let targets = query_all(document, HOVER_TARGETS);

    for target in &targets {
        for (event_type, transition) in [
            ("mouseenter", PointerTransition::Enter),
            ("mouseleave", PointerTransition::Leave),
        ] {
            let cursor = cursor.clone();
            EventListener::new(target, event_type, move |_: &Event| {
                set_class(&cursor, HOVER_CLASS, transition.hover_active());
            })
            .forget();
        }
    }

    targets.len()
}

fn install_smooth_scroll(document: &Document) -> usize {
    let anchors = query_all(document, SAME_PAGE_ANCHORS);

    for anchor in &anchors {
        let document = document.clone();
        let link = anchor.clone();
        EventListener::new_with_options(
            anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                event.prevent_default();
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(target) = resolve_anchor(&href, |id| document.get_element_by_id(id)) else {
                    return;
                };
                smooth_scroll_to(&target);
            },
        )
        .forget();
    }

    anchors.len()
}

struct ScrollWatcher {
    document: Document,
    navbar: Option<Element>,
    nav_links: Vec<Element>,
    config: Rc<InteractionConfig>,
    gate: FrameGate,
    frame: RefCell<Option<AnimationFrame>>,
}

impl ScrollWatcher {
    fn new(document: &Document, config: Rc<InteractionConfig>) -> Self {
        Self {
            document: document.clone(),
            navbar: query_one(document, ".navbar"),
            nav_links: query_all(document, ".nav-link"),
            config,
            gate: FrameGate::default(),
            frame: RefCell::new(None),
        }
    }

    fn schedule(self: &Rc<Self>) {
        if !self.gate.try_arm() {
            return;
        }

        let watcher = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            watcher.frame.borrow_mut().take();
            watcher.gate.release();
            watcher.update();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn update(&self) {
        let scroll_y = window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0);

        if let Some(navbar) = self.navbar.as_ref() {
            set_class(
                navbar,
                SCROLLED_CLASS,
                navbar_scrolled(scroll_y, self.config.navbar_threshold()),
            );
        }

        let sections = query_all(&self.document, "section[id]");
        let boxes: Vec<Option<SectionBox>> = sections
            .iter()
            .map(|section| {
                let rect = section.get_bounding_client_rect();
                let height = section
                    .dyn_ref::<HtmlElement>()
                    .map(|section| f64::from(section.offset_height()))
                    .unwrap_or_else(|| rect.height());
                Some(SectionBox::new(rect.top(), height))
            })
            .collect();
        let current = active_section_index(&boxes, self.config.section_marker())
            .and_then(|index| sections.get(index))
            .and_then(|section| section.get_attribute("id"));

        for link in &self.nav_links {
            let is_current = match (current.as_deref(), link.get_attribute("href")) {
                (Some(id), Some(href)) => nav_link_matches(&href, id),
                _ => false,
            };
            set_class(link, ACTIVE_CLASS, is_current);
        }
    }
}

fn install_scroll_watcher(document: &Document, config: &Rc<InteractionConfig>) {
    let Some(win) = window() else {
        return;
    };
    let watcher = Rc::new(ScrollWatcher::new(document, Rc::clone(config)));

    EventListener::new(&win, "scroll", move |_: &Event| watcher.schedule()).forget();
}

fn observe_all<F>(
    config: &InteractionConfig,
    behavior: &'static str,
    targets: &[Element],
    options: &IntersectionObserverInit,
    mut on_entries: F,
) where
    F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_entries(entries, &observer);
        },
    );

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)
    else {
        log_event(
            config.log_level,
            LogLevel::Warn,
            "observer_unavailable",
            json!({ "behavior": behavior }),
        );
        return;
    };
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
}

fn observer_options(threshold: Option<f64>, root_margin: Option<&str>) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    if let Some(threshold) = threshold {
        options.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(root_margin) = root_margin {
        options.set_root_margin(root_margin);
    }
    options
}

fn install_fade_in(document: &Document, config: &InteractionConfig) -> usize {
    let targets = query_all(document, ".fade-in");
    let options = observer_options(Some(0.1), Some("0px 0px -50px 0px"));

    observe_all(config, "fade_in", &targets, &options, |entries, observer| {
        let intersecting: Vec<bool> = entries.iter().map(|entry| entry.is_intersecting()).collect();
        for index in revealed_indices(&intersecting) {
            let target = entries[index].target();
            add_class(&target, VISIBLE_CLASS);
            observer.unobserve(&target);
        }
    });

    targets.len()
}

fn install_card_tilt(document: &Document) -> usize {
    let cards = query_all(document, ".project-card");

    for card in &cards {
        let tilted = card.clone();
        EventListener::new(card, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = tilted.get_bounding_client_rect();
            let tilt = Tilt::from_pointer(
                CardRect {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                },
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
            set_style(&tilted, "transform", &tilt.transform());
        })
        .forget();

        let reset = card.clone();
        EventListener::new(card, "mouseleave", move |_: &Event| {
            set_style(&reset, "transform", TILT_NEUTRAL);
        })
        .forget();
    }

    cards.len()
}

fn prime_hidden(element: &Element, transform: &str) {
    set_style(element, "opacity", "0");
    set_style(element, "transform", transform);
    set_style(element, "transition", REVEAL_TRANSITION);
}

fn reveal_after(target: Element, delay_ms: u32, transform: &'static str) {
    Timeout::new(delay_ms, move || {
        set_style(&target, "opacity", "1");
        set_style(&target, "transform", transform);
    })
    .forget();
}

fn staggered_reveal(
    step_ms: u32,
    transform: &'static str,
) -> impl FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static {
    move |entries: Vec<IntersectionObserverEntry>, observer: &IntersectionObserver| {
        let intersecting: Vec<bool> = entries.iter().map(|entry| entry.is_intersecting()).collect();
        for (index, delay_ms) in reveal_schedule(&intersecting, step_ms) {
            let target = entries[index].target();
            observer.unobserve(&target);
            reveal_after(target, delay_ms, transform);
        }
    }
}

fn install_interest_reveal(document: &Document, config: &InteractionConfig) -> usize {
    let cards = query_all(document, ".interest");
    for card in &cards {
        prime_hidden(card, INTEREST_HIDDEN_TRANSFORM);
    }

    let options = observer_options(Some(0.1), None);
    observe_all(
        config,
        "interest_reveal",
        &cards,
        &options,
        staggered_reveal(config.interest_stagger_ms, INTEREST_SHOWN_TRANSFORM),
    );

    cards.len()
}

fn install_timeline_reveal(document: &Document, config: &InteractionConfig) -> usize {
    let items = query_all(document, ".timeline-item");
    for (index, item) in items.iter().enumerate() {
        prime_hidden(item, timeline_hidden_transform(index));
    }

    let options = observer_options(Some(0.3), None);
    observe_all(
        config,
        "timeline_reveal",
        &items,
        &options,
        staggered_reveal(config.timeline_stagger_ms, TIMELINE_SHOWN_TRANSFORM),
    );

    items.len()
}

fn spawn_particle(document: &Document, config: &InteractionConfig) {
    let Some(hero) = query_one(document, ".hero") else {
        return;
    };
    let Ok(particle) = document.create_element("div") else {
        return;
    };

    let spec = ParticleSpec::from_samples(Math::random(), Math::random(), Math::random(), Math::random());
    for (property, value) in spec.style_properties() {
        set_style(&particle, property, &value);
    }
    if hero.append_child(&particle).is_err() {
        return;
    }

    log_event(
        config.log_level,
        LogLevel::Debug,
        "particle_spawned",
        json!({ "size_px": spec.size_px, "float_seconds": spec.float_seconds }),
    );

    Timeout::new(config.particle_lifetime_ms, move || {
        if let Some(parent) = particle.parent_node() {
            let _ = parent.remove_child(&particle);
        }
    })
    .forget();
}

fn install_particle_spawner(document: &Document, config: &Rc<InteractionConfig>) -> bool {
    if !config.particles_enabled || prefers_reduced_motion() {
        return false;
    }

    let interval_ms = config.particle_interval_ms;
    let document = document.clone();
    let config = Rc::clone(config);
    Interval::new(interval_ms, move || spawn_particle(&document, &config)).forget();

    true
}

fn install_keyboard_navigation(document: &Document, config: &Rc<InteractionConfig>) {
    let sections_root = document.clone();
    let config = Rc::clone(config);

    EventListener::new(document, "keydown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(key) = NavKey::from_key(&event.key()) else {
            return;
        };

        let sections: Vec<Option<Element>> = NAV_SECTION_IDS
            .iter()
            .map(|id| sections_root.get_element_by_id(id))
            .collect();
        let boxes: Vec<Option<SectionBox>> = sections
            .iter()
            .map(|section| {
                section.as_ref().map(|section| {
                    let rect = section.get_bounding_client_rect();
                    SectionBox {
                        top: rect.top(),
                        bottom: rect.bottom(),
                    }
                })
            })
            .collect();

        let current = active_section_index(&boxes, config.section_marker());
        let Some(next) = adjacent_section(current, sections.len(), key) else {
            return;
        };
        let Some(target) = sections.get(next).and_then(Option::as_ref) else {
            return;
        };

        smooth_scroll_to(target);
        log_event(
            config.log_level,
            LogLevel::Debug,
            "section_navigated",
            json!({
                "from": current.map(|index| NAV_SECTION_IDS[index]),
                "to": NAV_SECTION_IDS[next],
            }),
        );
    })
    .forget();
}

fn install_lazy_images(document: &Document, config: &InteractionConfig) -> usize {
    let images = query_all(document, LAZY_IMAGES);
    let options = observer_options(None, Some("50px"));

    observe_all(config, "lazy_images", &images, &options, |entries, observer| {
        let intersecting: Vec<bool> = entries.iter().map(|entry| entry.is_intersecting()).collect();
        for index in revealed_indices(&intersecting) {
            let image = entries[index].target();
            let Some(source) = lazy_source(image.get_attribute(LAZY_SOURCE_ATTRIBUTE)) else {
                continue;
            };
            let _ = image.set_attribute("src", &source);
            let _ = image.remove_attribute(LAZY_SOURCE_ATTRIBUTE);
            observer.unobserve(&image);
        }
    });

    images.len()
}

fn install_hero_intro(document: &Document, config: &InteractionConfig) {
    let delay_ms = config.hero_intro_delay_ms;
    let headings_root = document.clone();
    let reveal = move || {
        Timeout::new(delay_ms, move || {
            for selector in [".hero h1", ".hero h2"] {
                if let Some(heading) = query_one(&headings_root, selector) {
                    set_style(&heading, "opacity", "1");
                }
            }
        })
        .forget();
    };

    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_: &Event| reveal()).forget();
    } else {
        reveal();
    }
}

pub fn run() {
    let Some(document) = current_document() else {
        return;
    };
    let config = Rc::new(read_config(&document));

    inject_float_keyframes(&document);
    let cursor = install_cursor_follower(&document);
    let hover_targets = install_hover_toggle(&document);
    let anchors = install_smooth_scroll(&document);
    install_scroll_watcher(&document, &config);
    let fade_ins = install_fade_in(&document, &config);
    let cards = install_card_tilt(&document);
    let interests = install_interest_reveal(&document, &config);
    let particles = install_particle_spawner(&document, &config);
    let timeline_items = install_timeline_reveal(&document, &config);
    install_keyboard_navigation(&document, &config);
    let lazy_images = install_lazy_images(&document, &config);
    install_hero_intro(&document, &config);

    log_event(
        config.log_level,
        LogLevel::Info,
        "interactions_ready",
        json!({
            "config": &*config,
            "cursor": cursor,
            "hover_targets": hover_targets,
            "anchors": anchors,
            "fade_ins": fade_ins,
            "cards": cards,
            "interests": interests,
            "particles": particles,
            "timeline_items": timeline_items,
            "lazy_images": lazy_images,
        }),
    );
}
