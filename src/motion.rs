use std::cell::Cell;

pub const HOVER_CLASS: &str = "hover";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";

pub const TILT_PERSPECTIVE_PX: f64 = 1000.0;
pub const TILT_DIVISOR: f64 = 10.0;
pub const TILT_LIFT_PX: f64 = -10.0;
pub const TILT_NEUTRAL: &str = "perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(0px)";

pub const INTEREST_HIDDEN_TRANSFORM: &str = "translateY(30px) scale(0.9)";
pub const INTEREST_SHOWN_TRANSFORM: &str = "translateY(0px) scale(1)";
pub const TIMELINE_SHOWN_TRANSFORM: &str = "translateX(0px)";
pub const REVEAL_TRANSITION: &str = "all 0.6s ease";

pub const NAV_SECTION_IDS: [&str; 6] = ["home", "about", "projects", "experience", "interests", "contact"];

pub const FLOAT_UP_KEYFRAMES: &str = "
  @keyframes floatUp {
    to {
      transform: translateY(-100vh) rotate(360deg);
      opacity: 0;
    }
  }
";

pub fn px(value: f64) -> String {
    format!("{value}px")
}

pub fn follower_offset(client_x: i32, client_y: i32) -> (String, String) {
    (px(f64::from(client_x)), px(f64::from(client_y)))
}

pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn resolve_anchor<T>(href: &str, lookup: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    anchor_target_id(href).and_then(lookup)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTransition {
    Enter,
    Leave,
}

impl PointerTransition {
    pub fn hover_active(self) -> bool {
        matches!(self, Self::Enter)
    }
}

pub fn navbar_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

pub fn nav_link_matches(href: &str, section_id: &str) -> bool {
    anchor_target_id(href) == Some(section_id)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBox {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn spans(&self, marker_px: f64) -> bool {
        self.top <= marker_px && self.bottom > marker_px
    }
}

pub fn active_section_index(boxes: &[Option<SectionBox>], marker_px: f64) -> Option<usize> {
    boxes
        .iter()
        .position(|section| section.is_some_and(|section| section.spans(marker_px)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Down),
            "ArrowUp" => Some(Self::Up),
            _ => None,
        }
    }
}

pub fn adjacent_section(current: Option<usize>, len: usize, key: NavKey) -> Option<usize> {
    match (key, current) {
        (NavKey::Down, None) => (len > 0).then_some(0),
        (NavKey::Down, Some(index)) => (index + 1 < len).then_some(index + 1),
        (NavKey::Up, Some(index)) => index.checked_sub(1),
        (NavKey::Up, None) => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub fn from_pointer(rect: CardRect, client_x: f64, client_y: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;

        Self {
            rotate_x: (y - center_y) / TILT_DIVISOR,
            rotate_y: (center_x - x) / TILT_DIVISOR,
        }
    }

    pub fn transform(self) -> String {
        format!(
            "perspective({TILT_PERSPECTIVE_PX}px) rotateX({}deg) rotateY({}deg) translateY({TILT_LIFT_PX}px)",
            self.rotate_x, self.rotate_y
        )
    }
}

pub fn stagger_delay_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
}

pub fn reveal_schedule(intersecting: &[bool], step_ms: u32) -> Vec<(usize, u32)> {
    intersecting
        .iter()
        .enumerate()
        .filter(|(_, is_intersecting)| **is_intersecting)
        .map(|(index, _)| (index, stagger_delay_ms(index, step_ms)))
        .collect()
}

pub fn revealed_indices(intersecting: &[bool]) -> Vec<usize> {
    intersecting
        .iter()
        .enumerate()
        .filter_map(|(index, is_intersecting)| is_intersecting.then_some(index))
        .collect()
}

pub fn lazy_source(placeholder: Option<String>) -> Option<String> {
    placeholder.filter(|source| !source.is_empty())
}

pub fn timeline_hidden_transform(document_index: usize) -> &'static str {
    if document_index % 2 == 0 {
        "translateX(-50px)"
    } else {
        "translateX(50px)"
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub size_px: f64,
    pub opacity: f64,
    pub left_percent: f64,
    pub float_seconds: f64,
}

impl ParticleSpec {
    pub fn from_samples(size: f64, opacity: f64, left: f64, duration: f64) -> Self {
        Self {
            size_px: size * 6.0 + 2.0,
            opacity: opacity * 0.5 + 0.2,
            left_percent: left * 100.0,
            float_seconds: duration * 3.0 + 4.0,
        }
    }

    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        let size = px(self.size_px);
        vec![
            ("position", "absolute".to_string()),
            ("width", size.clone()),
            ("height", size),
            ("background", format!("rgba(255, 255, 255, {})", self.opacity)),
            ("border-radius", "50%".to_string()),
            ("left", format!("{}%", self.left_percent)),
            ("top", "100%".to_string()),
            ("pointer-events", "none".to_string()),
            (
                "animation",
                format!("floatUp {}s linear forwards", self.float_seconds),
            ),
        ]
    }
}

#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    pub fn try_arm(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }
}
