//! Component tree (RFC 5545 §3.4-3.6).

use std::fmt;

use cadence_core::constants::{ICALENDAR_VERSION, PRODUCT_ID};

use super::Property;

/// The components the scheduler looks at. Anything else is carried as `Other`
/// under its original name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    Calendar,
    Event,
    Alarm,
    #[default]
    Other,
}

impl ComponentKind {
    /// Case-insensitive lookup by component name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("VCALENDAR") {
            Self::Calendar
        } else if name.eq_ignore_ascii_case("VEVENT") {
            Self::Event
        } else if name.eq_ignore_ascii_case("VALARM") {
            Self::Alarm
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Alarm => "VALARM",
            Self::Other => "X-OTHER",
        })
    }
}

/// A `BEGIN:<name>` .. `END:<name>` block with its properties and nested blocks,
/// both in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub kind: ComponentKind,
    /// Upper-cased name as written, so `VTODO` or `X-FOO` survive a round trip.
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            kind: ComponentKind::from_name(name),
            name: name.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::named("VCALENDAR")
    }

    #[must_use]
    pub fn event() -> Self {
        Self::named("VEVENT")
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// First property called `name`, ignoring case.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn text_of(&self, name: &str) -> Option<&str> {
        self.get_property(name).and_then(Property::as_text)
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.text_of("UID")
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.text_of("SUMMARY")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.text_of("DESCRIPTION")
    }

    fn children_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.children_of(ComponentKind::Event).collect()
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<&Component> {
        self.children_of(ComponentKind::Alarm).collect()
    }
}

/// A parsed or generated VCALENDAR document.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// An empty calendar carrying VERSION and PRODID.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text("VERSION", ICALENDAR_VERSION));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.text_of("PRODID")
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.text_of("VERSION")
    }

    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events()
    }

    /// The VEVENT a single-event document is about.
    #[must_use]
    pub fn first_event(&self) -> Option<&Component> {
        self.root.children_of(ComponentKind::Event).next()
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new(PRODUCT_ID)
    }
}
