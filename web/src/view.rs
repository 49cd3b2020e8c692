use std::fmt;

/// The fixed set of switchable panels. Exactly one is active at any
/// time; ids match the `data-view` attributes in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Login,
    Signup,
    Terms,
    Contact,
}

impl ViewId {
    /// All panels, in nav order.
    pub const ALL: [ViewId; 5] = [
        ViewId::Home,
        ViewId::Login,
        ViewId::Signup,
        ViewId::Terms,
        ViewId::Contact,
    ];

    /// Map a DOM id to a view; `None` for ids with no panel.
    pub fn parse(id: &str) -> Option<ViewId> {
        match id {
            "home" => Some(ViewId::Home),
            "login" => Some(ViewId::Login),
            "signup" => Some(ViewId::Signup),
            "terms" => Some(ViewId::Terms),
            "contact" => Some(ViewId::Contact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Login => "login",
            ViewId::Signup => "signup",
            ViewId::Terms => "terms",
            ViewId::Contact => "contact",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_view() {
        for view in ViewId::ALL {
            assert_eq!(ViewId::parse(view.as_str()), Some(view));
        }
    }

    #[test]
    fn unknown_ids_have_no_panel() {
        assert_eq!(ViewId::parse("bogus-id"), None);
        assert_eq!(ViewId::parse(""), None);
    }
}
