//! The router state machine.
//!
//! Transitions mutate a [`ViewState`] and return the [`Effect`]s the
//! host shell must perform against the real page. The footer jump does
//! not guess at layout timing: [`ViewState::navigate_to_footer`]
//! records the intent and the host calls [`ViewState::view_rendered`]
//! once the view has laid out, receiving [`Effect::ScrollToFooter`]
//! then.

use crate::storage::{Storage, IS_LOGGED_IN_KEY};
use crate::view::ViewId;

/// Work the host shell performs after a transition. A failing icon
/// refresh must never abort navigation; hosts treat these as
/// best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollToTop,
    ScrollToFooter,
    RefreshIcons,
    ShowToast(String),
    ClearFragment,
    /// Full-page redirect (leaves the single-page router entirely).
    Redirect(&'static str),
}

/// Visibility of the two disjoint nav control groups. Always exact
/// complements of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavVisibility {
    pub guest: bool,
    pub user: bool,
}

/// Explicit router state: the active panel, the nav highlight (which
/// may diverge from the active panel on the footer path), and the
/// login flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    active: ViewId,
    nav_highlight: ViewId,
    logged_in: bool,
    pending_footer_scroll: bool,
}

impl ViewState {
    /// Initial state: home active, login flag read from storage.
    pub fn new(storage: &dyn Storage) -> Self {
        Self {
            active: ViewId::Home,
            nav_highlight: ViewId::Home,
            logged_in: read_login_flag(storage),
            pending_footer_scroll: false,
        }
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn nav_highlight(&self) -> ViewId {
        self.nav_highlight
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// True iff `view` is the single active panel.
    pub fn is_active(&self, view: ViewId) -> bool {
        self.active == view
    }

    /// Re-read the login flag. Runs on load and after logout.
    pub fn refresh_login(&mut self, storage: &dyn Storage) {
        self.logged_in = read_login_flag(storage);
    }

    /// Switch to the panel named `id`. Unknown ids fall back to home.
    pub fn navigate(&mut self, id: &str) -> Vec<Effect> {
        let view = ViewId::parse(id).unwrap_or(ViewId::Home);
        tracing::debug!(requested = id, view = %view, "navigate");
        self.activate(view)
    }

    fn activate(&mut self, view: ViewId) -> Vec<Effect> {
        self.active = view;
        self.nav_highlight = view;
        vec![Effect::ScrollToTop, Effect::RefreshIcons]
    }

    /// Jump to the footer: force home, highlight the contact control,
    /// and scroll once the host reports the view has rendered.
    pub fn navigate_to_footer(&mut self) -> Vec<Effect> {
        let effects = self.activate(ViewId::Home);
        self.nav_highlight = ViewId::Contact;
        self.pending_footer_scroll = true;
        effects
    }

    /// Host callback once the active view has laid out. Completes a
    /// pending footer scroll; otherwise a no-op.
    pub fn view_rendered(&mut self) -> Vec<Effect> {
        if self.pending_footer_scroll {
            self.pending_footer_scroll = false;
            vec![Effect::ScrollToFooter]
        } else {
            Vec::new()
        }
    }

    /// Resolve a URL fragment, gated by the login flag. Runs on load
    /// and on every fragment change. `dashboard` and `profile` are
    /// full pages and require the flag; everything unknown lands on
    /// home.
    pub fn resolve_fragment(&mut self, fragment: &str, storage: &dyn Storage) -> Vec<Effect> {
        self.refresh_login(storage);
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        match fragment {
            "dashboard" if self.logged_in => vec![Effect::Redirect("dashboard.html")],
            "dashboard" => vec![Effect::Redirect("login.html")],
            "profile" if self.logged_in => vec![Effect::Redirect("profile.html")],
            "profile" => vec![Effect::Redirect("login.html")],
            "terms" => self.navigate("terms"),
            "contact" => self.navigate("contact"),
            _ => self.navigate("home"),
        }
    }

    /// Log out. `confirmed` is the interactive confirmation; without
    /// it nothing changes. Clears only the login flag so cached user
    /// data survives a later login.
    pub fn logout(&mut self, confirmed: bool, storage: &mut dyn Storage) -> Vec<Effect> {
        if !confirmed {
            return Vec::new();
        }
        storage.remove(IS_LOGGED_IN_KEY);
        self.refresh_login(storage);
        let mut effects = self.activate(ViewId::Home);
        effects.push(Effect::ShowToast(
            "You have been logged out successfully.".to_string(),
        ));
        effects.push(Effect::ClearFragment);
        effects
    }

    /// Guest controls show exactly when the user controls hide.
    pub fn nav_visibility(&self) -> NavVisibility {
        NavVisibility {
            guest: !self.logged_in,
            user: self.logged_in,
        }
    }
}

fn read_login_flag(storage: &dyn Storage) -> bool {
    storage.get(IS_LOGGED_IN_KEY).as_deref() == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{set_logged_in, MemoryStorage, Storage, USER_DATA_KEY};

    fn active_count(state: &ViewState) -> usize {
        ViewId::ALL.iter().filter(|v| state.is_active(**v)).count()
    }

    #[test]
    fn unknown_id_falls_back_to_home() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);
        state.navigate("home");
        state.navigate("bogus-id");
        assert_eq!(state.active(), ViewId::Home);
    }

    #[test]
    fn exactly_one_view_active_after_any_sequence() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);
        for id in ["terms", "nope", "contact", "", "login", "signup", "home"] {
            state.navigate(id);
            assert_eq!(active_count(&state), 1);
        }
    }

    #[test]
    fn navigation_scrolls_to_top_and_refreshes_icons() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);
        let effects = state.navigate("terms");
        assert_eq!(effects, vec![Effect::ScrollToTop, Effect::RefreshIcons]);
        assert_eq!(state.nav_highlight(), ViewId::Terms);
    }

    #[test]
    fn footer_jump_highlights_contact_but_shows_home() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);
        state.navigate_to_footer();
        assert_eq!(state.active(), ViewId::Home);
        assert_eq!(state.nav_highlight(), ViewId::Contact);
    }

    #[test]
    fn footer_scroll_waits_for_the_render_signal() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);

        let effects = state.navigate_to_footer();
        assert!(!effects.contains(&Effect::ScrollToFooter));

        assert_eq!(state.view_rendered(), vec![Effect::ScrollToFooter]);
        // The signal is consumed; later renders do nothing.
        assert!(state.view_rendered().is_empty());
    }

    #[test]
    fn plain_navigation_does_not_arm_the_footer_scroll() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);
        state.navigate("contact");
        assert!(state.view_rendered().is_empty());
    }

    #[test]
    fn gated_fragments_redirect_by_login_flag() {
        let mut storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);

        for fragment in ["#dashboard", "#profile"] {
            assert_eq!(
                state.resolve_fragment(fragment, &storage),
                vec![Effect::Redirect("login.html")]
            );
        }

        set_logged_in(&mut storage);
        assert_eq!(
            state.resolve_fragment("#dashboard", &storage),
            vec![Effect::Redirect("dashboard.html")]
        );
        assert_eq!(
            state.resolve_fragment("#profile", &storage),
            vec![Effect::Redirect("profile.html")]
        );
    }

    #[test]
    fn plain_fragments_map_to_views() {
        let storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);

        state.resolve_fragment("#terms", &storage);
        assert_eq!(state.active(), ViewId::Terms);

        state.resolve_fragment("#contact", &storage);
        assert_eq!(state.active(), ViewId::Contact);

        for fragment in ["", "#", "#whatever"] {
            state.resolve_fragment(fragment, &storage);
            assert_eq!(state.active(), ViewId::Home);
        }
    }

    #[test]
    fn logout_clears_only_the_login_flag() {
        let mut storage = MemoryStorage::new();
        set_logged_in(&mut storage);
        storage.set(USER_DATA_KEY, r#"{"email":"a@x.com"}"#);
        let mut state = ViewState::new(&storage);
        assert!(state.is_logged_in());

        let effects = state.logout(true, &mut storage);
        assert!(!state.is_logged_in());
        assert_eq!(state.active(), ViewId::Home);
        assert!(storage.get(IS_LOGGED_IN_KEY).is_none());
        assert_eq!(
            storage.get(USER_DATA_KEY).as_deref(),
            Some(r#"{"email":"a@x.com"}"#)
        );
        assert!(effects.contains(&Effect::ClearFragment));
        assert!(effects.contains(&Effect::ShowToast(
            "You have been logged out successfully.".to_string()
        )));
    }

    #[test]
    fn unconfirmed_logout_is_a_no_op() {
        let mut storage = MemoryStorage::new();
        set_logged_in(&mut storage);
        let mut state = ViewState::new(&storage);
        state.navigate("terms");

        let effects = state.logout(false, &mut storage);
        assert!(effects.is_empty());
        assert!(state.is_logged_in());
        assert_eq!(state.active(), ViewId::Terms);
        assert_eq!(storage.get(IS_LOGGED_IN_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn nav_groups_are_exact_complements() {
        let mut storage = MemoryStorage::new();
        let mut state = ViewState::new(&storage);

        let guest_view = state.nav_visibility();
        assert!(guest_view.guest && !guest_view.user);

        set_logged_in(&mut storage);
        state.refresh_login(&storage);
        let user_view = state.nav_visibility();
        assert!(!user_view.guest && user_view.user);

        state.logout(true, &mut storage);
        let after = state.nav_visibility();
        assert!(after.guest && !after.user);
    }
}
