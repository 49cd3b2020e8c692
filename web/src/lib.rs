//! Client-side view router for the Urban Waves frontend.
//!
//! The pre-rendered HTML page carries a fixed set of view panels, of
//! which exactly one is visible at a time. This crate models that
//! machine as explicit state: [`ViewState`] holds the active panel,
//! the nav highlight, and the login flag, and every transition returns
//! the [`Effect`]s a host shell must perform against the real DOM
//! (scrolling, icon refresh, toasts, redirects). Browser local storage
//! is abstracted behind [`Storage`] so the whole router runs, and is
//! tested, without a DOM.

pub mod state;
pub mod storage;
pub mod toast;
pub mod view;

pub use state::{Effect, NavVisibility, ViewState};
pub use storage::{MemoryStorage, Storage};
pub use toast::ToastQueue;
pub use view::ViewId;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
