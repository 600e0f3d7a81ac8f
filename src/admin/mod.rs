//! Plugin administrator access control.
//!
//! The raw `pluginadmins` field is untrusted text; only ids confirmed by the
//! host's user directory end up in `Configuration::admin_user_ids`.

pub mod resolver;

pub use resolver::{resolve_admin_list, AdminFailure, AdminResolution};
