//! hookscope resolves the original-source variable names of React hooks
//! observed in bundled applications.
//!
//! The runtime reports each hook's minified file URL, line, and column;
//! this crate fetches the bundle, follows its `sourceMappingURL`,
//! translates the position back to the original source, parses that
//! source, and derives the binding name a developer would recognize —
//! `count` instead of an anonymous state slot.
//!
//! The pipeline is best-effort cosmetic: every failure narrows to the
//! affected file or hook, which simply passes through unnamed.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod hooks;
pub mod report;
pub mod resolve;

pub use config::Config;
pub use fetch::{FetchedFile, HttpScriptSource, ScriptSource, StaticScriptSource};
pub use hooks::merge::merge_named;
pub use hooks::{HookNode, HookSource};
pub use resolve::resolve_hook_names;
