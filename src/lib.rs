//! sss-guis: declarative widget GUIs rendered from a JSON structure.
//!
//! A GUI is described by a small configuration (name, structure document,
//! stylesheet, modules). The structure document lists typed widget records;
//! the [`structure::StructureRegistry`] turns them into configured widgets,
//! which render asynchronously into a [`render::Node`] tree while their
//! assets are fetched once each through the [`resources::ResourceCache`].
//!
//! # Quick start
//!
//! ```no_run
//! use sss_guis::bootstrap::Bootstrap;
//! use sss_guis::config::load_gui_config;
//!
//! # async fn example() {
//! let loaded = load_gui_config(Some("gui.toml")).unwrap();
//! let bootstrap = Bootstrap::from_loaded(loaded).unwrap();
//! let page = bootstrap.page().await;
//! println!("{}", page.to_html(bootstrap.cache()));
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod fetch;
pub mod modals;
pub mod render;
pub mod resources;
pub mod structure;
#[cfg(test)]
pub mod testsupport;
pub mod widgets;
