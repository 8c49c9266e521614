//! Configuration module
//!
//! The paginator's configuration is reflected as named string attributes
//! on its host element. This module provides:
//! - `ConfigStore` - abstract key/value reader/writer for those attributes
//! - `AttributeMap` - in-memory store, optionally seeded from a host element
//! - `PaginatorConfig` - typed snapshot read once per initialize cycle
//! - `ConfigUpdate` - sparse update applied by `reset`, loadable from YAML
//!
//! # Attribute keys
//!
//! | Key             | Meaning                                  |
//! |-----------------|------------------------------------------|
//! | `page`          | last merged page number                  |
//! | `has-next-page` | whether another page exists              |
//! | `url`           | fetch target before page augmentation    |
//! | `mode`          | `append` (default) or `swap`             |
//! | `target`        | comma-separated target selectors         |
//! | `append-filter` | selector restricting appended children   |
//! | `state`         | `loading`, `complete` or `ready`         |
//! | `disabled`      | present while the trigger is disabled    |

mod store;
mod types;

pub use store::{AttributeMap, ConfigStore};
pub use types::{keys, parse_flag, ConfigUpdate, PaginatorConfig};
