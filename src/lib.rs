// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                   VariableAccessor<S>
//!                 exists / get* / set / delete
//!                           |
//!             +-------------+-------------+
//!             v                           v
//!      ,--------------,           ,---------------,
//!      |    parse     |           |     store     |
//!      | FromVariable |           |   EnvStore    |
//!      | EnumVariable |           | System/Memory |
//!      | date, spans  |           | (registry)    |
//!      '--------------'           '---------------'
//!
//!   +-----------------------------------------+
//!   |  config    AccessorConfig (scope)       |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use typed_env::VariableAccessor;
//!
//! let env = VariableAccessor::new();
//! let retries = env.get_i32_or_default("TYPED_ENV_DOC_RETRIES", 3)?;
//! assert_eq!(retries, 3);
//! # Ok::<(), typed_env::VarError>(())
//! ```

pub mod accessor;
pub mod config;
pub mod error;
pub mod logging;
pub mod parse;
pub mod store;

pub use accessor::VariableAccessor;
pub use error::{UnexpectedTypeError, VarError, VarResult};
pub use parse::{EnumVariable, FromVariable};
pub use store::{EnvStore, MemoryStore, Scope, SystemStore};
