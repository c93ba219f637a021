#![allow(unreachable_pub)]

//! # Derive
//!
//! Procedural macros shared by the ironseal workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! ironseal-derive = { path = "../../infra/derive" }
//! thiserror = "2"
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for the workspace error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a `source`.
/// * `From<SourceError>` for variants with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * `kind()` returning the variant name and `is_redacted()`.
/// * A module-local `format_context` helper for `#[error(...)]` strings.
///
/// # Redacted Variants
///
/// Variants marked `#[redacted]` carry no data at all: `.context(...)` leaves them untouched,
/// so nothing a caller attaches can end up in their message. Use them for failures whose
/// cause must stay opaque (e.g. MAC mismatch).
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only (`Variant {}` for empty ones).
/// 2. Context-bearing variants use `context: Option<Cow<'static, str>>`.
/// 3. Variants with a `source` (or `#[source]`/`#[from]`) field must also have a `context`.
/// 4. Redacted variants may not have a `context` or a `source`.
///
/// # Example
///
/// ```rust,ignore
/// use ironseal_derive::ironseal_error;
/// use std::borrow::Cow;
///
/// #[ironseal_error]
/// pub enum TokenError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[redacted]
///     #[error("Token rejected")]
///     Rejected {},
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn ironseal_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
