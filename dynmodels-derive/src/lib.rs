//! Derive macro for the dynmodels row projection layer
//!
//! `FromRow` is re-exported from the `dynmodels` crate, so users typically
//! don't need to depend on this crate directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod from_row;

/// Derive macro for projecting rows into Rust structs.
///
/// Each named field is read from the column of the same name through
/// `dynmodels::RowExt::get`, so a column missing from the row surfaces as
/// `dynmodels::Error::ColumnNotFound` naming that column.
///
/// # Attributes
///
/// - `#[dynmodels(rename = "column_name")]` - Read this field from a differently named column
///
/// # Example
///
/// ```ignore
/// use dynmodels::FromRow;
///
/// #[derive(FromRow)]
/// pub struct ModelRecord {
///     #[dynmodels(rename = "table_name")]
///     pub model: String,
/// }
/// ```
#[proc_macro_derive(FromRow, attributes(dynmodels))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::derive_from_row_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
