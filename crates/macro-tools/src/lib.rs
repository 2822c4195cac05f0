use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod builder;
mod deref;
mod fields;

/// Generate `Deref`/`DerefMut` to the field marked `#[deref]`.
#[proc_macro_derive(Deref, attributes(deref))]
pub fn deref(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    deref::macro_deref(input)
}

/// Generate `{Name}Builder`, `Default` for both types and `From<{Name}Builder>`.
///
/// `#[default = literal]` or `#[default(expr)]` sets a field default, `#[builder(skip)]` hides
/// the setter.
#[proc_macro_derive(Builder, attributes(default, builder))]
pub fn builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::macro_builder(input)
}

/// Generate read (`#[r]`) and write (`#[w]`) accessors, on the struct or per field.
///
/// * `#[r(copy)]` returns the value instead of a reference
/// * `#[w]` generates `{field}_mut`, `#[w(set)]` generates `set_{field}(value)`
/// * `#[r(skip)]` / `#[w(skip)]` exclude a field
#[proc_macro_derive(Fields, attributes(r, w))]
pub fn fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::macro_fields(input)
}
