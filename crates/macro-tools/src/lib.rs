use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod builder;
mod deref;
mod fields;

/// Generate read / write accessors for struct fields.
///
/// * `#[r]` read accessor, returns a copy for primitive types (or with `#[r(copy)]`),
///   a reference otherwise. `#[r(vis(pub(crate)))]` overrides the visibility.
/// * `#[w]` write accessor `field_mut`, `#[w(set)]` generates `set_field(value)`,
///   `#[w(reducer)]` generates `set_field(|old| new)`.
/// * `#[shared(skip)]`, `#[r(skip)]` or `#[w(skip)]` exclude a field.
///
/// Attributes on the struct apply to every field, attributes on a field win.
#[proc_macro_derive(Fields, attributes(shared, r, w))]
pub fn fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::expand(input)
}

/// Generate `{Struct}Builder` with chained setters, plus `Default` for both
/// the struct and the builder. `#[default = lit]`, or `#[default(expr)]` for
/// anything that is not a literal, sets the default value of a field.
/// `#[builder(skip)]` hides the setter.
#[proc_macro_derive(Builder, attributes(default, builder, shared))]
pub fn builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::expand(input)
}

#[proc_macro_derive(Deref, attributes(deref))]
pub fn deref(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    deref::expand(input)
}
