use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput};

use crate::attrs::find_attr;

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    let ident = input.ident;

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Deref can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let target = data
        .fields
        .iter()
        .find(|field| find_attr(&field.attrs, "deref").is_some())
        .and_then(|field| field.ident.clone().map(|field_ident| (field_ident, field.ty.clone())));

    let Some((field_ident, field_ty)) = target else {
        return syn::Error::new(ident.span(), "mark exactly one named field with #[deref]")
            .into_compile_error()
            .into();
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote!(
        impl #impl_generics core::ops::Deref for #ident #ty_generics #where_clause {
            type Target = #field_ty;
            fn deref(&self) -> &Self::Target {
                &self.#field_ident
            }
        }

        impl #impl_generics core::ops::DerefMut for #ident #ty_generics #where_clause {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.#field_ident
            }
        }
    )
    .into()
}
