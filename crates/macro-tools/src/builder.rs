use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields};

use crate::attrs::{default_expr, is_skipped};

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    let origin_ident = input.ident;
    let vis = input.vis;

    let Data::Struct(data) = input.data else {
        return syn::Error::new(origin_ident.span(), "Builder can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let Fields::Named(fields) = data.fields else {
        return syn::Error::new(origin_ident.span(), "Builder requires named fields")
            .into_compile_error()
            .into();
    };

    let ident = format_ident!("{}Builder", origin_ident);

    let declare_fields = fields.named.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        quote!(#field_ident: #ty,)
    });

    let default_fields: Vec<_> = fields
        .named
        .iter()
        .map(|field| {
            let field_ident = &field.ident;
            match default_expr(&field.attrs) {
                Some(expr) => quote!(#field_ident: #expr,),
                None => quote!(#field_ident: Default::default(),),
            }
        })
        .collect();

    let move_fields = fields.named.iter().map(|field| {
        let field_ident = &field.ident;
        quote!(#field_ident: builder.#field_ident,)
    });

    let setters = fields
        .named
        .iter()
        .filter(|field| !is_skipped(&field.attrs, &["builder", "shared"]))
        .map(|field| {
            let field_ident = &field.ident;
            let ty = &field.ty;
            quote!(
                pub fn #field_ident(mut self, value: impl Into<#ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            )
        });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote!(
        #vis struct #ident #impl_generics #where_clause {
            #(#declare_fields)*
        }

        impl #impl_generics Default for #ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#default_fields)*
                }
            }
        }

        impl #impl_generics Default for #origin_ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#default_fields)*
                }
            }
        }

        impl #impl_generics From<#ident #ty_generics> for #origin_ident #ty_generics #where_clause {
            fn from(builder: #ident #ty_generics) -> Self {
                Self {
                    #(#move_fields)*
                }
            }
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new() -> Self {
                Self::default()
            }

            #(#setters)*
        }
    )
    .into()
}
