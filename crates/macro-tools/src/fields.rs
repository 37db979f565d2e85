use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{Data, DeriveInput, Fields, Type};

use crate::attrs::{is_skipped, parse_read, parse_write, ReadOption, WriteKind, WriteOption};

// read accessors of these types return by value
const COPY_TYPES: [&str; 17] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "f32",
    "f64", "FloatNum", "Mass", "ID",
];

fn is_copy_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            let name = path.into_token_stream().to_string();
            COPY_TYPES.iter().any(|copy_type| *copy_type == name)
        }
        _ => false,
    }
}

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let input_vis = input.vis;

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Fields can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let Fields::Named(fields) = data.fields else {
        return syn::Error::new(ident.span(), "Fields requires named fields")
            .into_compile_error()
            .into();
    };

    let struct_read = parse_read(&input.attrs, &input_vis);
    let struct_write = parse_write(&input.attrs, &input_vis);

    let methods = fields
        .named
        .iter()
        .filter(|field| !is_skipped(&field.attrs, &["shared"]))
        .map(|field| {
            let Some(field_ident) = field.ident.as_ref() else {
                return quote!();
            };
            let ty = &field.ty;

            let read = if is_skipped(&field.attrs, &["r"]) {
                None
            } else {
                parse_read(&field.attrs, &input_vis).or_else(|| {
                    struct_read.as_ref().map(|option| ReadOption {
                        vis: option.vis.clone(),
                        copy: option.copy,
                    })
                })
            };

            let read_method = read.map(|ReadOption { vis, copy }| {
                if copy || is_copy_type(ty) {
                    quote!(
                        #vis fn #field_ident(&self) -> #ty {
                            self.#field_ident
                        }
                    )
                } else {
                    quote!(
                        #vis fn #field_ident(&self) -> &#ty {
                            &self.#field_ident
                        }
                    )
                }
            });

            let write = if is_skipped(&field.attrs, &["w"]) {
                None
            } else {
                parse_write(&field.attrs, &input_vis).or_else(|| {
                    struct_write.as_ref().map(|option| WriteOption {
                        vis: option.vis.clone(),
                        kind: match option.kind {
                            WriteKind::Mut => WriteKind::Mut,
                            WriteKind::Set => WriteKind::Set,
                            WriteKind::Reducer => WriteKind::Reducer,
                        },
                    })
                })
            };

            let write_method = write.map(|WriteOption { vis, kind }| match kind {
                WriteKind::Mut => {
                    let method = format_ident!("{}_mut", field_ident);
                    quote!(
                        #vis fn #method(&mut self) -> &mut #ty {
                            &mut self.#field_ident
                        }
                    )
                }
                WriteKind::Set => {
                    let method = format_ident!("set_{}", field_ident);
                    quote!(
                        #vis fn #method(&mut self, value: impl Into<#ty>) -> &mut Self {
                            self.#field_ident = value.into();
                            self
                        }
                    )
                }
                WriteKind::Reducer => {
                    let method = format_ident!("set_{}", field_ident);
                    quote!(
                        #vis fn #method(&mut self, reducer: impl FnOnce(#ty) -> #ty) -> &mut Self {
                            self.#field_ident = reducer(core::mem::take(&mut self.#field_ident));
                            self
                        }
                    )
                }
            });

            quote!(
                #read_method

                #write_method
            )
        });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote!(
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    )
    .into()
}
