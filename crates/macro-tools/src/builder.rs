use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Ident};

use crate::attrs::{default_expr, has_skip};

pub fn macro_builder(input: DeriveInput) -> TokenStream {
    let target = input.ident;
    let vis = input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(target.span(), "Builder can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let builder = Ident::new(&format!("{}Builder", target), target.span());

    let mut declarations = Vec::new();
    let mut defaults = Vec::new();
    let mut moves = Vec::new();
    let mut setters = Vec::new();

    for field in data.fields.iter() {
        let name = &field.ident;
        let ty = &field.ty;

        declarations.push(quote!(#name: #ty));
        moves.push(quote!(#name: builder.#name));
        defaults.push(match default_expr(&field.attrs) {
            Some(expr) => quote!(#name: #expr),
            None => quote!(#name: Default::default()),
        });

        if !has_skip(&field.attrs, &["builder"]) {
            setters.push(quote!(
                pub fn #name(mut self, value: impl Into<#ty>) -> Self {
                    self.#name = value.into();
                    self
                }
            ));
        }
    }

    // the target shares the builder's defaults
    quote!(
        #vis struct #builder #impl_generics #where_clause {
            #(#declarations,)*
        }

        impl #impl_generics Default for #builder #ty_generics #where_clause {
            fn default() -> Self {
                Self { #(#defaults,)* }
            }
        }

        impl #impl_generics Default for #target #ty_generics #where_clause {
            fn default() -> Self {
                #builder::default().build()
            }
        }

        impl #impl_generics From<#builder #ty_generics> for #target #ty_generics #where_clause {
            fn from(builder: #builder #ty_generics) -> Self {
                Self { #(#moves,)* }
            }
        }

        impl #impl_generics #builder #ty_generics #where_clause {
            pub fn new() -> Self {
                Self::default()
            }

            #(#setters)*

            pub fn build(self) -> #target #ty_generics {
                self.into()
            }
        }
    )
    .into()
}
