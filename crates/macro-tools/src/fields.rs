use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{Data, DeriveInput, Ident};

use crate::attrs::{has_skip, parse_read, parse_write, WriteKind};

// types that are returned by value from a read accessor without `#[r(copy)]`
const COPY_TYPES: [&str; 17] = [
    "bool",
    "u8",
    "u16",
    "u32",
    "u64",
    "usize",
    "i8",
    "i16",
    "i32",
    "i64",
    "isize",
    "f32",
    "f64",
    "FloatNum",
    "Mass",
    "ShapeHandle",
    "ShapeKind",
];

pub fn macro_fields(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let generics = input.generics;

    let vis = input.vis;

    let global_read = parse_read(&input.attrs);

    let global_write = parse_write(&input.attrs);

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Fields can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let mut methods = Vec::new();

    for field in data.fields.iter() {
        let Some(field_ident) = field.ident.clone() else {
            return syn::Error::new(ident.span(), "Fields requires named fields")
                .into_compile_error()
                .into();
        };
        let ty = &field.ty;

        let is_copy_type = match ty {
            syn::Type::Path(path) => {
                let t = path.into_token_stream().to_string();
                COPY_TYPES.iter().any(|copy_type| copy_type == &t)
            }
            _ => false,
        };

        let read = (!has_skip(&field.attrs, &["r"]))
            .then(|| parse_read(&field.attrs).or(global_read))
            .flatten();

        match read {
            Some(copy) if copy || is_copy_type => methods.push(quote!(
                #[inline]
                #vis fn #field_ident(&self) -> #ty {
                    self.#field_ident
                }
            )),
            Some(_) => methods.push(quote!(
                #[inline]
                #vis fn #field_ident(&self) -> &#ty {
                    &self.#field_ident
                }
            )),
            None => {}
        }

        let write = (!has_skip(&field.attrs, &["w"]))
            .then(|| parse_write(&field.attrs).or(global_write))
            .flatten();

        match write {
            Some(WriteKind::Mut) => {
                let field_ident_mut = Ident::new(&format!("{}_mut", field_ident), field_ident.span());
                methods.push(quote!(
                    #[inline]
                    #vis fn #field_ident_mut(&mut self) -> &mut #ty {
                        &mut self.#field_ident
                    }
                ));
            }
            Some(WriteKind::Set) => {
                let set_field_ident = Ident::new(&format!("set_{}", field_ident), field_ident.span());
                methods.push(quote!(
                    #vis fn #set_field_ident(&mut self, value: impl Into<#ty>) -> &mut Self {
                        self.#field_ident = value.into();
                        self
                    }
                ));
            }
            None => {}
        }
    }

    quote!(
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    )
    .into()
}
