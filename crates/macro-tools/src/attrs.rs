use syn::{Attribute, Expr, Meta};

pub(crate) fn find_attr<'a>(attrs: &'a [Attribute], ident: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(ident))
}

// true when any of the listed attributes carries a bare `skip`
pub(crate) fn has_skip(attrs: &[Attribute], idents: &[&str]) -> bool {
    attrs
        .iter()
        .filter(|attr| idents.iter().any(|k| attr.path().is_ident(k)))
        .any(|attr| {
            let mut is_skip = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    is_skip = true;
                }
                Ok(())
            });
            is_skip
        })
}

/// `#[default = literal]` or `#[default(expr)]`
pub(crate) fn default_expr(attrs: &[Attribute]) -> Option<Expr> {
    find_attr(attrs, "default").and_then(|attr| match &attr.meta {
        Meta::Path(_) => None,
        Meta::NameValue(meta) => Some(meta.value.clone()),
        Meta::List(list) => list.parse_args().ok(),
    })
}

/// `#[r]` or `#[r(copy)]`
pub(crate) fn parse_read(attrs: &[Attribute]) -> Option<bool> {
    find_attr(attrs, "r").map(|attr| {
        let mut copy = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("copy") {
                copy = true;
            }
            Ok(())
        });
        copy
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteKind {
    Mut,
    Set,
}

/// `#[w]` or `#[w(set)]`
pub(crate) fn parse_write(attrs: &[Attribute]) -> Option<WriteKind> {
    find_attr(attrs, "w").map(|attr| {
        let mut kind = WriteKind::Mut;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("set") {
                kind = WriteKind::Set;
            }
            Ok(())
        });
        kind
    })
}
