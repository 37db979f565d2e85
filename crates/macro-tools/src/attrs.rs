use syn::{parenthesized, Attribute, Expr, Meta, Visibility};

pub(crate) fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

// `#[name(skip)]` for any of the given attribute names
pub(crate) fn is_skipped(attrs: &[Attribute], names: &[&str]) -> bool {
    attrs
        .iter()
        .filter(|attr| names.iter().any(|name| attr.path().is_ident(name)))
        .any(|attr| {
            let mut is_skip = false;
            // bare attributes like `#[r]` have no nested meta, ignore the parse error
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    is_skip = true;
                }
                Ok(())
            });
            is_skip
        })
}

pub(crate) struct ReadOption {
    pub(crate) vis: Visibility,
    pub(crate) copy: bool,
}

pub(crate) fn parse_read(attrs: &[Attribute], default_vis: &Visibility) -> Option<ReadOption> {
    find_attr(attrs, "r").map(|attr| {
        let mut option = ReadOption {
            vis: default_vis.clone(),
            copy: false,
        };
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("vis") {
                let content;
                parenthesized!(content in meta.input);
                option.vis = content.parse::<Visibility>()?;
            } else if meta.path.is_ident("copy") {
                option.copy = true;
            }
            Ok(())
        });
        option
    })
}

pub(crate) enum WriteKind {
    Mut,
    Set,
    Reducer,
}

pub(crate) struct WriteOption {
    pub(crate) vis: Visibility,
    pub(crate) kind: WriteKind,
}

pub(crate) fn parse_write(attrs: &[Attribute], default_vis: &Visibility) -> Option<WriteOption> {
    find_attr(attrs, "w").map(|attr| {
        let mut option = WriteOption {
            vis: default_vis.clone(),
            kind: WriteKind::Mut,
        };
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("vis") {
                let content;
                parenthesized!(content in meta.input);
                option.vis = content.parse::<Visibility>()?;
            } else if meta.path.is_ident("set") {
                option.kind = WriteKind::Set;
            } else if meta.path.is_ident("reducer") {
                option.kind = WriteKind::Reducer;
            }
            Ok(())
        });
        option
    })
}

// `#[default = expr]` or `#[default(expr)]`
pub(crate) fn default_expr(attrs: &[Attribute]) -> Option<Expr> {
    find_attr(attrs, "default").and_then(|attr| match &attr.meta {
        Meta::Path(_) => None,
        Meta::NameValue(meta) => Some(meta.value.clone()),
        Meta::List(list) => list.parse_args().ok(),
    })
}
