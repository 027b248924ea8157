//! Rewrites one component metadata object literal.
//!
//! Every AST change is mirrored by a [`Patch`] against the original text,
//! which the standalone driver uses to reprint without touching anything
//! else in the file.

use swc_core::common::{BytePos, Spanned};
use swc_core::ecma::ast::*;
use tracing::debug;

use crate::codegen::{create_require_call, create_spread};
use crate::config::PluginConfig;
use crate::reprint::{Chunk, Patch};
use crate::sanitize::require_source;

pub const TEMPLATE_URL: &str = "templateUrl";
pub const TEMPLATE: &str = "template";
pub const STYLE_URLS: &str = "styleUrls";
pub const STYLES: &str = "styles";

/// Inline `templateUrl` and `styleUrls`, then fold a sibling `styles`
/// array into the rewritten style list.
///
/// Properties with unexpected shapes are skipped and left untouched.
pub fn rewrite_metadata(obj: &mut ObjectLit, config: &PluginConfig) -> Vec<Patch> {
    let mut patches = Vec::new();
    if obj.props.is_empty() {
        return patches;
    }

    let template_url = find_prop(&obj.props, TEMPLATE_URL);
    let style_urls = find_prop(&obj.props, STYLE_URLS);
    let styles = find_prop(&obj.props, STYLES);

    if let Some(idx) = template_url {
        match key_value_mut(&mut obj.props[idx]) {
            Some(prop) => inline_template_url(prop, config, &mut patches),
            None => debug!(property = TEMPLATE_URL, "not a key/value property, skipped"),
        }
    }

    let Some(style_urls) = style_urls else {
        return patches;
    };

    // A `styles` sibling that cannot be folded in keeps the list under its
    // own key, so no second `styles` property appears.
    let mergeable = styles.map(|idx| styles_value(&obj.props[idx]).is_some());
    if mergeable == Some(false) {
        debug!(property = STYLES, "not a value property, merge skipped");
    }
    let rename = !config.keep_url && mergeable != Some(false);

    let inlined = match key_value_mut(&mut obj.props[style_urls]) {
        Some(prop) => inline_style_urls(prop, rename, &mut patches),
        None => {
            debug!(property = STYLE_URLS, "not a key/value property, skipped");
            false
        }
    };

    if let (true, Some(styles), Some(true)) = (inlined, styles, mergeable) {
        merge_styles(obj, style_urls, styles, &mut patches);
    }

    patches
}

fn inline_template_url(
    prop: &mut KeyValueProp,
    config: &PluginConfig,
    patches: &mut Vec<Patch>,
) {
    let Expr::Lit(Lit::Str(url)) = &*prop.value else {
        debug!(property = TEMPLATE_URL, "value is not a string literal, skipped");
        return;
    };

    let path = url.value.to_string_lossy().into_owned();
    let span = url.span;

    patches.push(Patch::replace(span, require_source(&path)));
    *prop.value = create_require_call(&path, span);

    if !config.keep_url {
        rename_key(prop, TEMPLATE, patches);
    }
}

/// Returns whether the list was rewritten. A list that is not an array of
/// plain string literals is left alone as a whole.
fn inline_style_urls(prop: &mut KeyValueProp, rename: bool, patches: &mut Vec<Patch>) -> bool {
    let Expr::Array(array) = &mut *prop.value else {
        debug!(property = STYLE_URLS, "value is not an array literal, skipped");
        return false;
    };

    let mut urls = Vec::with_capacity(array.elems.len());
    for elem in &array.elems {
        match elem {
            Some(ExprOrSpread { spread: None, expr }) => match &**expr {
                Expr::Lit(Lit::Str(url)) => {
                    urls.push((url.value.to_string_lossy().into_owned(), url.span))
                }
                _ => {
                    debug!(property = STYLE_URLS, "element is not a string literal, skipped");
                    return false;
                }
            },
            _ => {
                debug!(property = STYLE_URLS, "spread or hole in list, skipped");
                return false;
            }
        }
    }

    for (elem, (path, span)) in array.elems.iter_mut().zip(&urls) {
        patches.push(Patch::replace(*span, require_source(path)));
        *elem = Some(ExprOrSpread {
            spread: None,
            expr: Box::new(create_require_call(path, *span)),
        });
    }

    if rename {
        rename_key(prop, STYLES, patches);
    }
    true
}

/// Drop the `styles` property at `styles` and append its entries to the
/// array held by the property at `style_urls`. Holes are dropped.
fn merge_styles(
    obj: &mut ObjectLit,
    style_urls: usize,
    styles: usize,
    patches: &mut Vec<Patch>,
) {
    let (elems, chunks) = match styles_value(&obj.props[styles]) {
        Some(Expr::Array(array)) => {
            let elems = array.elems.into_iter().flatten().collect::<Vec<_>>();
            let chunks = elems
                .iter()
                .map(|elem| vec![Chunk::Source(elem.span())])
                .collect::<Vec<_>>();
            (elems.into_iter().map(Some).collect::<Vec<_>>(), chunks)
        }
        Some(other) => {
            let chunks = vec![vec![Chunk::Text("...".into()), Chunk::Source(other.span())]];
            (vec![Some(create_spread(other))], chunks)
        }
        None => return,
    };

    let removal = removal_range(&obj.props, styles);

    let target = key_value_mut(&mut obj.props[style_urls]).map(|prop| &mut *prop.value);
    let Some(Expr::Array(target)) = target else {
        return;
    };

    let at = match target.elems.last() {
        Some(Some(last)) => last.span().hi,
        _ => BytePos(target.span.hi.0 - 1),
    };
    let had_entries = !target.elems.is_empty();
    target.elems.extend(elems);

    // One group of chunks per appended element.
    if !chunks.is_empty() {
        let mut inserted = Vec::with_capacity(chunks.len() * 2);
        for (idx, entry) in chunks.into_iter().enumerate() {
            if idx > 0 || had_entries {
                inserted.push(Chunk::Text(", ".into()));
            }
            inserted.extend(entry);
        }
        patches.push(Patch::insert(at, inserted));
    }

    patches.push(removal);
    obj.props.remove(styles);
}

/// Range covering the property and one adjacent separator, so the object
/// stays well formed after removal.
fn removal_range(props: &[PropOrSpread], idx: usize) -> Patch {
    let span = props[idx].span();
    match props.get(idx + 1) {
        Some(next) => Patch::remove(span.lo, next.span().lo),
        None if idx > 0 => Patch::remove(props[idx - 1].span().hi, span.hi),
        None => Patch::remove(span.lo, span.hi),
    }
}

fn rename_key(prop: &mut KeyValueProp, name: &str, patches: &mut Vec<Patch>) {
    if let PropName::Ident(key) = &mut prop.key {
        patches.push(Patch::replace(key.span, name));
        key.sym = name.into();
    }
}

fn styles_value(prop: &PropOrSpread) -> Option<Expr> {
    match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(kv) => Some((*kv.value).clone()),
            Prop::Shorthand(ident) => Some(Expr::Ident(ident.clone())),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

fn key_value_mut(prop: &mut PropOrSpread) -> Option<&mut KeyValueProp> {
    match prop {
        PropOrSpread::Prop(prop) => match &mut **prop {
            Prop::KeyValue(kv) => Some(kv),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

/// Index of the first property named `name`, matching identifier keys the
/// way they are written in component metadata.
fn find_prop(props: &[PropOrSpread], name: &str) -> Option<usize> {
    props.iter().position(|prop| prop_name(prop) == Some(name))
}

fn prop_name(prop: &PropOrSpread) -> Option<&str> {
    let PropOrSpread::Prop(prop) = prop else {
        return None;
    };
    match &**prop {
        Prop::KeyValue(KeyValueProp {
            key: PropName::Ident(key),
            ..
        }) => Some(key.sym.as_ref()),
        Prop::Shorthand(ident) => Some(ident.sym.as_ref()),
        Prop::Method(MethodProp {
            key: PropName::Ident(key),
            ..
        })
        | Prop::Getter(GetterProp {
            key: PropName::Ident(key),
            ..
        })
        | Prop::Setter(SetterProp {
            key: PropName::Ident(key),
            ..
        }) => Some(key.sym.as_ref()),
        _ => None,
    }
}
