//! Standalone driver: parse, inline, reprint.

use swc_core::common::sync::Lrc;
use swc_core::common::{BytePos, FileName, SourceFile, SourceMap, Spanned};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::parser::{self, error::Error as ParseError, EsSyntax, Syntax, TsSyntax};
use swc_core::ecma::visit::VisitMutWith;
use tracing::{debug, warn};

use crate::config::{ParseModule, PluginConfig};
use crate::error::TransformError;
use crate::locator::TemplateInliner;
use crate::reprint::apply_patches;

const BOM: char = '\u{feff}';

/// Inline component resources, falling back to `source` unchanged when the
/// module cannot be parsed or reprinted.
pub fn transform(source: &str, config: &PluginConfig) -> String {
    match inline_resources(source, config) {
        Ok(code) => code,
        Err(err) => {
            warn!(error = %err, "cannot inline component resources, source left unchanged");
            source.to_string()
        }
    }
}

/// Inline component resources. Text outside the rewritten properties is
/// kept byte-for-byte.
pub fn inline_resources(source: &str, config: &PluginConfig) -> Result<String, TransformError> {
    // Spans are computed without a leading byte order mark; it is put back
    // in front of the patched text.
    let (bom, body) = match source.strip_prefix(BOM) {
        Some(body) => (&source[..BOM.len_utf8()], body),
        None => ("", source),
    };

    let (fm, mut module) = parse_module(body, config.parse_module)?;

    let mut inliner = TemplateInliner::new(config);
    module.visit_mut_with(&mut inliner);
    debug!(rewritten = inliner.rewritten(), "metadata objects rewritten");

    let patches = inliner.into_patches();
    if patches.is_empty() {
        return Ok(source.to_string());
    }

    let code = apply_patches(body, fm.start_pos, patches)?;
    Ok(format!("{bom}{code}"))
}

/// Parse `source` with the dialect selected by `parse_module`. Recoverable
/// parser errors are treated as failures too.
pub fn parse_module(
    source: &str,
    parse_module: ParseModule,
) -> Result<(Lrc<SourceFile>, Module), TransformError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), source.to_string());

    let mut errors = vec![];
    let module = parser::parse_file_as_module(
        &fm,
        syntax(parse_module),
        EsVersion::latest(),
        None,
        &mut errors,
    )
    .map_err(|err| parse_error(err, fm.start_pos))?;

    if let Some(err) = errors.into_iter().next() {
        return Err(parse_error(err, fm.start_pos));
    }

    Ok((fm, module))
}

pub fn syntax(parse_module: ParseModule) -> Syntax {
    match parse_module {
        ParseModule::Typescript => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        ParseModule::Babel => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            decorators_before_export: true,
            ..Default::default()
        }),
    }
}

fn parse_error(err: ParseError, base: BytePos) -> TransformError {
    let span = err.span();
    TransformError::Parse {
        message: err.kind().msg().into_owned(),
        lo: span.lo.0.saturating_sub(base.0),
        hi: span.hi.0.saturating_sub(base.0),
    }
}
