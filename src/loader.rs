//! Module-loader hook around the transform.
//!
//! The host describes itself through [`LoaderContext`]; capabilities it
//! does not have (caching, async completion) keep their default methods.

use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigLayer, PluginConfig};
use crate::error::ConfigError;
use crate::query::query_layer;
use crate::transform::transform;

/// Async completion capability of the host.
pub trait LoaderCallback {
    /// Called once with the transformed code and the untouched source map.
    fn done(&mut self, code: String, source_map: Option<String>);
}

pub trait LoaderContext {
    /// Raw resource query, `""` or `?...`.
    fn query(&self) -> &str {
        ""
    }

    /// Loader-wide options holding the `ng2TemplateLoader` or
    /// `angular2TemplateLoader` bag.
    fn options(&self) -> Option<&Value> {
        None
    }

    /// Mark the result as cacheable. Returns `false` when the host has no
    /// such capability, e.g. under a test harness.
    fn cacheable(&mut self) -> bool {
        false
    }

    fn callback(&mut self) -> Option<&mut dyn LoaderCallback> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderOutput {
    /// Returned directly to a synchronous host.
    Code(String),
    /// Delivered through the host callback.
    Deferred,
}

/// Run the transform for one module.
///
/// Parse failures never surface here; the original text is produced
/// instead. Configuration errors do, since they mean the build itself is
/// misconfigured.
pub fn run_loader<C>(
    ctx: &mut C,
    source: &str,
    source_map: Option<String>,
) -> Result<LoaderOutput, ConfigError>
where
    C: LoaderContext + ?Sized,
{
    let config = resolve_config(ctx)?;
    let code = transform(source, &config);

    if !ctx.cacheable() {
        debug!("host cannot cache loader results");
    }

    match ctx.callback() {
        Some(callback) => {
            callback.done(code, source_map);
            Ok(LoaderOutput::Deferred)
        }
        None => Ok(LoaderOutput::Code(code)),
    }
}

/// Built-in defaults, then the loader option bag, then the query.
pub fn resolve_config<C>(ctx: &C) -> Result<PluginConfig, ConfigError>
where
    C: LoaderContext + ?Sized,
{
    let loader = ConfigLayer::from_loader_options(ctx.options())?;
    let query = query_layer(ctx.query())?;
    PluginConfig::resolve(loader, query)
}
