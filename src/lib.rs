pub mod codegen;
pub mod config;
pub mod error;
pub mod loader;
pub mod locator;
pub mod query;
pub mod reprint;
pub mod rewriter;
pub mod sanitize;
pub mod transform;

#[cfg(test)]
mod tests;

use serde_json::Value;
use swc_core::ecma::ast::Program;
use swc_core::ecma::visit::VisitMutWith;
use swc_core::plugin::plugin_transform;

use config::{ConfigLayer, PluginConfig};
use locator::TemplateInliner;

pub use loader::{run_loader, LoaderCallback, LoaderContext, LoaderOutput};
pub use sanitize::sanitize;
pub use transform::{inline_resources, transform};

/// Resolve the plugin's JSON config the same way loader-wide options are
/// resolved. No per-call query exists on this path.
pub(crate) fn plugin_config(json: Option<&str>) -> Result<PluginConfig, error::ConfigError> {
    let value = json.map(serde_json::from_str::<Value>).transpose()?;
    let layer = match value {
        Some(Value::Null) | None => ConfigLayer::default(),
        Some(value) => ConfigLayer::from_value(&value)?,
    };
    PluginConfig::resolve(layer, ConfigLayer::default())
}

#[plugin_transform]
pub fn process_transform(
    mut program: Program,
    metadata: swc_core::plugin::metadata::TransformPluginProgramMetadata,
) -> Program {
    // A broken build config must fail loudly rather than silently skip inlining.
    let config = plugin_config(metadata.get_transform_plugin_config().as_deref())
        .unwrap_or_else(|err| panic!("E_INVALID_CONFIG: {err}"));

    let mut inliner = TemplateInliner::new(&config);
    program.visit_mut_with(&mut inliner);
    program
}
