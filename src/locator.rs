use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::config::PluginConfig;
use crate::reprint::Patch;
use crate::rewriter::rewrite_metadata;

/// Finds decorated class declarations and rewrites the metadata object
/// literals passed to their decorators.
///
/// The class body is never searched, and a class without decorators is
/// skipped entirely.
pub struct TemplateInliner<'a> {
    config: &'a PluginConfig,
    patches: Vec<Patch>,
    /// Number of object literals that were changed.
    rewritten: usize,
}

impl<'a> TemplateInliner<'a> {
    pub fn new(config: &'a PluginConfig) -> Self {
        Self {
            config,
            patches: Vec::new(),
            rewritten: 0,
        }
    }

    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    /// Text patches equivalent to the AST changes made so far.
    pub fn into_patches(self) -> Vec<Patch> {
        self.patches
    }

    fn inline_class(&mut self, class: &mut Class) {
        if class.decorators.is_empty() {
            return;
        }
        for decorator in &mut class.decorators {
            self.inline_decorator(decorator);
        }
    }

    fn inline_decorator(&mut self, decorator: &mut Decorator) {
        let Expr::Call(call) = &mut *decorator.expr else {
            return;
        };
        if call.args.is_empty() {
            return;
        }

        let mut args = DecoratorArgs { inliner: self };
        for arg in &mut call.args {
            arg.visit_mut_with(&mut args);
        }
    }

    fn rewrite(&mut self, obj: &mut ObjectLit) {
        let patches = rewrite_metadata(obj, self.config);
        if !patches.is_empty() {
            self.rewritten += 1;
            self.patches.extend(patches);
        }
    }
}

impl VisitMut for TemplateInliner<'_> {
    fn visit_mut_class_decl(&mut self, decl: &mut ClassDecl) {
        self.inline_class(&mut decl.class);
    }

    fn visit_mut_export_default_decl(&mut self, decl: &mut ExportDefaultDecl) {
        match &mut decl.decl {
            DefaultDecl::Class(class) => self.inline_class(&mut class.class),
            _ => decl.visit_mut_children_with(self),
        }
    }
}

/// Visits the arguments of one decorator call of a decorated class.
struct DecoratorArgs<'i, 'a> {
    inliner: &'i mut TemplateInliner<'a>,
}

impl VisitMut for DecoratorArgs<'_, '_> {
    fn visit_mut_object_lit(&mut self, obj: &mut ObjectLit) {
        self.inliner.rewrite(obj);
    }

    // A class nested in the arguments gets its own decorator check.
    fn visit_mut_class(&mut self, class: &mut Class) {
        self.inliner.inline_class(class);
    }
}
