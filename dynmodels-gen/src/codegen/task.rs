//! Generation tasks and the artifacts they render to

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model_config::ModelSpec;

use super::materializer::artifact_path;
use super::resolver::{CustomerRecord, ModelRecord};
use super::template::{render, TemplateContext};

/// One (spec, customer, model) triple; renders to exactly one file.
#[derive(Debug, Clone, Copy)]
pub struct GenerationTask<'a> {
    pub spec: &'a ModelSpec,
    pub customer: &'a CustomerRecord,
    pub model: &'a ModelRecord,
}

/// A rendered file, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl<'a> GenerationTask<'a> {
    fn binding(&self, key: &str) -> &'a str {
        match key {
            "customer" => self.customer.customer.as_str(),
            "customer_env" => self.customer.customer_env.as_str(),
            "model" => self.model.table_name.as_str(),
            _ => unreachable!("no binding named {key}"),
        }
    }

    /// Render one of the spec's templates with only that context's bindings.
    pub fn render_template(&self, context: TemplateContext) -> Result<String> {
        let template = match context {
            TemplateContext::Location => &self.spec.location,
            TemplateContext::Name => &self.spec.name,
            TemplateContext::Sql => &self.spec.sql,
        };
        let bindings: Vec<(&str, &str)> = context
            .allowed_keys()
            .iter()
            .map(|key| (*key, self.binding(key)))
            .collect();
        render(template, &bindings)
    }

    /// Render location, name and sql, and join the path against `project_root`.
    pub fn render(&self, project_root: &Path) -> Result<OutputArtifact> {
        let location = self.render_template(TemplateContext::Location)?;
        let name = self.render_template(TemplateContext::Name)?;
        let content = self.render_template(TemplateContext::Sql)?;

        Ok(OutputArtifact {
            path: artifact_path(project_root, &location, &name),
            content,
        })
    }
}
