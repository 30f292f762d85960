//! Placeholder substitution for location, name and sql templates

use std::fmt;

use crate::error::{GenError, Result};

/// Which of the three templates is being rendered.
///
/// Each context only ever sees its own bindings, so a placeholder that is
/// legal in one template (`{model}` in `sql`) is rejected in another
/// (`{model}` in `location`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateContext {
    /// Output directory: `{customer}`, `{customer_env}`
    Location,
    /// File name stem: `{customer}`, `{model}`
    Name,
    /// File content: `{customer}`, `{model}`
    Sql,
}

impl TemplateContext {
    /// Placeholder names bound in this context
    pub fn allowed_keys(self) -> &'static [&'static str] {
        match self {
            TemplateContext::Location => &["customer", "customer_env"],
            TemplateContext::Name | TemplateContext::Sql => &["customer", "model"],
        }
    }
}

impl fmt::Display for TemplateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateContext::Location => f.write_str("location"),
            TemplateContext::Name => f.write_str("name"),
            TemplateContext::Sql => f.write_str("sql"),
        }
    }
}

/// Substitute `{key}` placeholders from `bindings`.
///
/// `{{` and `}}` produce literal braces. A placeholder whose key is not in
/// `bindings` fails with [`GenError::TemplateBinding`]; bindings the template
/// never mentions are ignored.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(i) = rest.find(|c| c == '{' || c == '}') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if tail.starts_with('}') {
            return Err(syntax_error(template, "single '}' encountered"));
        } else {
            let body = &tail[1..];
            let end = body
                .find(|c| c == '{' || c == '}')
                .filter(|&j| body[j..].starts_with('}'))
                .ok_or_else(|| syntax_error(template, "unmatched '{'"))?;
            let key = &body[..end];
            if key.is_empty() {
                return Err(syntax_error(template, "empty placeholder '{}'"));
            }

            let value = bindings
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| *value)
                .ok_or_else(|| GenError::TemplateBinding {
                    template: template.to_string(),
                    key: key.to_string(),
                })?;
            out.push_str(value);
            rest = &body[end + 1..];
        }
    }
    out.push_str(rest);

    Ok(out)
}

fn syntax_error(template: &str, reason: &str) -> GenError {
    GenError::TemplateSyntax {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
