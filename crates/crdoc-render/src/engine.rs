//! Page rendering based on MiniJinja

use crdoc_core::DocError;
use minijinja::{Environment, context};

use crate::error::{RenderError, Result};
use crate::filters;
use crate::messages::user_message;
use crate::pages::{DocPage, OrgPage};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("doc.html", include_str!("templates/doc.html")),
    ("org.html", include_str!("templates/org.html")),
    ("new.html", include_str!("templates/new.html")),
    ("error.html", include_str!("templates/error.html")),
];

/// Renders documentation pages to HTML
///
/// Templates are embedded in the binary; output is HTML-escaped.
pub struct DocRenderer {
    env: Environment<'static>,
}

impl DocRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        env.add_filter("literal", filters::literal);
        env.add_filter("bound", filters::bound);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| RenderError::template(name, e))?;
        }

        Ok(Self { env })
    }

    /// Render one CRD's documentation tree
    pub fn render_doc(&self, page: &DocPage<'_>) -> Result<String> {
        self.render("doc.html", context! { page => page })
    }

    /// Render a repository's CRD listing
    pub fn render_org(&self, page: &OrgPage) -> Result<String> {
        self.render("org.html", context! { page => page })
    }

    /// Render the "not yet documented" page for a key
    pub fn render_new(&self, key: &str) -> Result<String> {
        let message = user_message(&DocError::lookup_miss(key));
        self.render("new.html", context! { message => message, key => key })
    }

    /// Render the page for any documentation failure
    pub fn render_error(&self, err: &DocError) -> Result<String> {
        if let DocError::LookupMiss { key } = err {
            return self.render_new(key);
        }
        self.render("error.html", context! { message => user_message(err) })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|e| RenderError::template(name, e))?;
        let html = tmpl.render(ctx).map_err(|e| RenderError::template(name, e))?;
        tracing::debug!(template = name, bytes = html.len(), "rendered page");
        Ok(html)
    }
}
