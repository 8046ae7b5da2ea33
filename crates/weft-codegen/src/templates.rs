//! Template engine for artifact shells.
//!
//! The outer skeleton of each artifact (imports, story meta) renders
//! through Handlebars; the node markup and rule bodies come from the
//! typed builders in the sibling modules. Casing helpers are registered
//! so shells never hand-roll identifier conversions.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

const COMPONENT_HEADER: &str = "\
import * as React from 'react';
import type { {{component}}Props } from './{{component}}.types';
import './{{stylesheet}}.css';
";

const STORY_SHELL: &str = "\
import type { Meta, StoryObj } from '@storybook/react';
import { {{component}} } from './{{component}}';

const meta: Meta<typeof {{component}}> = {
  title: 'Components/{{component}}',
  component: {{component}},
};

export default meta;
type Story = StoryObj<typeof {{component}}>;
";

/// Handlebars wrapper with the artifact shells and casing helpers.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with all shells registered.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        Self::register_helpers(&mut handlebars);
        handlebars.register_template_string("component_header", COMPONENT_HEADER)?;
        handlebars.register_template_string("story_shell", STORY_SHELL)?;
        Ok(Self { handlebars })
    }

    /// Render a registered shell.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    out.write(&crate::naming::component_ident(param))?;
                    Ok(())
                },
            ),
        );

        handlebars.register_helper(
            "camel_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    out.write(&crate::naming::prop_ident(param))?;
                    Ok(())
                },
            ),
        );

        handlebars.register_helper(
            "kebab_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    out.write(&crate::naming::css_ident(param))?;
                    Ok(())
                },
            ),
        );

        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    let spaces = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(2) as usize;
                    let indent = " ".repeat(spaces);
                    let indented = content
                        .lines()
                        .map(|line| {
                            if line.trim().is_empty() {
                                line.to_string()
                            } else {
                                format!("{}{}", indent, line)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    out.write(&indented)?;
                    Ok(())
                },
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_header_shell() {
        let engine = TemplateEngine::new().unwrap();
        let header = engine
            .render(
                "component_header",
                &json!({ "component": "ButtonPrimary", "stylesheet": "button-primary" }),
            )
            .unwrap();

        assert!(header.contains("import * as React from 'react';"));
        assert!(header.contains("ButtonPrimaryProps } from './ButtonPrimary.types'"));
        assert!(header.contains("import './button-primary.css';"));
    }

    #[test]
    fn test_story_shell() {
        let engine = TemplateEngine::new().unwrap();
        let shell = engine
            .render("story_shell", &json!({ "component": "Card" }))
            .unwrap();

        assert!(shell.contains("title: 'Components/Card'"));
        assert!(shell.contains("type Story = StoryObj<typeof Card>;"));
    }
}
