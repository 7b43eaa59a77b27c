//! Prompt template loading and rendering via `minijinja`.
//!
//! Templates are loaded from the filesystem (default: `templates/`
//! directory) so operators can tune agent behavior without recompiling.
//! Three templates make up a decision prompt: `system.j2` establishes
//! the agent's reality and the JSON response contract, `situation.j2`
//! renders vitals/surroundings/memory, and `actions.j2` lists the
//! closed action menu with literal example payloads.

use minijinja::Environment;

use crate::error::RunnerError;

/// The complete rendered prompt ready to send to an oracle backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the agent's reality.
    pub system: String,
    /// User message containing situation and the action menu.
    pub user: String,
}

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Create a prompt engine loading templates from the given
    /// directory. The directory must contain `system.j2`,
    /// `situation.j2`, and `actions.j2`.
    pub fn new(templates_dir: &str) -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        for name in ["system", "situation", "actions"] {
            let template = load_template(templates_dir, name)?;
            env.add_template_owned(name.to_owned(), template)
                .map_err(|e| {
                    RunnerError::Template(format!("failed to add {name} template: {e}"))
                })?;
        }
        Ok(Self { env })
    }

    /// Render the full decision prompt from a prompt-view value.
    pub fn render(&self, view: &serde_json::Value) -> Result<RenderedPrompt, RunnerError> {
        let system = self.render_one("system", view)?;
        let situation = self.render_one("situation", view)?;
        let actions = self.render_one("actions", view)?;
        Ok(RenderedPrompt {
            system,
            user: format!("{situation}\n\n{actions}"),
        })
    }

    fn render_one(&self, name: &str, view: &serde_json::Value) -> Result<String, RunnerError> {
        self.env
            .get_template(name)
            .map_err(|e| RunnerError::Template(format!("missing {name} template: {e}")))?
            .render(view)
            .map_err(|e| RunnerError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, name: &str) -> Result<String, RunnerError> {
    let path = format!("{dir}/{name}.j2");
    std::fs::read_to_string(&path)
        .map_err(|e| RunnerError::Template(format!("failed to read {path}: {e}")))
}
