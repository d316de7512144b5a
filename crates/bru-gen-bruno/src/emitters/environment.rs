use minijinja::context;

use super::template_env;
use crate::error::GeneratorError;

/// Emit `environments/<Env>.bru`: the base URL plus an empty secret block.
pub fn emit_environment(base_url: &str) -> Result<String, GeneratorError> {
    let env = template_env(
        "environment.bru.j2",
        include_str!("../../templates/environment.bru.j2"),
    )?;
    let tmpl = env.get_template("environment.bru.j2")?;
    Ok(tmpl.render(context! { base_url => base_url })?)
}
