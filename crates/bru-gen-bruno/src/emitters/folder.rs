use minijinja::context;

use super::template_env;
use crate::error::GeneratorError;

/// Emit `<Group>/folder.bru`.
pub fn emit_folder(group_name: &str) -> Result<String, GeneratorError> {
    let env = template_env("folder.bru.j2", include_str!("../../templates/folder.bru.j2"))?;
    let tmpl = env.get_template("folder.bru.j2")?;
    Ok(tmpl.render(context! { name => group_name })?)
}
