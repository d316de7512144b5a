pub mod collection;
pub mod environment;
pub mod folder;
pub mod request;

use minijinja::Environment;

/// Build a template environment holding a single template. Generated files
/// keep their trailing newline.
fn template_env(name: &'static str, source: &'static str) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(name, source)?;
    Ok(env)
}
