use crate::core::resolver::{EnvironmentResolver, ResolveError};
use crate::models::{Resolution, Shell, Step};
use crate::system::shell;

/// Decides which steps bring the calling shell to the desired state.
///
/// - No target environment and one is active: deactivate.
/// - No target environment and none active: nothing.
/// - A target environment: create it if missing (with a notice), then
///   activate it unless it is already the active one.
pub fn plan(
    resolver: &EnvironmentResolver<'_>,
    resolution: &Resolution,
) -> Result<Vec<Step>, ResolveError> {
    let environment = &resolution.environment;

    if !environment.applies() {
        if resolution.any_active {
            log::debug!("Outside of any project with an environment active; deactivating.");
            return Ok(vec![Step::Deactivate]);
        }
        return Ok(Vec::new());
    }

    let mut steps = Vec::new();
    if !environment.exists {
        let command = resolver.creation_command(&resolution.interpreter)?;
        let mut notice = format!("creating virtual environment: {}", environment.name);
        if let Some(version) = &resolution.interpreter.version {
            notice.push_str(&format!(" (using non-system python version {})", version));
        }
        steps.push(Step::Notice(notice));
        steps.push(Step::Create {
            command,
            target: environment.path.clone(),
        });
    }

    if !environment.is_active {
        steps.push(Step::Activate {
            environment: environment.path.clone(),
        });
    }
    Ok(steps)
}

/// Resolves the working directory and renders the command for `dialect`.
pub fn suggested_command(
    resolver: &EnvironmentResolver<'_>,
    dialect: Shell,
) -> Result<String, ResolveError> {
    let resolution = resolver.resolve()?;
    let steps = plan(resolver, &resolution)?;
    Ok(shell::render(&steps, dialect))
}
