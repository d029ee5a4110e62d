use autovenv::core::config;
use autovenv::core::context::InvocationContext;
use autovenv::core::locator;
use autovenv::core::probe::OsProbe;
use autovenv::core::resolver::EnvironmentResolver;
use autovenv::core::synthesizer;
use autovenv::models::{Configuration, PathOverride, Shell};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn real_home() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let home = dunce::canonicalize(tmp.path()).unwrap();
    (tmp, home)
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

#[test]
fn test_outermost_marker_wins_on_real_directories() {
    let (_tmp, home) = real_home();
    touch(&home.join("a/b/requirements.txt"));
    touch(&home.join("a/b/c/d/requirements.txt"));
    fs::create_dir_all(home.join("a/b/c/d/e")).unwrap();

    let found = locator::locate(
        &OsProbe,
        &home.join("a/b/c/d/e"),
        &home,
        &Configuration::default(),
    );
    assert_eq!(found, Some(home.join("a/b")));
}

#[test]
fn test_home_itself_is_never_a_project() {
    let (_tmp, home) = real_home();
    touch(&home.join("requirements.txt"));
    fs::create_dir_all(home.join("scratch")).unwrap();

    let found = locator::locate(
        &OsProbe,
        &home.join("scratch"),
        &home,
        &Configuration::default(),
    );
    assert_eq!(found, None);
}

#[test]
fn test_config_round_trip_on_disk() {
    let (_tmp, home) = real_home();
    fs::create_dir_all(home.join("work/mono")).unwrap();
    let path = home.join("data/config.toml");

    let mut cfg = Configuration::default();
    cfg.marker_file_names.push("pyproject.toml".to_string());
    cfg.overrides.insert(
        home.join("work/mono"),
        PathOverride {
            interpreter_version: Some("3.12.1".to_string()),
            environment_name: Some("mono".to_string()),
        },
    );

    config::save(&path, &cfg, &home).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    assert!(first.contains("~/work/mono"));
    assert!(first.contains("3.12.1/mono"));

    let loaded = config::load(&path, &home, &OsProbe).unwrap();
    assert_eq!(loaded, cfg);

    config::save(&path, &loaded, &home).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[cfg(unix)]
#[test]
fn test_symlinked_override_key_matches_real_working_directory() {
    let (_tmp, home) = real_home();
    fs::create_dir_all(home.join("real/pkg")).unwrap();
    std::os::unix::fs::symlink(home.join("real"), home.join("alias")).unwrap();
    let path = home.join("config.toml");
    fs::write(&path, "[overrides]\n\"~/alias\" = \"/aliased\"\n").unwrap();

    let cfg = config::load(&path, &home, &OsProbe).unwrap();
    let mut ctx = InvocationContext::with_home(home.clone(), home.join("real/pkg"));
    ctx.system_python = Some(PathBuf::from("/usr/bin/python3"));
    let resolver = EnvironmentResolver::new(&ctx, &cfg, &OsProbe);

    assert_eq!(resolver.correct_environment_name(), "aliased");
    assert_eq!(resolver.project_location(), Some(home.join("real")));
}

#[test]
fn test_suggested_command_against_real_tree() {
    let (_tmp, home) = real_home();
    touch(&home.join("proj/requirements.txt"));
    touch(&home.join(".python-versions/3.11.4/bin/python"));
    fs::write(home.join("proj/.python-version"), "3.11.4\n").unwrap();

    let ctx = InvocationContext::with_home(home.clone(), home.join("proj"));
    let cfg = Configuration::default();
    let resolver = EnvironmentResolver::new(&ctx, &cfg, &OsProbe);

    let command = synthesizer::suggested_command(&resolver, Shell::Bash).unwrap();
    let venv = home.join(".virtualenvs/3.11.4/proj");
    assert!(command.starts_with(
        "eval echo ''\\''AUTOVENV: creating virtual environment: proj (using non-system python version 3.11.4)'\\'''; "
    ));
    assert!(command.contains(&format!("{}", venv.display())));

    fs::create_dir_all(&venv).unwrap();
    let command = synthesizer::suggested_command(&resolver, Shell::Fish).unwrap();
    assert!(command.starts_with("source "));
    assert!(command.ends_with("bin/activate.fish"));
}
