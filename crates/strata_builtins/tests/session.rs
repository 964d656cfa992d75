//! Built-ins driven through the dispatcher, end to end.

use std::env;
use std::fs;
use std::path::Path;

use serial_test::serial;
use strata_builtins::register_all;
use strata_core::{Dispatcher, ScriptedConsole, ShellContext, ShellSettings};

fn shell_with(dir: &Path, inputs: Vec<&str>) -> Dispatcher {
    let settings = ShellSettings {
        commands_file: dir.join("commands.cfg"),
        color: false,
        ..ShellSettings::default()
    };
    let mut ctx = ShellContext::new(settings, Box::new(ScriptedConsole::new(inputs)));
    register_all(&mut ctx.commands);
    ctx.load_config();
    Dispatcher::new(ctx)
}

fn shell(dir: &Path) -> Dispatcher {
    shell_with(dir, Vec::new())
}

/// Restores the working directory when dropped.
struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let old = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        CwdGuard(old)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn pwd_prints_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    let expected = env::current_dir().unwrap().display().to_string();
    assert_eq!(sh.execute("pwd"), expected);
}

#[test]
#[serial]
fn chained_commands_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    let cwd = env::current_dir().unwrap().display().to_string();
    assert_eq!(sh.run_line("echo foo && pwd"), vec!["foo".to_string(), cwd]);
    assert_eq!(sh.context().history.entries(), ["echo foo", "pwd"]);
}

#[test]
#[serial]
fn cd_changes_directory_and_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();
    let _guard = CwdGuard::enter(Path::new("/"));
    let mut sh = shell(dir.path());
    let out = sh.execute(&format!("cd {}", target.display()));
    assert_eq!(out, format!("Changed directory to {}", target.display()));
    assert_eq!(env::current_dir().unwrap().canonicalize().unwrap(), target);

    let out = sh.execute("cd /definitely/not/here");
    assert!(out.starts_with("Error executing cd: /definitely/not/here"), "{out}");
}

#[test]
#[serial]
fn ls_lists_sorted_entries_with_directory_suffix() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let _guard = CwdGuard::enter(dir.path());
    let mut sh = shell(dir.path());
    assert_eq!(sh.execute("ls"), "a.txt\nb.txt\nsub/");
    assert_eq!(sh.execute("dir"), "a.txt\nb.txt\nsub/");
}

#[test]
fn echo_joins_arguments_and_defaults_to_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    assert_eq!(sh.execute("echo a  b   c"), "a b c");
    assert_eq!(sh.execute("echo"), "");
}

#[test]
fn alias_is_created_persisted_and_used() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    assert_eq!(sh.execute("alias g echo hello"), "Alias created: g -> echo hello");
    assert_eq!(sh.execute("g world"), "hello world");
    assert_eq!(fs::read_to_string(dir.path().join("commands.cfg")).unwrap(), "g=echo hello\n");

    let mut fresh = shell(dir.path());
    assert_eq!(fresh.execute("g again"), "hello again");
    assert_eq!(fresh.execute("unalias g"), "Alias removed: g");
    assert_eq!(fresh.execute("unalias g"), "No alias named 'g'.");
}

#[test]
fn alias_without_arguments_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    assert_eq!(
        sh.execute("alias"),
        "alias <name> <command>\n  Create an alias for a command\n  name: Required\n  command: Required"
    );
}

#[test]
fn alias_cycles_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    sh.execute("alias a b");
    let out = sh.execute("alias b a");
    assert_eq!(out, "Error executing alias: alias 'b' would create a cycle");
    assert!(!sh.context().aliases.contains("b"));
}

#[test]
fn history_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    sh.run_line("echo one && echo two");
    assert_eq!(sh.run_line("history"), vec!["1: echo one\n2: echo two\n3: history"]);
    assert_eq!(sh.execute("search two"), "1: echo two");
    assert_eq!(sh.execute("search zebra"), "No matches for 'zebra'.");
    // run_line records the search itself before running it
    assert_eq!(sh.run_line("search zebra"), vec!["1: search zebra"]);
}

#[test]
fn custom_command_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell_with(dir.path(), vec!["greet", "echo hi $1", "Say hi", "who"]);
    assert_eq!(sh.execute("listcmd"), "No custom commands defined.");
    assert_eq!(sh.execute("addcmd"), "Custom command 'greet' added successfully.");
    assert_eq!(sh.execute("listcmd"), "greet: Say hi");

    let text = fs::read_to_string(dir.path().join("commands.cfg")).unwrap();
    assert_eq!(text, "[greet]\ncommand = echo hi $1\nhelp = Say hi\nargs = who\n");

    #[cfg(unix)]
    assert_eq!(sh.execute("greet bob"), "hi bob\n");

    assert_eq!(sh.execute("rmcmd greet"), "Custom command 'greet' removed.");
    assert_eq!(sh.execute("rmcmd greet"), "No custom command named 'greet'.");
    assert_eq!(fs::read_to_string(dir.path().join("commands.cfg")).unwrap(), "");
}

#[test]
fn addcmd_rejects_an_empty_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell_with(dir.path(), vec![""]);
    assert_eq!(sh.execute("addcmd"), "Error executing addcmd: command name must not be empty");
    assert!(sh.context().custom.is_empty());
}

#[test]
fn refresh_reloads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    fs::write(
        dir.path().join("commands.cfg"),
        "[one]\ncommand = echo 1\n[two]\ncommand = echo 2\n[broken]\nargs = x\n",
    )
    .unwrap();
    let out = sh.execute("refresh_commands");
    assert!(out.starts_with("Refresh complete. 2 commands loaded successfully.\n"), "{out}");
    assert!(out.contains("- broken: line 5: missing 'command' key"), "{out}");
    assert!(sh.context().custom.contains("one"));
}

#[test]
fn help_lists_sections_and_details() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("commands.cfg"), "ll=ls -la\n\n[gl]\ncommand = git log -n $1\nhelp = Show commits\nargs = count\n")
        .unwrap();
    let mut sh = shell(dir.path());

    let overview = sh.execute("help");
    assert!(overview.contains("STRATA SHELL HELP"));
    assert!(overview.contains("Base Commands:"));
    assert!(overview.contains("Custom Commands:\n  gl : Show commits"));
    assert!(overview.contains("Aliases:\n  ll : ls -la"));
    assert!(!overview.contains("  help "));

    let cd = sh.execute("help cd");
    assert!(cd.contains("HELP: CD"));
    assert!(cd.contains("Usage: cd [path]"));
    assert!(cd.contains("path: Optional (Default: .)"));

    let gl = sh.execute("help gl");
    assert!(gl.contains("Usage: gl <count>"));
    assert!(gl.contains("count: $1"));

    assert_eq!(sh.execute("help nope"), "No help available for 'nope'.");
}

#[test]
fn exit_requests_the_session_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    let outputs = sh.run_line("exit && echo never");
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].contains("Goodbye!"));
    assert!(sh.context().exit_requested());
}

#[test]
#[serial]
fn file_manager_returns_closing_message() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = CwdGuard::enter(dir.path());
    let mut sh = shell_with(dir.path(), vec!["q"]);
    let cwd = env::current_dir().unwrap();
    assert_eq!(sh.execute("fm"), format!("File manager closed. Current directory: {}", cwd.display()));
}

#[cfg(unix)]
#[test]
fn unknown_command_is_forwarded_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(dir.path());
    let out = sh.execute("lsdjfklsd");
    assert!(out.starts_with("Error Output:"), "{out}");
    assert!(out.contains("lsdjfklsd"));
    assert!(!sh.context().exit_requested());
}
