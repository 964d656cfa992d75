//! Dispatcher behaviour against a scripted host shell.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use strata_core::{
    Argument, Builtin, CustomCommand, Dispatcher, ScriptedConsole, ShellContext, ShellResult, ShellSettings,
};
use strata_hal::{HalError, HalResult, HostOutput, HostShell};

#[derive(Default)]
struct FakeHost {
    calls: Mutex<Vec<(String, Option<Duration>)>>,
}

impl FakeHost {
    fn calls(&self) -> Vec<(String, Option<Duration>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostShell for FakeHost {
    fn run(&self, line: &str, timeout: Option<Duration>) -> HalResult<HostOutput> {
        self.calls.lock().unwrap().push((line.to_string(), timeout));
        match line.split_whitespace().next() {
            Some("sleep") => Err(HalError::TimedOut(timeout.unwrap_or_default())),
            Some("nosuchshell") => Err(HalError::process_error("failed to spawn", "sh", "No such file or directory")),
            Some("lsdjfklsd") => Ok(HostOutput {
                stdout: String::new(),
                stderr: "sh: 1: lsdjfklsd: not found\n".into(),
                status: Some(127),
            }),
            _ => Ok(HostOutput { stdout: format!("ran: {line}\n"), stderr: String::new(), status: Some(0) }),
        }
    }
}

struct Say;

impl Builtin for Say {
    fn name(&self) -> &'static str {
        "say"
    }
    fn help_text(&self) -> &'static str {
        "Repeat the arguments"
    }
    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::required("text")]
    }
    fn execute(&self, _ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        Ok(args.join(" "))
    }
}

struct Quit;

impl Builtin for Quit {
    fn name(&self) -> &'static str {
        "quit"
    }
    fn help_text(&self) -> &'static str {
        "End the session"
    }
    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        ctx.request_exit();
        Ok("bye".into())
    }
}

fn setup(settings: ShellSettings) -> (Dispatcher, Arc<FakeHost>) {
    let host = Arc::new(FakeHost::default());
    let mut ctx = ShellContext::new(settings, Box::new(ScriptedConsole::default())).with_host(host.clone());
    ctx.commands.register(Arc::new(Say));
    ctx.commands.register(Arc::new(Quit));
    (Dispatcher::new(ctx), host)
}

fn plain() -> ShellSettings {
    let dir = std::env::temp_dir().join(format!("strata-dispatch-{}", std::process::id()));
    ShellSettings { color: false, commands_file: dir.join("unused.cfg"), ..ShellSettings::default() }
}

#[test]
fn builtins_run_before_host_shell() {
    let (mut shell, host) = setup(plain());
    assert_eq!(shell.execute("say hello there"), "hello there");
    assert!(host.calls().is_empty());
}

#[test]
fn missing_required_argument_shows_usage() {
    let (mut shell, _) = setup(plain());
    assert_eq!(shell.execute("say"), "say <text>\n  Repeat the arguments\n  text: Required");
}

#[test]
fn alias_rewrites_head_and_keeps_arguments() {
    let (mut shell, host) = setup(plain());
    shell.context_mut().aliases.insert("g", "echo hello").unwrap();
    assert_eq!(shell.execute("g world"), "Command Output:\nran: echo hello world");
    assert_eq!(host.calls()[0].0, "echo hello world");
}

#[test]
fn aliases_chain_into_builtins() {
    let (mut shell, _) = setup(plain());
    shell.context_mut().aliases.insert("s", "say from alias").unwrap();
    shell.context_mut().aliases.insert("t", "s and more").unwrap();
    assert_eq!(shell.execute("t !"), "from alias and more !");
}

#[test]
fn hand_written_alias_cycle_is_bounded() {
    let (mut shell, host) = setup(plain());
    shell.context_mut().aliases.insert_unchecked("a", "b");
    shell.context_mut().aliases.insert_unchecked("b", "a");
    assert_eq!(shell.execute("a"), "Error: alias expansion exceeded 16 levels (cycle through 'a'?)");
    assert!(host.calls().is_empty());
}

#[test]
fn unknown_commands_go_to_host_shell_with_timeout() {
    let (mut shell, host) = setup(plain());
    let out = shell.execute("lsdjfklsd");
    assert_eq!(out, "Error Output:\nsh: 1: lsdjfklsd: not found");
    assert_eq!(host.calls(), vec![("lsdjfklsd".to_string(), Some(Duration::from_secs(30)))]);
}

#[test]
fn host_timeout_is_reported_as_text() {
    let mut settings = plain();
    settings.fallback_timeout_secs = 5;
    let (mut shell, _) = setup(settings);
    assert_eq!(shell.execute("sleep 100"), "Command execution timed out after 5 seconds.");
}

#[test]
fn spawn_failure_is_reported_as_text() {
    let (mut shell, _) = setup(plain());
    assert_eq!(
        shell.execute("nosuchshell"),
        "Error executing command: failed to spawn 'sh': No such file or directory"
    );
}

#[test]
fn builtins_shadow_custom_commands() {
    let (mut shell, host) = setup(plain());
    shell.context_mut().custom.insert(CustomCommand::new("say", "echo custom", "", vec![]));
    shell.context_mut().custom.insert(CustomCommand::new("greet", "echo hi $1", "", vec![]));
    assert_eq!(shell.execute("say builtin"), "builtin");
    assert_eq!(shell.execute("greet bob"), "ran: echo hi bob\n");
    assert_eq!(host.calls(), vec![("echo hi bob".to_string(), None)]);
}

#[test]
fn inline_custom_command_when_enabled() {
    let mut settings = plain();
    settings.inline_eval = true;
    let (mut shell, host) = setup(settings);
    shell
        .context_mut()
        .custom
        .insert(CustomCommand::new("calc", "inline -c \"result = $1 + $2\"", "Add", vec!["a".into(), "b".into()]));
    assert_eq!(shell.execute("calc 2 40"), "42");
    assert!(host.calls().is_empty());
}

#[test]
fn run_line_records_history_in_order() {
    let (mut shell, _) = setup(plain());
    let outputs = shell.run_line("say foo &&  && say bar");
    assert_eq!(outputs, vec!["foo", "bar"]);
    assert_eq!(shell.context().history.entries(), ["say foo", "say bar"]);
}

#[test]
fn exit_stops_remaining_segments() {
    let (mut shell, _) = setup(plain());
    let outputs = shell.run_line("say one && quit && say two");
    assert_eq!(outputs, vec!["one", "bye"]);
    assert!(shell.context().exit_requested());
    assert_eq!(shell.context().history.len(), 2);
}

#[test]
fn blank_line_prints_nothing() {
    let (mut shell, host) = setup(plain());
    assert_eq!(shell.execute("   "), "");
    assert!(shell.run_line("").is_empty());
    assert!(host.calls().is_empty());
}
