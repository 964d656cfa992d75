//! Config file lifecycle through the public API.

use std::fs;

use strata_core::{AliasTable, ConfigStore, CustomCommand, CustomCommandRegistry, ScriptedConsole, ShellContext, ShellSettings};

#[test]
fn aliases_and_commands_survive_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("commands.cfg"));

    let mut aliases = AliasTable::new();
    aliases.insert("g", "echo hello").unwrap();
    aliases.insert("ll", "ls -la").unwrap();
    aliases.insert("up", "cd ..").unwrap();

    let commands: CustomCommandRegistry = [
        CustomCommand::new("gl", "git log -n $1", "Show last N commits", vec!["count".into()]),
        CustomCommand::new("backup", "cp -r $1 $2.bak\necho done", "Back up a path", vec!["src".into(), "dst".into()]),
    ]
    .into_iter()
    .collect();

    store.save_all(&aliases, &commands).unwrap();
    let doc = store.load().unwrap().expect("file was just written");

    let loaded_aliases: Vec<_> = doc.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(loaded_aliases, aliases.iter().collect::<Vec<_>>());
    assert_eq!(doc.commands, commands.iter().cloned().collect::<Vec<_>>());
    assert!(doc.issues.is_empty());
}

#[test]
fn broken_sections_do_not_block_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commands.cfg");
    fs::write(
        &path,
        "g=echo hello\n\n[good]\ncommand = echo good\n\n[bad]\nhelp = no command\n\n[also_good]\ncommand: echo also\n",
    )
    .unwrap();
    let settings = ShellSettings { commands_file: path, ..ShellSettings::default() };
    let mut ctx = ShellContext::new(settings, Box::new(ScriptedConsole::default()));

    let report = ctx.load_config();
    assert!(report.found);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].section, "bad");
    assert!(ctx.custom.contains("good"));
    assert!(ctx.custom.contains("also_good"));
    assert_eq!(ctx.aliases.get("g"), Some("echo hello"));
}

#[test]
fn continuation_lines_that_look_like_headers_or_comments_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("commands.cfg"));
    let template = "echo a\n[ -f x ] && echo b\n# not a comment\n\n; nor this\necho c";
    let commands: CustomCommandRegistry = [
        CustomCommand::new("check", template, "Test then echo", vec![]),
        CustomCommand::new("later", "echo later", "Comes after", vec![]),
    ]
    .into_iter()
    .collect();

    store.save_all(&AliasTable::new(), &commands).unwrap();
    let doc = store.load().unwrap().expect("file was just written");

    assert!(doc.issues.is_empty(), "{:?}", doc.issues);
    assert_eq!(doc.commands, commands.iter().cloned().collect::<Vec<_>>());
    assert_eq!(doc.commands[0].template, template);
}
