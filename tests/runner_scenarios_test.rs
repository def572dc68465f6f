//! Integration tests driving the runner end to end with recording collaborators

use minirun_core::{
    CommandLine, Config, Result, RunOptions, Runner,
    interfaces::{InfoOptions, Messenger, NotifyImage, Notifier, ProcessExecutor},
    services::{FileInspector, FixedVersionProbe, NoIsolation},
};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Log {
    commands: Arc<Mutex<Vec<CommandLine>>>,
    messages: Arc<Mutex<Vec<String>>>,
    notifications: Arc<Mutex<Vec<NotifyImage>>>,
}

impl Log {
    fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(CommandLine::to_shell_command)
            .collect()
    }

    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

struct ScriptedExecutor {
    log: Log,
    outcomes: Mutex<Vec<bool>>,
}

impl ProcessExecutor for ScriptedExecutor {
    fn execute(&self, command: &CommandLine) -> Result<bool> {
        self.log.commands.lock().unwrap().push(command.clone());
        let mut outcomes = self.outcomes.lock().unwrap();
        Ok(if outcomes.is_empty() {
            true
        } else {
            outcomes.remove(0)
        })
    }
}

struct RecordingMessenger(Log);

impl Messenger for RecordingMessenger {
    fn info(&self, message: &str, _options: InfoOptions) {
        self.0.messages.lock().unwrap().push(message.to_string());
    }
}

struct RecordingNotifier(Log);

impl Notifier for RecordingNotifier {
    fn notify(&self, _message: &str, _title: &str, image: NotifyImage) {
        self.0.notifications.lock().unwrap().push(image);
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("test")).unwrap();
    fs::write(temp_dir.path().join("test/a_test.rb"), "").unwrap();
    fs::write(temp_dir.path().join("test/b_test.rb"), "").unwrap();
    fs::write(temp_dir.path().join("test/helper.rb"), "").unwrap();
    temp_dir
}

fn build_runner(dir: &TempDir, config: Config, outcomes: Vec<bool>, gte_5: bool) -> (Runner, Log) {
    let log = Log::default();
    let inspector = FileInspector::new(&config.test_folders, &config.test_file_patterns)
        .unwrap()
        .with_root(dir.path());

    let runner = Runner::builder(config)
        .inspector(inspector)
        .executor(ScriptedExecutor {
            log: log.clone(),
            outcomes: Mutex::new(outcomes),
        })
        .isolation(NoIsolation)
        .version_probe(FixedVersionProbe(gte_5))
        .legacy_shim("/usr/lib/minirun/old_runner.rb")
        .messenger(RecordingMessenger(log.clone()))
        .notifier(RecordingNotifier(log.clone()))
        .build()
        .unwrap();

    (runner, log)
}

fn plain_config() -> Config {
    Config {
        bundler: false,
        test_folders: strings(&["test"]),
        include: Vec::new(),
        ..Default::default()
    }
}

#[test]
fn test_plain_run_end_to_end() {
    let dir = workspace();
    let (runner, log) = build_runner(&dir, plain_config(), vec![true], true);

    assert!(runner.run(&strings(&["test/a_test.rb"]), RunOptions::default()));

    let commands = log.commands.lock().unwrap();
    assert_eq!(commands.len(), 1);
    let tokens = &commands[0].tokens;
    assert!(tokens.contains(&"-r minitest/autorun".to_string()));
    assert!(tokens.contains(&"-r ./test/a_test.rb".to_string()));
    assert!(tokens.contains(&"-I\"test\"".to_string()));
    assert_eq!(tokens.last().map(String::as_str), Some("--"));
    assert!(log.notifications.lock().unwrap().is_empty());
}

#[test]
fn test_old_minitest_gets_shim() {
    let dir = workspace();
    let (runner, log) = build_runner(&dir, plain_config(), vec![true], false);

    runner.run(&strings(&["test/a_test.rb"]), RunOptions::default());

    assert_eq!(
        log.commands(),
        vec![
            r#"ruby -I"test" -r minitest/autorun -r ./test/a_test.rb -r /usr/lib/minirun/old_runner.rb -e "" --"#
        ]
    );
}

#[test]
fn test_all_after_pass_triggers_exactly_one_full_run() {
    let dir = workspace();
    let config = Config {
        all_after_pass: true,
        ..plain_config()
    };
    let (runner, log) = build_runner(&dir, config, vec![true, true], true);

    assert!(runner.run(&strings(&["test/a_test.rb"]), RunOptions::default()));

    let commands = log.commands();
    assert_eq!(commands.len(), 2);
    assert!(commands[1].contains("-r ./test/a_test.rb -r ./test/b_test.rb"));
    assert_eq!(
        log.messages(),
        vec!["Running: test/a_test.rb", "Running: all tests"]
    );
}

#[test]
fn test_all_after_pass_not_triggered_by_failure() {
    let dir = workspace();
    let config = Config {
        all_after_pass: true,
        ..plain_config()
    };
    let (runner, log) = build_runner(&dir, config, vec![false], true);

    assert!(!runner.run(&strings(&["test/a_test.rb"]), RunOptions::default()));
    assert_eq!(log.commands().len(), 1);
}

#[test]
fn test_modifications_filter_through_inspector() {
    let dir = workspace();
    let (runner, log) = build_runner(&dir, plain_config(), vec![], true);

    runner.run_on_modifications(&strings(&["test/helper.rb", "test/b_test.rb", "lib/x.rb"]));
    runner.run_on_modifications(&strings(&["test"]));

    assert_eq!(
        log.messages(),
        vec!["Running: test/b_test.rb", "Running: all tests"]
    );
}

#[test]
fn test_additions_invalidate_listing() {
    let dir = workspace();
    let (runner, log) = build_runner(&dir, plain_config(), vec![], true);
    assert_eq!(runner.inspector().all_test_files().len(), 2);

    fs::write(dir.path().join("test/c_test.rb"), "").unwrap();
    assert_eq!(runner.inspector().all_test_files().len(), 2);

    assert!(runner.run_on_additions(&[]));
    assert_eq!(runner.inspector().all_test_files().len(), 3);

    fs::remove_file(dir.path().join("test/a_test.rb")).unwrap();
    runner.run_on_removals(&strings(&["test/a_test.rb"]));
    assert_eq!(runner.inspector().all_test_files().len(), 2);

    assert!(log.commands().is_empty());
}

#[test]
fn test_spring_notifies_and_formats_paths() {
    let dir = workspace();
    let config = Config {
        spring: "testunit".into(),
        ..plain_config()
    };
    let (runner, log) = build_runner(&dir, config, vec![true, false], false);

    runner.run(&strings(&["test/a_test.rb"]), RunOptions::default());
    assert_eq!(
        log.commands(),
        vec!["spring testunit /usr/lib/minirun/old_runner.rb TEST=test/a_test.rb"]
    );

    let config = Config {
        cli: strings(&["--seed 3"]),
        spring: "rake test".into(),
        ..plain_config()
    };
    let (runner, log2) = build_runner(&dir, config, vec![false], false);
    assert!(!runner.run(&strings(&["test/a_test.rb"]), RunOptions::default()));
    assert_eq!(
        log2.commands(),
        vec!["spring rake test test/a_test.rb -- --seed 3"]
    );

    assert_eq!(*log.notifications.lock().unwrap(), vec![NotifyImage::Success]);
    assert_eq!(*log2.notifications.lock().unwrap(), vec![NotifyImage::Failed]);
}

#[test]
fn test_conflicting_backends_follow_priority() {
    let dir = workspace();
    let config: Config = serde_json::from_value(serde_json::json!({
        "bundler": true,
        "test_folders": ["test"],
        "zeus": true,
        "spring": "testunit",
    }))
    .unwrap();
    let (runner, log) = build_runner(&dir, config, vec![true], true);

    runner.run(&strings(&["test/a_test.rb"]), RunOptions::default());

    // zeus beats spring, and the spring switch still disables bundler
    assert_eq!(log.commands(), vec!["zeus test ./test/a_test.rb"]);
}

#[test]
fn test_deprecated_options_from_json() {
    let dir = workspace();
    let config: Config = serde_json::from_value(serde_json::json!({
        "bundler": false,
        "test_folders": ["test", "test", null],
        "seed": "42",
        "verbose": true,
        "notify": true,
    }))
    .unwrap();
    let (runner, log) = build_runner(&dir, config, vec![true], true);

    assert_eq!(runner.test_folders(), &strings(&["test"])[..]);
    assert_eq!(runner.cli_options(), &strings(&["--seed 42", "--verbose"])[..]);
    assert_eq!(log.messages().len(), 3);
    assert!(log.messages()[0].contains(":notify"));

    runner.run(&strings(&["test/a_test.rb"]), RunOptions::default());
    assert!(log.commands()[0].ends_with("-e \"\" -- --seed 42 --verbose"));
}
