use std::{fs, path::PathBuf, process::Command};

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "seed = 42\n"
        + "\n"
        + "[cleaning]\n"
        + "num_robots = 2\n"
        + "speed = 1.0\n"
        + "width = 5\n"
        + "height = 5\n"
        + "min_coverage = 0.8\n"
        + "num_trials = 5\n"
        + "strategy = \"standard\"\n"
        + "\n"
        + "[infection]\n"
        + "num_viruses = 10\n"
        + "max_pop = 100\n"
        + "max_birth_prob = 0.3\n"
        + "clear_prob = 0.1\n"
        + "num_trials = 3\n"
        + "time_steps = 30\n"
        + "\n"
        + "[infection.treatment]\n"
        + "drug = \"guttagonol\"\n"
        + "mut_prob = 0.005\n"
        + "resistances = { guttagonol = false }\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    fn run_bin(args: &[&str]) -> String {
        let bin = PathBuf::from(env!("CARGO_BIN_EXE_stochsim"));

        let output = Command::new(bin)
            .args(args)
            .output()
            .expect("failed to execute command");

        let stdout_str =
            std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
        let stderr_str =
            std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

        assert!(
            output.status.success(),
            "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
        );

        stdout_str.to_string()
    }

    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let robots_out = run_bin(&["--config", config_str, "robots"]);
    let mean_steps: f64 = robots_out.trim().parse().expect("mean steps not numeric");
    assert!(mean_steps >= 0.0);

    let virus_out = run_bin(&["--config", config_str, "virus"]);
    // Header plus one row per time step.
    assert_eq!(virus_out.lines().count(), 31);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn rejects_invalid_config() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("invalid_config");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[cleaning]\n"
        + "num_robots = 0\n"
        + "speed = 1.0\n"
        + "width = 5\n"
        + "height = 5\n"
        + "min_coverage = 0.8\n"
        + "num_trials = 5\n"
        + "strategy = \"standard\"\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");

    let bin = PathBuf::from(env!("CARGO_BIN_EXE_stochsim"));
    let output = Command::new(bin)
        .args([
            "--config",
            config_path.to_str().expect("invalid config path"),
            "robots",
        ])
        .output()
        .expect("failed to execute command");

    assert!(!output.status.success());

    fs::remove_dir_all(&test_dir).ok();
}
